use crate::core::alias::AliasPolicy;
use crate::core::body_metrics::MacroSettings;
use crate::core::ConfigProvider;
use crate::utils::error::{MenuError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub resolution: ResolutionConfig,
    #[serde(default)]
    pub targets: TargetsConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuConfig {
    pub csv_path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolutionConfig {
    pub alias_policy: Option<AliasPolicy>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetsConfig {
    pub protein_g_per_kg: Option<f64>,
    pub fat_ratio: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MenuError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| MenuError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${MENU_CSV})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| MenuError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.menu.csv_path {
            validation::validate_path("menu.csv_path", path)?;
            validation::validate_file_extension("menu.csv_path", path, &["csv"])?;
        }

        let settings = self.macro_settings();
        validation::validate_range(
            "targets.protein_g_per_kg",
            settings.protein_g_per_kg,
            0.0,
            5.0,
        )?;
        validation::validate_range("targets.fat_ratio", settings.fat_ratio, 0.0, 1.0)?;

        if let Some(level) = self.log_level() {
            validation::validate_non_empty_string("logging.level", level)?;
            if !LOG_LEVELS.contains(&level) {
                return Err(MenuError::InvalidConfigValueError {
                    field: "logging.level".to_string(),
                    value: level.to_string(),
                    reason: format!("Valid levels: {}", LOG_LEVELS.join(", ")),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn menu_path(&self) -> Option<&str> {
        self.menu.csv_path.as_deref()
    }

    fn alias_policy(&self) -> AliasPolicy {
        self.resolution.alias_policy.unwrap_or_default()
    }

    fn strict_orders(&self) -> bool {
        self.resolution.strict.unwrap_or(false)
    }

    fn macro_settings(&self) -> MacroSettings {
        let defaults = MacroSettings::default();
        MacroSettings {
            protein_g_per_kg: self
                .targets
                .protein_g_per_kg
                .unwrap_or(defaults.protein_g_per_kg),
            fat_ratio: self.targets.fat_ratio.unwrap_or(defaults.fat_ratio),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
