use crate::config::toml_config::TomlConfig;
use crate::core::alias::AliasPolicy;
use crate::domain::person::{ActivityLevel, Sex};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "campus-menu")]
#[command(about = "Look up cafeteria dishes and total their nutrients")]
pub struct CliConfig {
    /// Path to the menu CSV (overrides [menu].csv_path)
    #[arg(long, global = true)]
    pub menu: Option<String>,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// How to treat a name shared by two dishes
    #[arg(long, value_enum, global = true)]
    pub alias_policy: Option<AliasPolicy>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Show the number of dishes and a few samples
    Stats,

    /// List dishes whose name contains a keyword
    Search {
        keyword: String,
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: usize,
    },

    /// Resolve a name or synonym and show every nutrient
    Show { query: String },

    /// Print the energy of the dish a name resolves to
    Kcal { query: String },

    /// Total an order given as "<name>[:<qty>]" lines
    Order {
        #[arg(required = true)]
        lines: Vec<String>,
        /// Fail when a line does not match any dish
        #[arg(long)]
        strict: bool,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Also write the JSON result to this file
        #[arg(long)]
        output: Option<String>,
    },

    /// Total nutrients over dishes whose name contains a keyword
    Sum { keyword: String },

    /// List the highest-energy dishes
    Topkcal {
        #[arg(short = 'n', default_value_t = 10)]
        n: usize,
    },

    /// BMI, daily energy expenditure and macro targets for a person
    Profile {
        #[arg(long)]
        age: u32,
        #[arg(long, value_enum)]
        sex: Sex,
        /// Height in centimeters
        #[arg(long)]
        height: f64,
        /// Weight in kilograms
        #[arg(long)]
        weight: f64,
        #[arg(long, value_enum, default_value_t = ActivityLevel::Moderate)]
        activity: ActivityLevel,
    },
}

impl CliConfig {
    /// 命令列參數覆蓋 TOML 設定
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(menu) = &self.menu {
            config.menu.csv_path = Some(menu.clone());
            tracing::debug!("🔧 Menu path overridden to: {}", menu);
        }
        if let Some(policy) = self.alias_policy {
            config.resolution.alias_policy = Some(policy);
            tracing::debug!("🔧 Alias policy overridden to: {:?}", policy);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_order_command() {
        let cli = CliConfig::parse_from([
            "campus-menu",
            "--menu",
            "menu.csv",
            "order",
            "カレー:2",
            "味噌汁",
            "--strict",
        ]);

        assert_eq!(cli.menu.as_deref(), Some("menu.csv"));
        match cli.command {
            Command::Order {
                lines,
                strict,
                json,
                output,
            } => {
                assert_eq!(lines, vec!["カレー:2", "味噌汁"]);
                assert!(strict);
                assert!(!json);
                assert!(output.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_profile_defaults_to_moderate() {
        let cli = CliConfig::parse_from([
            "campus-menu",
            "profile",
            "--age",
            "20",
            "--sex",
            "female",
            "--height",
            "160",
            "--weight",
            "50",
        ]);

        match cli.command {
            Command::Profile { sex, activity, .. } => {
                assert_eq!(sex, Sex::Female);
                assert_eq!(activity, ActivityLevel::Moderate);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_overrides_replace_toml_values() {
        let cli = CliConfig::parse_from([
            "campus-menu",
            "--menu",
            "other.csv",
            "--alias-policy",
            "reject-collisions",
            "stats",
        ]);
        let mut config = TomlConfig::default();
        config.menu.csv_path = Some("menu.csv".to_string());

        cli.apply_overrides(&mut config);

        assert_eq!(config.menu.csv_path.as_deref(), Some("other.csv"));
        assert_eq!(
            config.resolution.alias_policy,
            Some(AliasPolicy::RejectCollisions)
        );
    }
}
