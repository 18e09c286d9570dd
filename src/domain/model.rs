use crate::domain::nutrients::Nutrients;
use crate::utils::error::{MenuError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub portion: String,
    pub energy_kcal: f64,
    pub synonyms: Vec<String>,
    pub price_yen: Option<i64>,
    pub url: Option<String>,
    /// `nutrients.energy_kcal` 永遠等於 `energy_kcal`
    pub nutrients: Nutrients,
}

impl Dish {
    pub fn new(id: impl Into<String>, name: impl Into<String>, energy_kcal: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            portion: String::new(),
            energy_kcal,
            synonyms: Vec::new(),
            price_yen: None,
            url: None,
            nutrients: Nutrients::with_energy(energy_kcal),
        }
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms = synonyms.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_portion(mut self, portion: impl Into<String>) -> Self {
        self.portion = portion.into();
        self
    }

    /// 設定其餘營養素；熱量仍以 `energy_kcal` 為準
    pub fn with_nutrients(mut self, nutrients: Nutrients) -> Self {
        self.nutrients = Nutrients {
            energy_kcal: Some(self.energy_kcal),
            ..nutrients
        };
        self
    }

    /// 正式名稱加上所有別名，依插入順序
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.synonyms.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub query: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(query: impl Into<String>, quantity: u32) -> Self {
        Self {
            query: query.into(),
            quantity,
        }
    }

    /// 解析 `"<品名>:<數量>"` 或 `"<品名>"`（數量 1）
    pub fn parse(text: &str) -> Result<Self> {
        let (query, quantity) = match text.rsplit_once(':') {
            Some((query, qty)) => {
                let quantity: u32 = qty.trim().parse().map_err(|_| MenuError::ValidationError {
                    message: format!("quantity '{}' in '{}' is not a positive integer", qty, text),
                })?;
                (query, quantity)
            }
            None => (text, 1),
        };

        if quantity == 0 {
            return Err(MenuError::ValidationError {
                message: format!("quantity in '{}' must be at least 1", text),
            });
        }

        Ok(Self::new(query.trim(), quantity))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: String,
    pub energy_kcal: f64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Aggregation {
    /// 四捨五入到小數一位
    pub total_kcal: f64,
    pub breakdown: Vec<BreakdownEntry>,
    pub nutrients: Nutrients,
    pub unresolved: Vec<String>,
}
