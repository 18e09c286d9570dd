//! 學餐菜單 CSV 載入。
//!
//! 必要欄位：`dish_id`、`name`、`calories_kcal`（也接受 `energy_kcal`）。
//! 選用欄位：`portion`、`synonyms`（逗號分隔）、`price_yen`、`url` 以及各營養素欄位。
//! 檔首 BOM 與欄位名稱前後空白會被去除；空白的選用欄位視為缺值。

use crate::core::catalog::Catalog;
use crate::core::{CatalogSource, Dish, Nutrients, Storage};
use crate::utils::error::{MenuError, Result};
use async_trait::async_trait;
use csv::{ReaderBuilder, StringRecord};
use serde::Deserialize;

const BOM: char = '\u{feff}';

#[derive(Debug, Deserialize)]
struct MenuRow {
    dish_id: String,
    name: String,
    #[serde(default)]
    portion: Option<String>,
    calories_kcal: Option<String>,
    energy_kcal: Option<String>,
    synonyms: Option<String>,
    price_yen: Option<String>,
    url: Option<String>,
    protein_g: Option<String>,
    fat_g: Option<String>,
    carbs_g: Option<String>,
    salt_g: Option<String>,
    calcium_mg: Option<String>,
    vegetables_g: Option<String>,
    iron_mg: Option<String>,
    #[serde(rename = "vitaminA_ugRAE")]
    vitamin_a_ug_rae: Option<String>,
    #[serde(rename = "vitaminB1_mg")]
    vitamin_b1_mg: Option<String>,
    #[serde(rename = "vitaminB2_mg")]
    vitamin_b2_mg: Option<String>,
    #[serde(rename = "vitaminC_mg")]
    vitamin_c_mg: Option<String>,
}

fn normalize_header(header: &str) -> String {
    header.trim().trim_start_matches(BOM).trim().to_string()
}

/// 以逗號切開別名，去除空白並丟掉空項目
pub fn split_synonyms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(row: usize, column: &str, value: &str) -> Result<f64> {
    let trimmed = value.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MenuError::DataError {
            row,
            message: format!("{} '{}' is not a number", column, trimmed),
        })
}

fn parse_optional_number(row: usize, column: &str, value: Option<&str>) -> Result<Option<f64>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse_number(row, column, v).map(Some),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl MenuRow {
    fn into_dish(self, row: usize) -> Result<Dish> {
        let energy_raw = non_empty(self.calories_kcal)
            .or_else(|| non_empty(self.energy_kcal))
            .ok_or_else(|| MenuError::DataError {
                row,
                message: "calories_kcal is required".to_string(),
            })?;
        let energy_kcal = parse_number(row, "calories_kcal", &energy_raw)?;

        let price_yen = match non_empty(self.price_yen) {
            Some(raw) => Some(raw.trim().parse::<i64>().map_err(|_| MenuError::DataError {
                row,
                message: format!("price_yen '{}' is not an integer", raw.trim()),
            })?),
            None => None,
        };

        let nutrients = Nutrients {
            energy_kcal: Some(energy_kcal),
            protein_g: parse_optional_number(row, "protein_g", self.protein_g.as_deref())?,
            fat_g: parse_optional_number(row, "fat_g", self.fat_g.as_deref())?,
            carbs_g: parse_optional_number(row, "carbs_g", self.carbs_g.as_deref())?,
            salt_g: parse_optional_number(row, "salt_g", self.salt_g.as_deref())?,
            calcium_mg: parse_optional_number(row, "calcium_mg", self.calcium_mg.as_deref())?,
            vegetables_g: parse_optional_number(
                row,
                "vegetables_g",
                self.vegetables_g.as_deref(),
            )?,
            iron_mg: parse_optional_number(row, "iron_mg", self.iron_mg.as_deref())?,
            vitamin_a_ug_rae: parse_optional_number(
                row,
                "vitaminA_ugRAE",
                self.vitamin_a_ug_rae.as_deref(),
            )?,
            vitamin_b1_mg: parse_optional_number(
                row,
                "vitaminB1_mg",
                self.vitamin_b1_mg.as_deref(),
            )?,
            vitamin_b2_mg: parse_optional_number(
                row,
                "vitaminB2_mg",
                self.vitamin_b2_mg.as_deref(),
            )?,
            vitamin_c_mg: parse_optional_number(row, "vitaminC_mg", self.vitamin_c_mg.as_deref())?,
        };

        Ok(Dish {
            id: self.dish_id,
            name: self.name,
            portion: self.portion.unwrap_or_default(),
            energy_kcal,
            synonyms: self.synonyms.as_deref().map(split_synonyms).unwrap_or_default(),
            price_yen,
            url: non_empty(self.url),
            nutrients,
        })
    }
}

/// 解析 CSV 位元組成菜單；錯誤的 `row` 是檔案中的行號（標題為第 1 行）
pub fn parse_menu_csv(data: &[u8]) -> Result<Catalog> {
    let data = data.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(data);
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(data);

    let headers: StringRecord = reader.headers()?.iter().map(normalize_header).collect();
    for required in ["dish_id", "name"] {
        if !headers.iter().any(|h| h == required) {
            return Err(MenuError::DataError {
                row: 1,
                message: format!("missing required column '{}'", required),
            });
        }
    }
    if !headers
        .iter()
        .any(|h| h == "calories_kcal" || h == "energy_kcal")
    {
        return Err(MenuError::DataError {
            row: 1,
            message: "missing required column 'calories_kcal'".to_string(),
        });
    }
    reader.set_headers(headers.clone());

    let mut dishes = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 2);
        let menu_row: MenuRow =
            record
                .deserialize(Some(&headers))
                .map_err(|e| MenuError::DataError {
                    row,
                    message: e.to_string(),
                })?;
        dishes.push((row, menu_row.into_dish(row)?));
    }

    tracing::debug!("Parsed {} menu rows", dishes.len());
    Catalog::from_rows(dishes)
}

/// 透過 [`Storage`] 讀取 CSV 的菜單來源
pub struct CsvCatalogSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> CsvCatalogSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }
}

#[async_trait]
impl<S: Storage> CatalogSource for CsvCatalogSource<S> {
    async fn load(&self) -> Result<Catalog> {
        tracing::debug!("Reading menu CSV from: {}", self.path);
        let data = self.storage.read_file(&self.path).await?;
        parse_menu_csv(&data)
    }
}
