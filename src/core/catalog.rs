use crate::core::Dish;
use crate::utils::error::{MenuError, Result};
use indexmap::IndexMap;

/// 依載入順序保存的菜單，建立後唯讀
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    dishes: IndexMap<String, Dish>,
}

impl Catalog {
    /// 依序建立菜單；錯誤中的 `row` 是 1 起算的品項序號
    pub fn from_dishes<I>(dishes: I) -> Result<Self>
    where
        I: IntoIterator<Item = Dish>,
    {
        Self::from_rows(dishes.into_iter().enumerate().map(|(i, dish)| (i + 1, dish)))
    }

    /// 帶著來源行號建立菜單；空字串或重複的 id、負熱量都會失敗
    pub fn from_rows<I>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, Dish)>,
    {
        let mut map = IndexMap::new();

        for (row, dish) in rows {
            if dish.id.is_empty() {
                return Err(MenuError::DataError {
                    row,
                    message: "dish_id cannot be empty".to_string(),
                });
            }
            if !dish.energy_kcal.is_finite() || dish.energy_kcal < 0.0 {
                return Err(MenuError::DataError {
                    row,
                    message: format!(
                        "calories_kcal must be a non-negative number, got {}",
                        dish.energy_kcal
                    ),
                });
            }
            if map.contains_key(&dish.id) {
                return Err(MenuError::DataError {
                    row,
                    message: format!("duplicate dish_id '{}'", dish.id),
                });
            }
            map.insert(dish.id.clone(), dish);
        }

        Ok(Self { dishes: map })
    }

    pub fn get(&self, id: &str) -> Option<&Dish> {
        self.dishes.get(id)
    }

    pub fn len(&self) -> usize {
        self.dishes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dishes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dish> {
        self.dishes.values()
    }

    /// 正式名稱包含關鍵字的品項（區分大小寫，依載入順序）
    pub fn filter_by_keyword(&self, keyword: &str) -> Vec<&Dish> {
        self.dishes
            .values()
            .filter(|dish| dish.name.contains(keyword))
            .collect()
    }

    /// 熱量由高到低，同分維持載入順序
    pub fn top_by_energy(&self, n: usize) -> Vec<&Dish> {
        let mut dishes: Vec<&Dish> = self.dishes.values().collect();
        dishes.sort_by(|a, b| b.energy_kcal.total_cmp(&a.energy_kcal));
        dishes.truncate(n);
        dishes
    }
}
