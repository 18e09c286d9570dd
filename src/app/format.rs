use crate::core::{Dish, NutrientField, Nutrients};

/// 整數值不顯示小數點，缺值顯示 `-`
pub fn fmt_num(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{}", v),
    }
}

pub fn fmt_price(yen: Option<i64>) -> String {
    match yen {
        Some(yen) => format!("¥{}", yen),
        None => "-".to_string(),
    }
}

pub fn dish_line(dish: &Dish) -> String {
    format!(
        "- {} | {} | kcal={}",
        dish.name,
        fmt_price(dish.price_yen),
        fmt_num(Some(dish.energy_kcal))
    )
}

pub fn dish_macro_line(dish: &Dish) -> String {
    let n = &dish.nutrients;
    format!(
        "- {} | {} | kcal={} P={}g F={}g C={}g",
        dish.name,
        fmt_price(dish.price_yen),
        fmt_num(Some(dish.energy_kcal)),
        fmt_num(n.protein_g),
        fmt_num(n.fat_g),
        fmt_num(n.carbs_g)
    )
}

pub fn nutrient_lines(nutrients: &Nutrients) -> Vec<String> {
    NutrientField::ALL
        .iter()
        .map(|field| format!("  - {}: {}", field, fmt_num(nutrients.get(*field))))
        .collect()
}
