use crate::core::alias::AliasIndex;
use crate::core::catalog::Catalog;
use crate::core::resolver::resolve;
use crate::core::{Aggregation, BreakdownEntry, Nutrients, OrderLine};
use crate::utils::error::{MenuError, Result};

/// 取到小數一位
///
/// 以二進位的實際值做十進位捨入，剛好一半時取偶數（40.25 → 40.2）。
pub fn round_one_decimal(value: f64) -> f64 {
    format!("{:.1}", value).parse().unwrap_or(value)
}

pub fn kcal_by_name(query: &str, catalog: &Catalog, index: &AliasIndex) -> Option<f64> {
    resolve(query, index)
        .and_then(|id| catalog.get(id))
        .map(|dish| dish.energy_kcal)
}

/// 合計訂單熱量與營養素
///
/// 找不到的品項不算錯誤：不計入合計與明細，只記在 `unresolved`。
pub fn aggregate(lines: &[OrderLine], catalog: &Catalog, index: &AliasIndex) -> Aggregation {
    let mut total = 0.0;
    let mut breakdown = Vec::with_capacity(lines.len());
    let mut nutrients = Nutrients::default();
    let mut unresolved = Vec::new();

    for line in lines {
        let Some(dish) = resolve(&line.query, index).and_then(|id| catalog.get(id)) else {
            tracing::debug!("Skipping unresolved order line '{}'", line.query);
            unresolved.push(line.query.clone());
            continue;
        };

        let quantity = f64::from(line.quantity);
        total += dish.energy_kcal * quantity;
        nutrients.add_inplace(&dish.nutrients.scaled(quantity));
        breakdown.push(BreakdownEntry {
            name: dish.name.clone(),
            energy_kcal: dish.energy_kcal,
            quantity: line.quantity,
        });
    }

    Aggregation {
        total_kcal: round_one_decimal(total),
        breakdown,
        nutrients,
        unresolved,
    }
}

/// 與 [`aggregate`] 相同，但有任何品項找不到就回傳錯誤
pub fn aggregate_strict(
    lines: &[OrderLine],
    catalog: &Catalog,
    index: &AliasIndex,
) -> Result<Aggregation> {
    let aggregation = aggregate(lines, catalog, index);
    if aggregation.unresolved.is_empty() {
        Ok(aggregation)
    } else {
        Err(MenuError::UnresolvedOrderLines {
            queries: aggregation.unresolved,
        })
    }
}

/// 把多道菜的營養素直接加總（每道一份）
pub fn sum_nutrients<'a, I>(dishes: I) -> Nutrients
where
    I: IntoIterator<Item = &'a crate::core::Dish>,
{
    let mut total = Nutrients::default();
    for dish in dishes {
        total.add_inplace(&dish.nutrients);
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::alias::AliasPolicy;
    use crate::core::Dish;

    fn setup() -> (Catalog, AliasIndex) {
        let catalog = Catalog::from_dishes(vec![
            Dish::new("a", "Curry", 650.0).with_nutrients(Nutrients {
                protein_g: Some(15.0),
                salt_g: Some(3.0),
                ..Nutrients::default()
            }),
            Dish::new("b", "Miso Soup", 40.5).with_synonyms(["miso"]),
        ])
        .unwrap();
        let index = AliasIndex::build(&catalog, AliasPolicy::LastWriteWins).unwrap();
        (catalog, index)
    }

    #[test]
    fn test_unresolved_line_is_skipped() {
        let (catalog, index) = setup();
        let lines = vec![OrderLine::new("Curry", 2), OrderLine::new("Salad", 1)];

        let result = aggregate(&lines, &catalog, &index);

        assert_eq!(result.total_kcal, 1300.0);
        assert_eq!(
            result.breakdown,
            vec![BreakdownEntry {
                name: "Curry".to_string(),
                energy_kcal: 650.0,
                quantity: 2,
            }]
        );
        assert_eq!(result.unresolved, vec!["Salad".to_string()]);
    }

    #[test]
    fn test_breakdown_uses_canonical_name_and_input_order() {
        let (catalog, index) = setup();
        let lines = vec![
            OrderLine::new("miso", 3),
            OrderLine::new("nothing", 1),
            OrderLine::new("curry", 1),
        ];

        let result = aggregate(&lines, &catalog, &index);

        let names: Vec<&str> = result.breakdown.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Miso Soup", "Curry"]);
        assert_eq!(result.total_kcal, 771.5);
    }

    #[test]
    fn test_total_is_rounded_to_one_decimal() {
        let catalog = Catalog::from_dishes(vec![Dish::new("a", "Tea", 0.333)]).unwrap();
        let index = AliasIndex::build(&catalog, AliasPolicy::default()).unwrap();

        let result = aggregate(&[OrderLine::new("Tea", 7)], &catalog, &index);

        assert_eq!(result.total_kcal, 2.3);
    }

    #[test]
    fn test_round_one_decimal_ties_go_to_even() {
        assert_eq!(round_one_decimal(40.25), 40.2);
        assert_eq!(round_one_decimal(40.35), 40.4);
        assert_eq!(round_one_decimal(0.15), 0.1);
        assert_eq!(round_one_decimal(1300.0), 1300.0);
        assert_eq!(round_one_decimal(-2.25), -2.2);
    }

    #[test]
    fn test_nutrient_totals_scale_and_keep_absence() {
        let (catalog, index) = setup();
        let lines = vec![OrderLine::new("Curry", 2), OrderLine::new("miso", 1)];

        let result = aggregate(&lines, &catalog, &index);

        assert_eq!(result.nutrients.energy_kcal, Some(1340.5));
        assert_eq!(result.nutrients.protein_g, Some(30.0));
        assert_eq!(result.nutrients.salt_g, Some(6.0));
        assert_eq!(result.nutrients.fat_g, None);
    }

    #[test]
    fn test_empty_order_is_zero_with_absent_nutrients() {
        let (catalog, index) = setup();
        let result = aggregate(&[], &catalog, &index);
        assert_eq!(result.total_kcal, 0.0);
        assert!(result.breakdown.is_empty());
        assert!(result.nutrients.is_empty());
    }

    #[test]
    fn test_strict_reports_all_unresolved_queries() {
        let (catalog, index) = setup();
        let lines = vec![
            OrderLine::new("Salad", 1),
            OrderLine::new("Curry", 1),
            OrderLine::new("Sushi", 2),
        ];

        match aggregate_strict(&lines, &catalog, &index) {
            Err(MenuError::UnresolvedOrderLines { queries }) => {
                assert_eq!(queries, vec!["Salad".to_string(), "Sushi".to_string()]);
            }
            other => panic!("expected UnresolvedOrderLines, got {:?}", other),
        }
    }

    #[test]
    fn test_strict_passes_when_everything_resolves() {
        let (catalog, index) = setup();
        let result = aggregate_strict(&[OrderLine::new("Curry", 1)], &catalog, &index).unwrap();
        assert_eq!(result.total_kcal, 650.0);
    }

    #[test]
    fn test_kcal_by_name() {
        let (catalog, index) = setup();
        assert_eq!(kcal_by_name("MISO", &catalog, &index), Some(40.5));
        assert_eq!(kcal_by_name("Salad", &catalog, &index), None);
    }

    #[test]
    fn test_sum_nutrients_over_dishes() {
        let (catalog, _) = setup();
        let total = sum_nutrients(catalog.iter());
        assert_eq!(total.energy_kcal, Some(690.5));
        assert_eq!(total.protein_g, Some(15.0));
        assert_eq!(total.iron_mg, None);
    }
}
