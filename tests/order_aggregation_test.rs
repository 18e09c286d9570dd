use campus_menu::{
    aggregate, aggregate_strict, kcal_by_name, parse_menu_csv, resolve, AliasIndex, AliasPolicy,
    BreakdownEntry, Catalog, Dish, MenuEngine, MenuError, Nutrients, OrderLine,
};

fn curry_catalog() -> Catalog {
    Catalog::from_dishes(vec![Dish::new("a", "Curry", 650.0)]).unwrap()
}

#[test]
fn test_unresolved_line_contributes_nothing() {
    let catalog = curry_catalog();
    let index = AliasIndex::build(&catalog, AliasPolicy::LastWriteWins).unwrap();
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
}

#[test]
fn test_strict_mode_surfaces_unresolved_lines() {
    let catalog = curry_catalog();
    let index = AliasIndex::build(&catalog, AliasPolicy::LastWriteWins).unwrap();
    let lines = vec![OrderLine::new("Curry", 2), OrderLine::new("Salad", 1)];

    match aggregate_strict(&lines, &catalog, &index) {
        Err(MenuError::UnresolvedOrderLines { queries }) => {
            assert_eq!(queries, vec!["Salad".to_string()]);
        }
        other => panic!("expected UnresolvedOrderLines, got {:?}", other),
    }
}

#[test]
fn test_exact_match_takes_precedence_over_substring() {
    // "Curry Udon" 先插入，"curry" 是它的子字串；但 "Curry" 完全相等
    let catalog = Catalog::from_dishes(vec![
        Dish::new("udon", "Curry Udon", 480.0),
        Dish::new("rice", "Curry", 650.0),
    ])
    .unwrap();
    let index = AliasIndex::build(&catalog, AliasPolicy::default()).unwrap();

    assert_eq!(resolve(" CURRY ", &index), Some("rice"));
    assert_eq!(resolve("udo", &index), Some("udon"));
    assert_eq!(resolve("cur", &index), Some("udon"));
    assert_eq!(resolve("soba", &index), None);
    assert_eq!(kcal_by_name("curry", &catalog, &index), Some(650.0));
    assert_eq!(kcal_by_name("soba", &catalog, &index), None);
}

#[test]
fn test_total_rounds_to_one_decimal() {
    let catalog = Catalog::from_dishes(vec![
        Dish::new("tea", "Green Tea", 1.15),
        Dish::new("jelly", "Jelly", 33.333),
    ])
    .unwrap();
    let engine = MenuEngine::new(catalog, AliasPolicy::default()).unwrap();

    let result = engine.aggregate(&[OrderLine::new("tea", 3), OrderLine::new("jelly", 1)]);

    // 3.45 + 33.333 = 36.783
    assert_eq!(result.total_kcal, 36.8);
}

#[test]
fn test_quarter_kcal_totals_round_half_to_even() {
    let catalog = Catalog::from_dishes(vec![
        Dish::new("a", "Tea", 40.25),
        Dish::new("b", "Jam", 0.15),
    ])
    .unwrap();
    let engine = MenuEngine::new(catalog, AliasPolicy::default()).unwrap();

    assert_eq!(engine.aggregate(&[OrderLine::new("Tea", 1)]).total_kcal, 40.2);
    assert_eq!(engine.aggregate(&[OrderLine::new("Jam", 1)]).total_kcal, 0.1);
}

#[test]
fn test_nutrient_totals_from_csv_menu() {
    let csv = "dish_id,name,calories_kcal,synonyms,protein_g,salt_g,vitaminC_mg\n\
               d1,カレーライス,650,カレー,15,3.0,\n\
               d2,サラダ,80,,2,0.5,20\n";
    let catalog = parse_menu_csv(csv.as_bytes()).unwrap();
    let engine = MenuEngine::new(catalog, AliasPolicy::default()).unwrap();

    let result = engine.aggregate(&[
        OrderLine::new("カレー", 2),
        OrderLine::new("サラダ", 1),
        OrderLine::new("プリン", 1),
    ]);

    assert_eq!(result.total_kcal, 1380.0);
    assert_eq!(result.nutrients.energy_kcal, Some(1380.0));
    assert_eq!(result.nutrients.protein_g, Some(32.0));
    assert_eq!(result.nutrients.salt_g, Some(6.5));
    assert_eq!(result.nutrients.vitamin_c_mg, Some(20.0));
    assert_eq!(result.nutrients.iron_mg, None);
    assert_eq!(result.unresolved, vec!["プリン".to_string()]);
}

#[test]
fn test_merge_laws() {
    let mut acc = Nutrients::default();
    acc.add_inplace(&Nutrients {
        protein_g: Some(10.0),
        ..Nutrients::default()
    });
    assert_eq!(acc.protein_g, Some(10.0));
    assert_eq!(acc.energy_kcal, None);
    assert_eq!(acc.fat_g, None);

    let mut energy = Nutrients::default();
    energy.add_inplace(&Nutrients::with_energy(100.0));
    energy.add_inplace(&Nutrients::with_energy(50.0));
    assert_eq!(energy.energy_kcal, Some(150.0));
}

#[test]
fn test_index_is_reused_across_calls() {
    let catalog = curry_catalog();
    let engine = MenuEngine::new(catalog, AliasPolicy::default()).unwrap();
    let before = engine.alias_index().len();

    for _ in 0..3 {
        engine.aggregate(&[OrderLine::new("Curry", 1)]);
        engine.resolve("curry");
    }

    assert_eq!(engine.alias_index().len(), before);
}
