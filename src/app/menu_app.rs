use crate::adapters::menu_csv::CsvCatalogSource;
use crate::app::format::{dish_line, dish_macro_line, fmt_num, fmt_price, nutrient_lines};
use crate::config::Command;
use crate::core::aggregator::sum_nutrients;
use crate::core::body_metrics::{calculate_bmi, classify_bmi, compute_macro_targets};
use crate::core::engine::MenuEngine;
use crate::core::{Aggregation, ConfigProvider, OrderLine, Storage};
use crate::domain::person::Person;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;

/// 命令列各子命令的實作；回傳要印到 stdout 的文字
pub struct MenuApp<S: Storage + Clone, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage + Clone, C: ConfigProvider> MenuApp<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    pub async fn load_engine(&self) -> Result<MenuEngine> {
        let menu_path = self.config.menu_path();
        let path = validate_required_field("menu.csv_path", &menu_path)?;
        let source = CsvCatalogSource::new(self.storage.clone(), *path);
        MenuEngine::from_source(&source, self.config.alias_policy()).await
    }

    pub async fn run(&self, command: &Command) -> Result<String> {
        match command {
            Command::Profile {
                age,
                sex,
                height,
                weight,
                activity,
            } => {
                // 不需要菜單
                let person = Person {
                    age_years: *age,
                    sex: *sex,
                    height_cm: *height,
                    weight_kg: *weight,
                    activity_level: *activity,
                };
                self.profile(&person)
            }
            Command::Stats => Ok(stats(&self.load_engine().await?)),
            Command::Search { keyword, limit } => {
                Ok(search(&self.load_engine().await?, keyword, *limit))
            }
            Command::Show { query } => Ok(show(&self.load_engine().await?, query)),
            Command::Kcal { query } => {
                let engine = self.load_engine().await?;
                Ok(match engine.kcal_by_name(query) {
                    Some(kcal) => format!("{} kcal", fmt_num(Some(kcal))),
                    None => "No matching dish".to_string(),
                })
            }
            Command::Order {
                lines,
                strict,
                json,
                output,
            } => {
                let engine = self.load_engine().await?;
                self.order(&engine, lines, *strict, *json, output.as_deref())
                    .await
            }
            Command::Sum { keyword } => Ok(sum(&self.load_engine().await?, keyword)),
            Command::Topkcal { n } => Ok(top_kcal(&self.load_engine().await?, *n)),
        }
    }

    async fn order(
        &self,
        engine: &MenuEngine,
        lines: &[String],
        strict: bool,
        json: bool,
        output: Option<&str>,
    ) -> Result<String> {
        let order_lines = lines
            .iter()
            .map(|line| OrderLine::parse(line))
            .collect::<Result<Vec<_>>>()?;

        let aggregation = if strict || self.config.strict_orders() {
            engine.aggregate_strict(&order_lines)?
        } else {
            engine.aggregate(&order_lines)
        };

        if !aggregation.unresolved.is_empty() {
            tracing::warn!(
                "⚠️ {} order line(s) matched no dish: {}",
                aggregation.unresolved.len(),
                aggregation.unresolved.join(", ")
            );
        }

        let mut text = if json {
            serde_json::to_string_pretty(&aggregation)?
        } else {
            order_report(&aggregation)
        };

        if let Some(path) = output {
            let report = serde_json::to_vec_pretty(&aggregation)?;
            self.storage.write_file(path, &report).await?;
            tracing::info!("📁 Order report saved to: {}", path);
            text.push_str(&format!("\nSaved report to {}", path));
        }

        Ok(text)
    }

    fn profile(&self, person: &Person) -> Result<String> {
        let bmi = calculate_bmi(person.weight_kg, person.height_cm)?;
        let targets = compute_macro_targets(person, &self.config.macro_settings());

        Ok([
            format!("BMI: {:.1} ({})", bmi, classify_bmi(bmi).label()),
            format!("TDEE: {:.0} kcal/day", targets.energy_kcal),
            format!("Protein: {:.1} g", targets.protein_g),
            format!("Fat: {:.1} g", targets.fat_g),
            format!("Carbs: {:.1} g", targets.carbs_g),
        ]
        .join("\n"))
    }
}

fn stats(engine: &MenuEngine) -> String {
    let catalog = engine.catalog();
    let mut lines = vec![format!("Dishes: {}", catalog.len())];
    lines.extend(catalog.iter().take(5).map(dish_line));
    lines.join("\n")
}

fn search(engine: &MenuEngine, keyword: &str, limit: usize) -> String {
    let results = engine.catalog().filter_by_keyword(keyword);
    if results.is_empty() {
        return "No matching dish".to_string();
    }
    let mut lines = vec![format!(
        "Hits: {} (showing up to {})",
        results.len(),
        limit
    )];
    lines.extend(results.into_iter().take(limit).map(dish_macro_line));
    lines.join("\n")
}

fn show(engine: &MenuEngine, query: &str) -> String {
    let Some(dish) = engine.dish(query) else {
        return "No matching dish. Try `search` to find candidates.".to_string();
    };
    let mut lines = vec![
        format!("[{}]", dish.name),
        format!(
            "Portion: {}",
            if dish.portion.is_empty() { "-" } else { dish.portion.as_str() }
        ),
        format!("Price: {}", fmt_price(dish.price_yen)),
        format!("URL  : {}", dish.url.as_deref().unwrap_or("-")),
        "Nutrients:".to_string(),
    ];
    lines.extend(nutrient_lines(&dish.nutrients));
    lines.join("\n")
}

fn order_report(aggregation: &Aggregation) -> String {
    let mut lines = vec![format!("Total: {} kcal", fmt_num(Some(aggregation.total_kcal)))];
    for entry in &aggregation.breakdown {
        lines.push(format!(
            "- {} x{} ({} kcal each)",
            entry.name,
            entry.quantity,
            fmt_num(Some(entry.energy_kcal))
        ));
    }
    if !aggregation.unresolved.is_empty() {
        lines.push(format!("Skipped: {}", aggregation.unresolved.join(", ")));
    }
    lines.push("Nutrient totals:".to_string());
    lines.extend(nutrient_lines(&aggregation.nutrients));
    lines.join("\n")
}

fn sum(engine: &MenuEngine, keyword: &str) -> String {
    let targets = engine.catalog().filter_by_keyword(keyword);
    if targets.is_empty() {
        return "No matching dish".to_string();
    }
    let total = sum_nutrients(targets.iter().copied());
    let mut lines = vec![format!("Dishes: {}", targets.len()), "Totals:".to_string()];
    lines.extend(nutrient_lines(&total));
    lines.join("\n")
}

fn top_kcal(engine: &MenuEngine, n: usize) -> String {
    let mut lines = vec![format!("Top {} by kcal", n)];
    lines.extend(engine.catalog().top_by_energy(n).into_iter().map(dish_line));
    lines.join("\n")
}
