pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use app::MenuApp;
#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{menu_csv::parse_menu_csv, menu_csv::CsvCatalogSource, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::aggregator::{aggregate, aggregate_strict, kcal_by_name};
pub use core::alias::{AliasIndex, AliasPolicy};
pub use core::catalog::Catalog;
pub use core::engine::MenuEngine;
pub use core::resolver::resolve;
pub use core::{Aggregation, BreakdownEntry, Dish, NutrientField, Nutrients, OrderLine};
pub use utils::error::{MenuError, Result};
