pub mod aggregator;
pub mod alias;
pub mod body_metrics;
pub mod catalog;
pub mod engine;
pub mod resolver;

pub use crate::domain::model::{Aggregation, BreakdownEntry, Dish, OrderLine};
pub use crate::domain::nutrients::{NutrientField, Nutrients};
pub use crate::domain::ports::{CatalogSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
