use crate::core::aggregator;
use crate::core::alias::{AliasIndex, AliasPolicy};
use crate::core::catalog::Catalog;
use crate::core::resolver;
use crate::core::{Aggregation, CatalogSource, Dish, OrderLine};
use crate::utils::error::Result;

/// 菜單與名稱索引只建一次，之後所有查詢共用
#[derive(Debug, Clone)]
pub struct MenuEngine {
    catalog: Catalog,
    index: AliasIndex,
}

impl MenuEngine {
    pub fn new(catalog: Catalog, policy: AliasPolicy) -> Result<Self> {
        let index = AliasIndex::build(&catalog, policy)?;
        Ok(Self { catalog, index })
    }

    pub async fn from_source<S: CatalogSource>(source: &S, policy: AliasPolicy) -> Result<Self> {
        let catalog = source.load().await?;
        tracing::info!("Loaded {} dishes", catalog.len());
        Self::new(catalog, policy)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn alias_index(&self) -> &AliasIndex {
        &self.index
    }

    pub fn resolve(&self, query: &str) -> Option<&str> {
        resolver::resolve(query, &self.index)
    }

    pub fn dish(&self, query: &str) -> Option<&Dish> {
        self.resolve(query).and_then(|id| self.catalog.get(id))
    }

    pub fn kcal_by_name(&self, query: &str) -> Option<f64> {
        aggregator::kcal_by_name(query, &self.catalog, &self.index)
    }

    pub fn aggregate(&self, lines: &[OrderLine]) -> Aggregation {
        aggregator::aggregate(lines, &self.catalog, &self.index)
    }

    pub fn aggregate_strict(&self, lines: &[OrderLine]) -> Result<Aggregation> {
        aggregator::aggregate_strict(lines, &self.catalog, &self.index)
    }
}
