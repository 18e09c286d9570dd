use crate::core::alias::AliasPolicy;
use crate::core::body_metrics::MacroSettings;
use crate::core::catalog::Catalog;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn menu_path(&self) -> Option<&str>;
    fn alias_policy(&self) -> AliasPolicy;
    fn strict_orders(&self) -> bool;
    fn macro_settings(&self) -> MacroSettings;
}

/// 菜單資料來源；載入一次，之後只讀
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog>;
}
