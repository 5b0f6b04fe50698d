use async_trait::async_trait;
use serde_json::Value;

use super::errors::Result;

/// A sort-key/item pair returned by prefix queries.
#[derive(Debug, Clone)]
pub struct CatalogItem {
    pub sort_key: String,
    pub item: Value,
}

/// Backend-agnostic write conditions for catalog operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogCondition {
    None,
    /// Fail the write if an item already exists at the key.
    MustNotExist,
    /// Fail the write unless an item already exists at the key.
    MustExist,
}

/// A keyed metadata store addressed by (entity key, sort key).
///
/// Conditions apply to the single addressed item only; the store offers no
/// multi-item or cross-entity atomicity.
#[async_trait]
pub trait CatalogStore: Send + Sync + 'static {
    async fn get(&self, entity: &str, sort_key: &str) -> Result<Option<Value>>;

    /// All items of `entity` whose sort key starts with `sort_prefix`,
    /// ordered by sort key. `scan_forward = false` reverses the order.
    async fn query_prefix(
        &self,
        entity: &str,
        sort_prefix: &str,
        scan_forward: bool,
    ) -> Result<Vec<CatalogItem>>;

    async fn put(
        &self,
        entity: &str,
        sort_key: &str,
        item: Value,
        condition: CatalogCondition,
    ) -> Result<()>;

    /// Merge the top-level members of `fields` into the stored item.
    async fn update(
        &self,
        entity: &str,
        sort_key: &str,
        fields: Value,
        condition: CatalogCondition,
    ) -> Result<()>;

    async fn delete(&self, entity: &str, sort_key: &str) -> Result<()>;
}
