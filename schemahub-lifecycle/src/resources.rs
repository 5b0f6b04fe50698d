use std::sync::Arc;

use schemahub_core::catalog::{CatalogCondition, CatalogError, CatalogStore};

use crate::errors::Result;
use crate::metadata::{SchemaCatalogEntry, SchemaVersionRecord};

/// Sort key of the catalog entry item within a schema's partition.
pub(crate) const ENTRY_SORT_KEY: &str = "entry";

/// Sort-key prefix shared by all version rows of a schema.
pub(crate) const VERSION_KEY_PREFIX: &str = "version/";

pub(crate) fn version_sort_key(version: u32) -> String {
    format!("{}{}", VERSION_KEY_PREFIX, version)
}

/// Typed access to the catalog item layout.
///
/// One schema name is one entity partition: an `entry` item plus one
/// `version/{n}` item per version row. Everything crosses the store boundary
/// as `serde_json::Value`.
#[derive(Clone)]
pub struct CatalogResources {
    store: Arc<dyn CatalogStore>,
}

impl CatalogResources {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        CatalogResources { store }
    }

    pub(crate) async fn get_entry(&self, name: &str) -> Result<Option<SchemaCatalogEntry>> {
        match self.store.get(name, ENTRY_SORT_KEY).await? {
            Some(item) => {
                let entry = serde_json::from_value(item).map_err(CatalogError::from)?;
                Ok(Some(entry))
            }
            None => Ok(None),
        }
    }

    /// Store a brand-new entry; fails if one already exists for the name.
    pub(crate) async fn create_entry(&self, entry: &SchemaCatalogEntry) -> Result<()> {
        let item = serde_json::to_value(entry).map_err(CatalogError::from)?;
        self.store
            .put(
                &entry.schema_name,
                ENTRY_SORT_KEY,
                item,
                CatalogCondition::MustNotExist,
            )
            .await?;
        Ok(())
    }

    /// Rewrite an existing entry's fields; fails if the entry is gone.
    pub(crate) async fn update_entry(&self, entry: &SchemaCatalogEntry) -> Result<()> {
        let fields = serde_json::to_value(entry).map_err(CatalogError::from)?;
        self.store
            .update(
                &entry.schema_name,
                ENTRY_SORT_KEY,
                fields,
                CatalogCondition::MustExist,
            )
            .await?;
        Ok(())
    }

    pub(crate) async fn delete_entry(&self, name: &str) -> Result<()> {
        self.store.delete(name, ENTRY_SORT_KEY).await?;
        Ok(())
    }

    pub(crate) async fn get_version(
        &self,
        name: &str,
        version: u32,
    ) -> Result<Option<SchemaVersionRecord>> {
        match self.store.get(name, &version_sort_key(version)).await? {
            Some(item) => {
                let record = serde_json::from_value(item).map_err(CatalogError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Write a version row, overwriting any existing row of the same number.
    pub(crate) async fn put_version(&self, name: &str, record: &SchemaVersionRecord) -> Result<()> {
        let item = serde_json::to_value(record).map_err(CatalogError::from)?;
        self.store
            .put(
                name,
                &version_sort_key(record.version),
                item,
                CatalogCondition::None,
            )
            .await?;
        Ok(())
    }

    /// All version rows of a schema, ascending by version number. Sort keys
    /// order lexicographically, so the numeric order is restored here.
    pub(crate) async fn list_version_rows(&self, name: &str) -> Result<Vec<SchemaVersionRecord>> {
        let items = self.store.query_prefix(name, VERSION_KEY_PREFIX, true).await?;

        let mut rows = Vec::with_capacity(items.len());
        for item in items {
            let record: SchemaVersionRecord =
                serde_json::from_value(item.item).map_err(CatalogError::from)?;
            rows.push(record);
        }

        rows.sort_unstable_by_key(|row| row.version);
        Ok(rows)
    }

    pub(crate) async fn delete_version(&self, name: &str, version: u32) -> Result<()> {
        self.store.delete(name, &version_sort_key(version)).await?;
        Ok(())
    }
}
