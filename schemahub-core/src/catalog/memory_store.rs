use super::{
    errors::Result,
    store::{CatalogCondition, CatalogItem, CatalogStore},
    CatalogError,
};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// MemoryCatalog is a simple in-memory catalog store that implements the CatalogStore trait.
/// SHOULD BE USED ONLY FOR TESTING PURPOSES
///
/// Items are held per entity in a BTreeMap so prefix queries come back in
/// sort-key order, matching the contract of real backends.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    inner: Arc<DashMap<String, BTreeMap<String, Value>>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        MemoryCatalog {
            inner: Arc::new(DashMap::new()),
        }
    }

    fn check_condition(
        exists: bool,
        condition: CatalogCondition,
        entity: &str,
        sort_key: &str,
    ) -> Result<()> {
        match condition {
            CatalogCondition::MustNotExist if exists => Err(CatalogError::ConditionFailed(
                format!("{}/{}", entity, sort_key),
            )),
            CatalogCondition::MustExist if !exists => Err(CatalogError::ConditionFailed(format!(
                "{}/{}",
                entity, sort_key
            ))),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn get(&self, entity: &str, sort_key: &str) -> Result<Option<Value>> {
        match self.inner.get(entity) {
            Some(items) => Ok(items.get(sort_key).cloned()),
            None => Ok(None),
        }
    }

    async fn query_prefix(
        &self,
        entity: &str,
        sort_prefix: &str,
        scan_forward: bool,
    ) -> Result<Vec<CatalogItem>> {
        let mut out = Vec::new();
        if let Some(items) = self.inner.get(entity) {
            for (key, value) in items.iter() {
                if key.starts_with(sort_prefix) {
                    out.push(CatalogItem {
                        sort_key: key.clone(),
                        item: value.clone(),
                    });
                }
            }
        }
        if !scan_forward {
            out.reverse();
        }
        Ok(out)
    }

    async fn put(
        &self,
        entity: &str,
        sort_key: &str,
        item: Value,
        condition: CatalogCondition,
    ) -> Result<()> {
        if sort_key.is_empty() {
            return Err(CatalogError::InvalidArguments(
                "sort key must not be empty".to_string(),
            ));
        }

        let mut items = self.inner.entry(entity.to_string()).or_default();
        let exists = items.contains_key(sort_key);
        Self::check_condition(exists, condition, entity, sort_key)?;

        items.insert(sort_key.to_string(), item);
        Ok(())
    }

    async fn update(
        &self,
        entity: &str,
        sort_key: &str,
        fields: Value,
        condition: CatalogCondition,
    ) -> Result<()> {
        let patch = match fields.as_object() {
            Some(map) => map.clone(),
            None => {
                return Err(CatalogError::InvalidArguments(
                    "update fields must be a JSON object".to_string(),
                ))
            }
        };

        let mut items = self.inner.entry(entity.to_string()).or_default();
        let exists = items.contains_key(sort_key);
        Self::check_condition(exists, condition, entity, sort_key)?;

        match items.get_mut(sort_key) {
            Some(existing) => {
                let target = existing.as_object_mut().ok_or_else(|| {
                    CatalogError::InvalidArguments(format!(
                        "stored item is not an object: {}/{}",
                        entity, sort_key
                    ))
                })?;
                for (field, value) in patch {
                    target.insert(field, value);
                }
            }
            None => {
                items.insert(sort_key.to_string(), Value::Object(patch));
            }
        }
        Ok(())
    }

    async fn delete(&self, entity: &str, sort_key: &str) -> Result<()> {
        if let Some(mut items) = self.inner.get_mut(entity) {
            items.remove(sort_key);
        }
        Ok(())
    }
}
