use super::{
    client::{RegistryUpdate, RegistryVersion, SchemaRegistryClient},
    errors::Result,
    RegistryError,
};

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StoredSchema {
    content: Value,
    version_id: u64,
    arn: String,
    last_modified: u64,
}

/// MemoryRegistry is a simple in-memory schema registry that implements the
/// SchemaRegistryClient trait.
/// SHOULD BE USED ONLY FOR TESTING PURPOSES
///
/// The per-schema version id starts at 1 and advances on every accepted
/// update, mirroring the counter a real registry assigns.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    inner: Arc<DashMap<String, StoredSchema>>,
    conflict_next_update: Arc<AtomicBool>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        MemoryRegistry {
            inner: Arc::new(DashMap::new()),
            conflict_next_update: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Make the next update report a concurrent-write conflict instead of
    /// applying. One-shot; the flag clears when it fires.
    pub fn inject_update_conflict(&self) {
        self.conflict_next_update.store(true, Ordering::SeqCst);
    }

    /// Number of schemas currently held.
    pub fn schema_count(&self) -> usize {
        self.inner.len()
    }

    fn validate_content(name: &str, content: &Value) -> Result<()> {
        if !content.is_object() {
            return Err(RegistryError::Validation(format!(
                "schema content for '{}' must be a JSON object",
                name
            )));
        }
        Ok(())
    }

    fn now_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64
    }
}

#[async_trait]
impl SchemaRegistryClient for MemoryRegistry {
    async fn create_schema(&self, name: &str, content: &Value) -> Result<RegistryVersion> {
        Self::validate_content(name, content)?;

        if self.inner.contains_key(name) {
            return Err(RegistryError::AlreadyExists(name.to_string()));
        }

        let stored = StoredSchema {
            content: content.clone(),
            version_id: 1,
            arn: format!("registry:schemas/{}", name),
            last_modified: Self::now_millis(),
        };
        let version = RegistryVersion {
            version_id: stored.version_id.to_string(),
            arn: stored.arn.clone(),
            timestamp: stored.last_modified,
        };
        self.inner.insert(name.to_string(), stored);
        Ok(version)
    }

    async fn update_schema(&self, name: &str, content: &Value) -> Result<RegistryUpdate> {
        Self::validate_content(name, content)?;

        let mut stored = self
            .inner
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

        if self.conflict_next_update.swap(false, Ordering::SeqCst) {
            return Ok(RegistryUpdate::Conflict);
        }

        stored.content = content.clone();
        stored.version_id += 1;
        stored.last_modified = Self::now_millis();

        Ok(RegistryUpdate::Applied(RegistryVersion {
            version_id: stored.version_id.to_string(),
            arn: stored.arn.clone(),
            timestamp: stored.last_modified,
        }))
    }

    async fn delete_schema(&self, name: &str) -> Result<()> {
        self.inner
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    async fn describe_schema(&self, name: &str) -> Result<RegistryVersion> {
        let stored = self
            .inner
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;
        Ok(RegistryVersion {
            version_id: stored.version_id.to_string(),
            arn: stored.arn.clone(),
            timestamp: stored.last_modified,
        })
    }
}
