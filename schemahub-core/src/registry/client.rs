use async_trait::async_trait;
use serde_json::Value;

use super::errors::Result;

/// Version descriptor assigned by the registry.
///
/// `version_id` is the registry's own counter and advances on every accepted
/// content write; it is unrelated to the catalog's version numbering.
/// `timestamp` is the creation instant on create and the last-modified
/// instant on update/describe, in epoch milliseconds.
#[derive(Debug, Clone)]
pub struct RegistryVersion {
    pub version_id: String,
    pub arn: String,
    pub timestamp: u64,
}

/// Outcome of an update against the registry.
#[derive(Debug, Clone)]
pub enum RegistryUpdate {
    /// The write was accepted and produced a new registry revision.
    Applied(RegistryVersion),
    /// A concurrent caller changed the entry first; nothing was written.
    Conflict,
}

/// The content-addressed schema registry, keyed by schema name.
#[async_trait]
pub trait SchemaRegistryClient: Send + Sync + 'static {
    async fn create_schema(&self, name: &str, content: &Value) -> Result<RegistryVersion>;

    async fn update_schema(&self, name: &str, content: &Value) -> Result<RegistryUpdate>;

    async fn delete_schema(&self, name: &str) -> Result<()>;

    async fn describe_schema(&self, name: &str) -> Result<RegistryVersion>;
}
