use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use schemahub_core::catalog::CatalogStore;
use schemahub_core::registry::{RegistryUpdate, SchemaRegistryClient};

use crate::differ::ContentDiffer;
use crate::errors::{LifecycleError, Result};
use crate::metadata::{
    now_millis, CatalogAttributes, SchemaCatalogEntry, SchemaProjection, SchemaVersionRecord,
    VersionState, FIRST_VERSION,
};
use crate::resources::CatalogResources;

/// Version lifecycle engine for event schemas.
///
/// Orchestrates the content registry and the catalog store: owns version
/// numbering, DRAFT/PUBLISHED/DEPRECATED transitions, and the decision of
/// whether a content change warrants a new version row.
///
/// Writes are sequential and best-effort. The registry is always written
/// first; there is no rollback across the two stores, so a failure between
/// writes leaves them to drift until a later successful operation repairs
/// the derived state.
pub struct SchemaLifecycle {
    registry: Arc<dyn SchemaRegistryClient>,
    catalog: CatalogResources,
    differ: ContentDiffer,
}

impl SchemaLifecycle {
    pub fn new(registry: Arc<dyn SchemaRegistryClient>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self {
            registry,
            catalog: CatalogResources::new(catalog),
            differ: ContentDiffer::new(),
        }
    }

    /// Register a new schema: registry entry, catalog entry, and version row
    /// "1" in DRAFT. Returns the merged projection of both rows.
    pub async fn create(
        &self,
        name: &str,
        content: Value,
        attributes: CatalogAttributes,
        actor: &str,
    ) -> Result<SchemaProjection> {
        let registered = self.registry.create_schema(name, &content).await?;

        let entry = SchemaCatalogEntry::new(
            name,
            attributes,
            registered.arn.clone(),
            actor,
            now_millis(),
        );
        self.catalog.create_entry(&entry).await?;

        let row = SchemaVersionRecord::new(
            FIRST_VERSION,
            registered.version_id,
            content,
            actor,
            registered.timestamp,
        );
        self.catalog.put_version(name, &row).await?;

        info!(schema = %name, version = row.version, "registered new schema");
        Ok(SchemaProjection::merge(&entry, &row))
    }

    /// Apply a full desired definition: content to the registry first, then
    /// fork a new draft, revise the latest row in place, or leave the rows
    /// untouched, then rewrite the catalog entry with the refreshed snapshot.
    ///
    /// A registry conflict means a concurrent caller won the content write;
    /// the update abandons its own write path and answers with the current
    /// canonical state instead of erroring.
    pub async fn update(
        &self,
        name: &str,
        attributes: CatalogAttributes,
        content: Value,
        actor: &str,
    ) -> Result<SchemaProjection> {
        let registered = match self.registry.update_schema(name, &content).await? {
            RegistryUpdate::Applied(version) => version,
            RegistryUpdate::Conflict => {
                warn!(schema = %name, "registry reported a concurrent write, reconciling from canonical state");
                return self.get(name, None).await;
            }
        };

        let rows = self.catalog.list_version_rows(name).await?;
        let latest = match rows.last() {
            Some(row) => row.clone(),
            None => return Err(LifecycleError::NotFound(name.to_string())),
        };

        let semantic_changed = !self
            .differ
            .structurally_equal_ignoring_examples(&latest.content, &content);
        let cosmetic_changed =
            !semantic_changed && !self.differ.structurally_equal(&latest.content, &content);

        let written = if semantic_changed {
            if latest.state == VersionState::Published {
                // The published row is immutable content-wise; open the next
                // draft on top of it.
                let row = SchemaVersionRecord::new(
                    latest.version + 1,
                    registered.version_id,
                    content,
                    actor,
                    registered.timestamp,
                );
                self.catalog.put_version(name, &row).await?;
                info!(schema = %name, version = row.version, "created draft version");
                Some(row)
            } else {
                let mut row = latest.clone();
                row.registry_version_id = registered.version_id;
                row.content = content;
                row.touch(actor);
                self.catalog.put_version(name, &row).await?;
                info!(schema = %name, version = row.version, "revised draft in place");
                Some(row)
            }
        } else if cosmetic_changed {
            // Examples-only edit: refresh the stored content, keep the
            // version number, state and registry version id as they are.
            let mut row = latest.clone();
            row.content = content;
            row.touch(actor);
            self.catalog.put_version(name, &row).await?;
            info!(schema = %name, version = row.version, "refreshed examples");
            Some(row)
        } else {
            None
        };

        let rows = self.catalog.list_version_rows(name).await?;
        let mut entry = match self.catalog.get_entry(name).await? {
            Some(entry) => entry,
            None => return Err(LifecycleError::NotFound(name.to_string())),
        };
        entry.attributes = attributes;
        entry.refresh_versions(&rows);
        entry.touch(actor);
        self.catalog.update_entry(&entry).await?;

        let selected = written.unwrap_or(latest);
        Ok(SchemaProjection::merge(&entry, &selected))
    }

    /// Promote the highest version to PUBLISHED and demote every other row
    /// to DEPRECATED. Rows are persisted one at a time; a failure partway
    /// leaves the remaining rows untouched until the next successful pass.
    ///
    /// No DRAFT precondition: publishing an already-published target is
    /// accepted and rewrites the same states.
    pub async fn publish(&self, name: &str, actor: &str) -> Result<()> {
        let mut rows = self.catalog.list_version_rows(name).await?;
        let target = match rows.last() {
            Some(row) => row.version,
            None => return Err(LifecycleError::NotFound(name.to_string())),
        };

        for row in rows.iter_mut() {
            row.state = if row.version == target {
                VersionState::Published
            } else {
                VersionState::Deprecated
            };
            row.touch(actor);
            self.catalog.put_version(name, row).await?;
        }

        let mut entry = match self.catalog.get_entry(name).await? {
            Some(entry) => entry,
            None => return Err(LifecycleError::NotFound(name.to_string())),
        };
        entry.refresh_versions(&rows);
        entry.touch(actor);
        self.catalog.update_entry(&entry).await?;

        info!(schema = %name, version = target, "published schema version");
        Ok(())
    }

    /// Remove the schema everywhere: registry first, then each version row,
    /// then the catalog entry.
    pub async fn delete(&self, name: &str) -> Result<()> {
        self.registry.delete_schema(name).await?;

        let rows = self.catalog.list_version_rows(name).await?;
        for row in &rows {
            self.catalog.delete_version(name, row.version).await?;
        }
        self.catalog.delete_entry(name).await?;

        info!(schema = %name, versions = rows.len(), "deleted schema");
        Ok(())
    }

    /// Merged projection of the catalog entry and one version row: the
    /// requested version, or the highest-numbered row when none is given.
    pub async fn get(&self, name: &str, version: Option<u32>) -> Result<SchemaProjection> {
        let entry = match self.catalog.get_entry(name).await? {
            Some(entry) => entry,
            None => return Err(LifecycleError::NotFound(name.to_string())),
        };

        let rows = self.catalog.list_version_rows(name).await?;
        let latest = match rows.last() {
            Some(row) => row,
            None => return Err(LifecycleError::NotFound(name.to_string())),
        };

        let row = match version {
            Some(wanted) => rows
                .iter()
                .find(|row| row.version == wanted)
                .ok_or(LifecycleError::VersionNotFound {
                    name: name.to_string(),
                    version: wanted,
                })?,
            None => latest,
        };

        Ok(SchemaProjection::merge(&entry, row))
    }

    /// Ascending version numbers of all rows.
    pub async fn list_versions(&self, name: &str) -> Result<Vec<u32>> {
        let rows = self.catalog.list_version_rows(name).await?;
        if rows.is_empty() {
            return Err(LifecycleError::NotFound(name.to_string()));
        }
        Ok(rows.iter().map(|row| row.version).collect())
    }

    /// Whether a catalog entry exists for the name.
    pub async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.catalog.get_entry(name).await?.is_some())
    }
}
