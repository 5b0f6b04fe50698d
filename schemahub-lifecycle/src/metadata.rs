use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Version numbers start at 1 and increase by exactly one per new row.
pub const FIRST_VERSION: u32 = 1;

pub(crate) fn now_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// Lifecycle state of a single numbered schema version.
///
/// DRAFT is the initial state; PUBLISHED is reached through publish; a
/// version demoted by a later publish ends in DEPRECATED and stays there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VersionState {
    Draft,
    Published,
    Deprecated,
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionState::Draft => write!(f, "DRAFT"),
            VersionState::Published => write!(f, "PUBLISHED"),
            VersionState::Deprecated => write!(f, "DEPRECATED"),
        }
    }
}

impl VersionState {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DRAFT" => Some(VersionState::Draft),
            "PUBLISHED" => Some(VersionState::Published),
            "DEPRECATED" => Some(VersionState::Deprecated),
            _ => None,
        }
    }
}

/// Content format of a registered schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaType {
    JsonSchema,
    OpenApi,
    Avro,
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaType::JsonSchema => write!(f, "json_schema"),
            SchemaType::OpenApi => write!(f, "open_api"),
            SchemaType::Avro => write!(f, "avro"),
        }
    }
}

impl SchemaType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json_schema" | "json" => Some(SchemaType::JsonSchema),
            "open_api" | "openapi" => Some(SchemaType::OpenApi),
            "avro" => Some(SchemaType::Avro),
            _ => None,
        }
    }
}

/// Caller-supplied human-facing attributes of a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogAttributes {
    pub app_name: String,
    pub owner_role: String,
    pub schema_owner: String,
    pub support_group: String,
    pub cost_code: String,
    pub event_classification: String,
    pub schema_type: SchemaType,
}

/// Catalog entry for a schema name: ownership attributes plus the derived
/// snapshot of all version rows (`version_count`, `available_versions`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaCatalogEntry {
    pub schema_name: String,
    pub attributes: CatalogAttributes,
    pub registry_arn: String,
    pub version_count: u32,
    /// Version-number string to lifecycle state, one entry per version row.
    pub available_versions: BTreeMap<String, VersionState>,
    pub created_by: String,
    pub created_at: u64,
    pub last_updated_by: String,
    pub last_updated_at: u64,
}

impl SchemaCatalogEntry {
    /// Entry for a freshly created schema with its single DRAFT version "1".
    pub fn new(
        schema_name: impl Into<String>,
        attributes: CatalogAttributes,
        registry_arn: String,
        actor: &str,
        now: u64,
    ) -> Self {
        let mut available_versions = BTreeMap::new();
        available_versions.insert(FIRST_VERSION.to_string(), VersionState::Draft);

        Self {
            schema_name: schema_name.into(),
            attributes,
            registry_arn,
            version_count: 1,
            available_versions,
            created_by: actor.to_string(),
            created_at: now,
            last_updated_by: actor.to_string(),
            last_updated_at: now,
        }
    }

    /// Rebuild the version snapshot from the authoritative row set.
    pub fn refresh_versions(&mut self, rows: &[SchemaVersionRecord]) {
        self.version_count = rows.len() as u32;
        self.available_versions = rows
            .iter()
            .map(|row| (row.version.to_string(), row.state))
            .collect();
    }

    pub fn touch(&mut self, actor: &str) {
        self.last_updated_by = actor.to_string();
        self.last_updated_at = now_millis();
    }
}

/// One numbered version row of a schema.
///
/// `version` is the catalog's dense counter; `registry_version_id` is the
/// registry's own counter and may advance without `version` moving (an
/// in-place content edit of a DRAFT).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaVersionRecord {
    pub version: u32,
    pub registry_version_id: String,
    pub state: VersionState,
    pub content: Value,
    pub version_created_at: u64,
    pub last_updated_by: String,
    pub last_updated_at: u64,
}

impl SchemaVersionRecord {
    /// New DRAFT row; `created_at` is the registry's timestamp for the
    /// content revision backing this row.
    pub fn new(
        version: u32,
        registry_version_id: String,
        content: Value,
        actor: &str,
        created_at: u64,
    ) -> Self {
        Self {
            version,
            registry_version_id,
            state: VersionState::Draft,
            content,
            version_created_at: created_at,
            last_updated_by: actor.to_string(),
            last_updated_at: now_millis(),
        }
    }

    pub fn touch(&mut self, actor: &str) {
        self.last_updated_by = actor.to_string();
        self.last_updated_at = now_millis();
    }
}

/// Merged read view of a catalog entry and one of its version rows.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaProjection {
    pub schema_name: String,
    pub attributes: CatalogAttributes,
    pub registry_arn: String,
    pub version_count: u32,
    pub available_versions: BTreeMap<String, VersionState>,
    pub created_by: String,
    pub created_at: u64,
    pub version: u32,
    pub state: VersionState,
    pub registry_version_id: String,
    pub content: Value,
    pub version_created_at: u64,
    pub last_updated_by: String,
    pub last_updated_at: u64,
}

impl SchemaProjection {
    /// The version row's last-updated fields win unless the catalog entry was
    /// touched strictly later (the two stores drift; the later write is the
    /// more recent fact).
    pub fn merge(entry: &SchemaCatalogEntry, row: &SchemaVersionRecord) -> Self {
        let (last_updated_by, last_updated_at) = if entry.last_updated_at > row.last_updated_at {
            (entry.last_updated_by.clone(), entry.last_updated_at)
        } else {
            (row.last_updated_by.clone(), row.last_updated_at)
        };

        Self {
            schema_name: entry.schema_name.clone(),
            attributes: entry.attributes.clone(),
            registry_arn: entry.registry_arn.clone(),
            version_count: entry.version_count,
            available_versions: entry.available_versions.clone(),
            created_by: entry.created_by.clone(),
            created_at: entry.created_at,
            version: row.version,
            state: row.state,
            registry_version_id: row.registry_version_id.clone(),
            content: row.content.clone(),
            version_created_at: row.version_created_at,
            last_updated_by,
            last_updated_at,
        }
    }
}
