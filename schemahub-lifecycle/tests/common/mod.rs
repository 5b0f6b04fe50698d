//! Shared helpers for the lifecycle integration tests: an engine wired to
//! the in-memory registry and catalog providers, plus content fixtures.

use std::sync::{Arc, Once};

use schemahub_core::catalog::MemoryCatalog;
use schemahub_core::registry::MemoryRegistry;
use schemahub_lifecycle::{CatalogAttributes, SchemaLifecycle, SchemaType};
use serde_json::{json, Value};

static TRACING: Once = Once::new();

/// Engine over fresh in-memory stores. The registry handle is returned so
/// tests can inject conflicts and inspect registry-side state.
pub fn setup_engine() -> (SchemaLifecycle, Arc<MemoryRegistry>) {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });

    let registry = Arc::new(MemoryRegistry::new());
    let catalog = Arc::new(MemoryCatalog::new());
    let engine = SchemaLifecycle::new(registry.clone(), catalog);
    (engine, registry)
}

pub fn order_attributes() -> CatalogAttributes {
    CatalogAttributes {
        app_name: "order-service".to_string(),
        owner_role: "order-service-owner".to_string(),
        schema_owner: "orders-team".to_string(),
        support_group: "orders-oncall".to_string(),
        cost_code: "CC-4711".to_string(),
        event_classification: "internal".to_string(),
        schema_type: SchemaType::JsonSchema,
    }
}

/// Baseline order-created payload schema, examples included.
pub fn base_content() -> Value {
    json!({
        "type": "object",
        "properties": {
            "order_id": { "type": "string" },
            "amount": { "type": "number" }
        },
        "examples": [
            { "order_id": "ord-1001", "amount": 25.0 }
        ]
    })
}

/// Same schema with different examples only.
#[allow(dead_code)]
pub fn cosmetic_content() -> Value {
    json!({
        "type": "object",
        "properties": {
            "order_id": { "type": "string" },
            "amount": { "type": "number" }
        },
        "examples": [
            { "order_id": "ord-2002", "amount": 90.5 },
            { "order_id": "ord-2003", "amount": 12.0 }
        ]
    })
}

/// Structurally different schema: adds a required currency property.
#[allow(dead_code)]
pub fn semantic_content() -> Value {
    json!({
        "type": "object",
        "properties": {
            "order_id": { "type": "string" },
            "amount": { "type": "number" },
            "currency": { "type": "string" }
        },
        "required": ["currency"],
        "examples": [
            { "order_id": "ord-1001", "amount": 25.0, "currency": "EUR" }
        ]
    })
}

/// A third distinct revision, for multi-version chains.
#[allow(dead_code)]
pub fn semantic_content_v3() -> Value {
    json!({
        "type": "object",
        "properties": {
            "order_id": { "type": "string" },
            "amount": { "type": "number" },
            "currency": { "type": "string" },
            "placed_at": { "type": "string", "format": "date-time" }
        },
        "required": ["currency", "placed_at"],
        "examples": []
    })
}
