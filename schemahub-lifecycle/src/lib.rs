// Schemahub lifecycle engine
//
// Owns version numbering, lifecycle state transitions and the merged read
// projection for event schemas held across two independently-consistent
// stores: the content registry and the catalog metadata store.

pub mod differ;
pub mod errors;
pub mod metadata;

mod lifecycle;
mod resources;

pub use differ::ContentDiffer;
pub use errors::{LifecycleError, Result};
pub use lifecycle::SchemaLifecycle;
pub use metadata::{
    CatalogAttributes, SchemaCatalogEntry, SchemaProjection, SchemaType, SchemaVersionRecord,
    VersionState,
};
