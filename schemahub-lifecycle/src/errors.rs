use schemahub_core::catalog::CatalogError;
use schemahub_core::registry::RegistryError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, LifecycleError>;

#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Schema version {version} not found for schema: {name}")]
    VersionNotFound { name: String, version: u32 },

    #[error("Schema rejected: {0}")]
    Validation(String),

    #[error("Catalog store error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Registry error: {0}")]
    Registry(RegistryError),
}

// Registry validation failures (including name collisions on create) are
// caller errors; everything else from the registry except a missing schema
// stays an opaque infrastructure error.
impl From<RegistryError> for LifecycleError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(msg) => LifecycleError::Validation(msg),
            RegistryError::AlreadyExists(name) => {
                LifecycleError::Validation(format!("schema already exists: {}", name))
            }
            RegistryError::NotFound(name) => LifecycleError::NotFound(name),
            other => LifecycleError::Registry(other),
        }
    }
}
