use thiserror::Error;

pub type Result<T> = std::result::Result<T, RegistryError>;

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Schema content rejected: {0}")]
    Validation(String),

    #[error("Schema already exists: {0}")]
    AlreadyExists(String),

    #[error("Schema not found: {0}")]
    NotFound(String),

    #[error("Registry unavailable: {0}")]
    Unavailable(String),
}
