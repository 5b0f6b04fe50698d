mod errors;
pub use errors::{RegistryError, Result};

mod client;
pub use client::{RegistryUpdate, RegistryVersion, SchemaRegistryClient};

mod memory_registry;
pub use memory_registry::MemoryRegistry;
