// Schemahub core: the store-facing seams of the platform.
//
// Two collaborator boundaries live here, each with its own error type and an
// in-memory provider for testing:
// - catalog: the keyed metadata store holding catalog entries and version rows
// - registry: the content-addressed schema registry with its own version counter

pub mod catalog;
pub mod registry;
