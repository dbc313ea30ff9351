//! In-memory adapters for tests and local development.

mod playground_store;

pub use playground_store::InMemoryPlaygroundStore;
