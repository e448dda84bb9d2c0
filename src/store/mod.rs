mod error;
mod memory;
mod store;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use store::{BookStore, Count, Exists, Find, FindOne, Get, Insert, Remove, Update};
