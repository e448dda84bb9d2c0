mod auth;
mod book;
mod config;
mod error;
mod shelf;
mod store;

pub use auth::{
    hash_password, verify_password, Access, AuthError, Identity, Operation, Permission,
    PermissionDenied, PermissionGate, Role, RoleTable, Token, TokenIssuer, HASH_COST,
};
pub use book::{Book, BookDraft, BookPatch, BookQuery};
pub use config::SecurityConfig;
pub use error::ShelfError;
pub use shelf::Bookshelf;
pub use store::{
    BookStore, Count, Exists, Find, FindOne, Get, Insert, MemoryStore, Remove, StoreError, Update,
};

// Re-export the EventEmitter from the event_emitter_rs crate
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
