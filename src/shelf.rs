#[cfg(feature = "emitter")]
use std::sync::Mutex;

#[cfg(feature = "emitter")]
use event_emitter_rs::EventEmitter;

use crate::auth::{Identity, Operation, PermissionGate};
use crate::book::{Book, BookDraft, BookPatch, BookQuery};
use crate::error::ShelfError;
use crate::store::{BookStore, MemoryStore};

/// Permission-gated record store. Every operation is an authorize-then-execute
/// unit: the gate checks the caller's identity against the operation's
/// required permission before the storage backend runs.
///
/// Single-record writes emit `book.created`, `book.updated`, and
/// `book.deleted` events with the record as a JSON payload. Bulk forms only
/// report affected counts and emit nothing.
pub struct Bookshelf<S = MemoryStore> {
    gate: PermissionGate,
    store: S,
    #[cfg(feature = "emitter")]
    emitter: Mutex<EventEmitter>,
}

impl Bookshelf<MemoryStore> {
    /// Shelf over the in-memory backend and the built-in role table.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: BookStore> Bookshelf<S> {
    pub fn new(store: S) -> Self {
        Self::with_gate(store, PermissionGate::new())
    }

    pub fn with_gate(store: S, gate: PermissionGate) -> Self {
        Bookshelf {
            gate,
            store,
            #[cfg(feature = "emitter")]
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    pub fn gate(&self) -> &PermissionGate {
        &self.gate
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validates the draft, persists it with a fresh id, and returns the
    /// stored record. Requires `can_create`.
    pub fn create(&self, identity: &Identity, draft: BookDraft) -> Result<Book, ShelfError> {
        self.gate.authorize(identity, Operation::Create)?;
        let book = self.store.insert(draft)?;
        log::debug!("{} created book {}", identity.username(), book.id);
        self.emit("book.created", &book);
        Ok(book)
    }

    /// Single record by id. Requires `can_view`.
    pub fn get(&self, identity: &Identity, id: u64) -> Result<Book, ShelfError> {
        self.gate.authorize(identity, Operation::View)?;
        self.store.get(id)?.ok_or_else(|| ShelfError::NotFound {
            query: format!("id {}", id),
        })
    }

    /// Exact-match single-result lookup. Fails with NotFound when the query
    /// matches zero records, or more than one. Requires `can_view`.
    pub fn get_one(&self, identity: &Identity, query: &BookQuery) -> Result<Book, ShelfError> {
        self.gate.authorize(identity, Operation::View)?;
        let mut matches = self.store.find(|book| query.matches(book))?;
        match matches.len() {
            1 => Ok(matches.remove(0)),
            0 => Err(ShelfError::NotFound {
                query: query.describe(),
            }),
            n => Err(ShelfError::NotFound {
                query: format!("{} (ambiguous: {} records match)", query.describe(), n),
            }),
        }
    }

    /// All records matching the query, in insertion order. Requires `can_view`.
    pub fn filter(&self, identity: &Identity, query: &BookQuery) -> Result<Vec<Book>, ShelfError> {
        self.gate.authorize(identity, Operation::View)?;
        Ok(self.store.find(|book| query.matches(book))?)
    }

    /// Every record, in insertion order. Requires `can_view`.
    pub fn all(&self, identity: &Identity) -> Result<Vec<Book>, ShelfError> {
        self.gate.authorize(identity, Operation::View)?;
        Ok(self.store.find(|_| true)?)
    }

    /// Case-insensitive substring search over title and author. An empty term
    /// matches everything. Requires `can_view`.
    pub fn search(&self, identity: &Identity, term: &str) -> Result<Vec<Book>, ShelfError> {
        self.gate.authorize(identity, Operation::View)?;
        let needle = term.trim().to_lowercase();
        Ok(self.store.find(|book| {
            needle.is_empty()
                || book.title.to_lowercase().contains(&needle)
                || book.author.to_lowercase().contains(&needle)
        })?)
    }

    /// Number of records matching the query. Requires `can_view`.
    pub fn count(&self, identity: &Identity, query: &BookQuery) -> Result<usize, ShelfError> {
        self.gate.authorize(identity, Operation::View)?;
        Ok(self.store.count(|book| query.matches(book))?)
    }

    /// Fetch-then-save update of a single record. Requires `can_edit`.
    pub fn update(
        &self,
        identity: &Identity,
        id: u64,
        patch: &BookPatch,
    ) -> Result<Book, ShelfError> {
        self.gate.authorize(identity, Operation::Edit)?;
        let book = self
            .store
            .update(id, patch)?
            .ok_or_else(|| ShelfError::NotFound {
                query: format!("id {}", id),
            })?;
        log::debug!("{} updated book {}", identity.username(), book.id);
        self.emit("book.updated", &book);
        Ok(book)
    }

    /// Bulk filter-then-update without individual fetches. Returns the number
    /// of affected records. Requires `can_edit`.
    pub fn update_where(
        &self,
        identity: &Identity,
        query: &BookQuery,
        patch: &BookPatch,
    ) -> Result<usize, ShelfError> {
        self.gate.authorize(identity, Operation::Edit)?;
        Ok(self.store.update_where(|book| query.matches(book), patch)?)
    }

    /// Removes a single record and returns it. Deleting an id that is already
    /// gone fails with NotFound. Requires `can_delete`.
    pub fn delete(&self, identity: &Identity, id: u64) -> Result<Book, ShelfError> {
        self.gate.authorize(identity, Operation::Delete)?;
        let book = self.store.remove(id)?.ok_or_else(|| ShelfError::NotFound {
            query: format!("id {}", id),
        })?;
        log::debug!("{} deleted book {}", identity.username(), book.id);
        self.emit("book.deleted", &book);
        Ok(book)
    }

    /// Removes every matching record and returns the count. Zero matches is
    /// `Ok(0)`, not an error. Requires `can_delete`.
    pub fn delete_where(
        &self,
        identity: &Identity,
        query: &BookQuery,
    ) -> Result<usize, ShelfError> {
        self.gate.authorize(identity, Operation::Delete)?;
        Ok(self.store.remove_where(|book| query.matches(book))?)
    }

    #[cfg(feature = "emitter")]
    pub fn on<F>(&self, event: &str, listener: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.on(event, listener);
        }
    }

    #[cfg(feature = "emitter")]
    fn emit(&self, event: &str, book: &Book) {
        // Emission is best effort; a failed listener never fails the write.
        let payload = match serde_json::to_string(book) {
            Ok(payload) => payload,
            Err(_) => return,
        };
        if let Ok(mut emitter) = self.emitter.lock() {
            emitter.emit(event, payload);
        }
    }

    #[cfg(not(feature = "emitter"))]
    fn emit(&self, _event: &str, _book: &Book) {}
}

impl Default for Bookshelf<MemoryStore> {
    fn default() -> Self {
        Self::in_memory()
    }
}
