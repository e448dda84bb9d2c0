use crate::book::{Book, BookDraft, BookPatch};

use super::error::StoreError;

/// Get a single book by its id.
pub trait Get {
    fn get(&self, id: u64) -> Result<Option<Book>, StoreError>;
}

/// Find all books matching a predicate, in insertion order.
pub trait Find {
    fn find<F>(&self, predicate: F) -> Result<Vec<Book>, StoreError>
    where
        F: Fn(&Book) -> bool;
}

/// Find the first book matching a predicate.
pub trait FindOne {
    fn find_one<F>(&self, predicate: F) -> Result<Option<Book>, StoreError>
    where
        F: Fn(&Book) -> bool;
}

/// Check if any book matches a predicate.
pub trait Exists {
    fn exists<F>(&self, predicate: F) -> Result<bool, StoreError>
    where
        F: Fn(&Book) -> bool;
}

/// Count books matching a predicate.
pub trait Count {
    fn count<F>(&self, predicate: F) -> Result<usize, StoreError>
    where
        F: Fn(&Book) -> bool;
}

/// Validate a draft, assign it an id, and persist the new book.
pub trait Insert {
    fn insert(&self, draft: BookDraft) -> Result<Book, StoreError>;
}

/// Apply field changes to persisted books.
pub trait Update {
    /// Fetch-then-save form. Returns the updated book, or `None` if the id is absent.
    fn update(&self, id: u64, patch: &BookPatch) -> Result<Option<Book>, StoreError>;

    /// Bulk filter-then-update form. Returns the number of affected books.
    fn update_where<F>(&self, predicate: F, patch: &BookPatch) -> Result<usize, StoreError>
    where
        F: Fn(&Book) -> bool;
}

/// Remove persisted books.
pub trait Remove {
    /// Returns the removed book, or `None` if the id is absent.
    fn remove(&self, id: u64) -> Result<Option<Book>, StoreError>;

    /// Removes every matching book and returns the count.
    fn remove_where<F>(&self, predicate: F) -> Result<usize, StoreError>
    where
        F: Fn(&Book) -> bool;
}

/// Full storage backend trait combining all capabilities.
pub trait BookStore: Get + Find + FindOne + Exists + Count + Insert + Update + Remove {}

// Blanket implementation: anything implementing all capabilities is a BookStore
impl<T> BookStore for T where T: Get + Find + FindOne + Exists + Count + Insert + Update + Remove {}
