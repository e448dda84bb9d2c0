use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use crate::book::{Book, BookDraft, BookPatch};

use super::error::StoreError;
use super::store::{Count, Exists, Find, FindOne, Get, Insert, Remove, Update};

/// In-memory reference backend. Ids are assigned from an atomic counter, so
/// ascending-id iteration over the BTreeMap is insertion order.
pub struct MemoryStore {
    books: RwLock<BTreeMap<u64, Book>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore {
            books: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Get for MemoryStore {
    fn get(&self, id: u64) -> Result<Option<Book>, StoreError> {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(books.get(&id).cloned())
    }
}

impl Find for MemoryStore {
    fn find<F>(&self, predicate: F) -> Result<Vec<Book>, StoreError>
    where
        F: Fn(&Book) -> bool,
    {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(books
            .values()
            .filter(|book| predicate(book))
            .cloned()
            .collect())
    }
}

impl FindOne for MemoryStore {
    fn find_one<F>(&self, predicate: F) -> Result<Option<Book>, StoreError>
    where
        F: Fn(&Book) -> bool,
    {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(books.values().find(|book| predicate(book)).cloned())
    }
}

impl Exists for MemoryStore {
    fn exists<F>(&self, predicate: F) -> Result<bool, StoreError>
    where
        F: Fn(&Book) -> bool,
    {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(books.values().any(|book| predicate(book)))
    }
}

impl Count for MemoryStore {
    fn count<F>(&self, predicate: F) -> Result<usize, StoreError>
    where
        F: Fn(&Book) -> bool,
    {
        let books = self
            .books
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(books.values().filter(|book| predicate(book)).count())
    }
}

impl Insert for MemoryStore {
    fn insert(&self, draft: BookDraft) -> Result<Book, StoreError> {
        let draft = draft.validate()?;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let book = Book {
            id,
            title: draft.title,
            author: draft.author,
            publication_year: draft.publication_year,
        };

        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        books.insert(id, book.clone());
        Ok(book)
    }
}

impl Update for MemoryStore {
    fn update(&self, id: u64, patch: &BookPatch) -> Result<Option<Book>, StoreError> {
        let patch = patch.validate()?;
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        match books.get_mut(&id) {
            Some(book) => {
                patch.apply(book);
                Ok(Some(book.clone()))
            }
            None => Ok(None),
        }
    }

    fn update_where<F>(&self, predicate: F, patch: &BookPatch) -> Result<usize, StoreError>
    where
        F: Fn(&Book) -> bool,
    {
        let patch = patch.validate()?;
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        let mut affected = 0;
        for book in books.values_mut() {
            if predicate(book) {
                patch.apply(book);
                affected += 1;
            }
        }
        Ok(affected)
    }
}

impl Remove for MemoryStore {
    fn remove(&self, id: u64) -> Result<Option<Book>, StoreError> {
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        Ok(books.remove(&id))
    }

    fn remove_where<F>(&self, predicate: F) -> Result<usize, StoreError>
    where
        F: Fn(&Book) -> bool,
    {
        let mut books = self
            .books
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        let matching: Vec<u64> = books
            .values()
            .filter(|book| predicate(book))
            .map(|book| book.id)
            .collect();
        for id in &matching {
            books.remove(id);
        }
        Ok(matching.len())
    }
}
