use std::fmt;

use serde::{Deserialize, Serialize};

use crate::store::StoreError;

const TITLE_MAX: usize = 200;
const AUTHOR_MAX: usize = 100;
const YEAR_MIN: i32 = 1000;
const YEAR_MAX: i32 = 9999;

/// A persisted book record. Identity is the auto-assigned `id`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} by {}", self.title, self.author)
    }
}

/// Fields for a book that does not exist yet. Validated on insert.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub publication_year: i32,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, publication_year: i32) -> Self {
        BookDraft {
            title: title.into(),
            author: author.into(),
            publication_year,
        }
    }

    /// Checks every field and returns the draft with whitespace trimmed.
    pub fn validate(self) -> Result<BookDraft, StoreError> {
        Ok(BookDraft {
            title: validated_text("title", &self.title, TITLE_MAX)?,
            author: validated_text("author", &self.author, AUTHOR_MAX)?,
            publication_year: validated_year(self.publication_year)?,
        })
    }
}

/// Field changes to apply to an existing book. Absent fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
}

impl BookPatch {
    pub fn new() -> Self {
        BookPatch::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn publication_year(mut self, publication_year: i32) -> Self {
        self.publication_year = Some(publication_year);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.publication_year.is_none()
    }

    /// Checks the fields the patch carries and returns a trimmed copy.
    pub fn validate(&self) -> Result<BookPatch, StoreError> {
        let title = match &self.title {
            Some(title) => Some(validated_text("title", title, TITLE_MAX)?),
            None => None,
        };
        let author = match &self.author {
            Some(author) => Some(validated_text("author", author, AUTHOR_MAX)?),
            None => None,
        };
        let publication_year = match self.publication_year {
            Some(year) => Some(validated_year(year)?),
            None => None,
        };
        Ok(BookPatch {
            title,
            author,
            publication_year,
        })
    }

    pub fn apply(&self, book: &mut Book) {
        if let Some(title) = &self.title {
            book.title = title.clone();
        }
        if let Some(author) = &self.author {
            book.author = author.clone();
        }
        if let Some(year) = self.publication_year {
            book.publication_year = year;
        }
    }
}

/// Exact-match query over book fields. Empty constraints match every record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub publication_year: Option<i32>,
}

impl BookQuery {
    pub fn new() -> Self {
        BookQuery::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn publication_year(mut self, publication_year: i32) -> Self {
        self.publication_year = Some(publication_year);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.author.is_none() && self.publication_year.is_none()
    }

    pub fn matches(&self, book: &Book) -> bool {
        if let Some(title) = &self.title {
            if book.title != *title {
                return false;
            }
        }
        if let Some(author) = &self.author {
            if book.author != *author {
                return false;
            }
        }
        if let Some(year) = self.publication_year {
            if book.publication_year != year {
                return false;
            }
        }
        true
    }

    /// Human-readable form of the constraints, used in NotFound errors.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(title) = &self.title {
            parts.push(format!("title \"{}\"", title));
        }
        if let Some(author) = &self.author {
            parts.push(format!("author \"{}\"", author));
        }
        if let Some(year) = self.publication_year {
            parts.push(format!("publication_year {}", year));
        }
        if parts.is_empty() {
            "any book".to_string()
        } else {
            parts.join(", ")
        }
    }
}

fn validated_text(field: &'static str, value: &str, max: usize) -> Result<String, StoreError> {
    let trimmed = value.trim();
    let length = trimmed.chars().count();
    if length < 2 {
        return Err(StoreError::Validation {
            field,
            message: format!("{} must be at least 2 characters long", field),
        });
    }
    if length > max {
        return Err(StoreError::Validation {
            field,
            message: format!("{} must be {} characters or less", field, max),
        });
    }
    Ok(trimmed.to_string())
}

fn validated_year(year: i32) -> Result<i32, StoreError> {
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(StoreError::Validation {
            field: "publication_year",
            message: format!(
                "publication_year must be between {} and {}",
                YEAR_MIN, YEAR_MAX
            ),
        });
    }
    Ok(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orwell() -> Book {
        Book {
            id: 1,
            title: "1984".to_string(),
            author: "George Orwell".to_string(),
            publication_year: 1949,
        }
    }

    #[test]
    fn display() {
        assert_eq!(orwell().to_string(), "1984 by George Orwell");
    }

    #[test]
    fn draft_validate_trims() {
        let draft = BookDraft::new("  1984  ", " George Orwell ", 1949)
            .validate()
            .unwrap();
        assert_eq!(draft.title, "1984");
        assert_eq!(draft.author, "George Orwell");
        assert_eq!(draft.publication_year, 1949);
    }

    #[test]
    fn draft_rejects_short_title() {
        let result = BookDraft::new(" x ", "George Orwell", 1949).validate();
        assert!(matches!(
            result,
            Err(StoreError::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn draft_rejects_long_title() {
        let result = BookDraft::new("x".repeat(201), "George Orwell", 1949).validate();
        assert!(matches!(
            result,
            Err(StoreError::Validation { field: "title", .. })
        ));
    }

    #[test]
    fn draft_rejects_short_author() {
        let result = BookDraft::new("1984", "X", 1949).validate();
        assert!(matches!(
            result,
            Err(StoreError::Validation {
                field: "author",
                ..
            })
        ));
    }

    #[test]
    fn draft_rejects_year_out_of_range() {
        assert!(BookDraft::new("1984", "George Orwell", 999).validate().is_err());
        assert!(BookDraft::new("1984", "George Orwell", 10000)
            .validate()
            .is_err());
        assert!(BookDraft::new("1984", "George Orwell", 1000)
            .validate()
            .is_ok());
        assert!(BookDraft::new("1984", "George Orwell", 9999)
            .validate()
            .is_ok());
    }

    #[test]
    fn patch_applies_present_fields() {
        let mut book = orwell();
        BookPatch::new()
            .title("Nineteen Eighty-Four")
            .apply(&mut book);
        assert_eq!(book.title, "Nineteen Eighty-Four");
        assert_eq!(book.author, "George Orwell");
        assert_eq!(book.publication_year, 1949);
    }

    #[test]
    fn patch_validate_only_checks_present_fields() {
        let patch = BookPatch::new().author("  Aldous Huxley  ");
        let validated = patch.validate().unwrap();
        assert_eq!(validated.author.as_deref(), Some("Aldous Huxley"));
        assert!(validated.title.is_none());

        let bad = BookPatch::new().title("x");
        assert!(bad.validate().is_err());
    }

    #[test]
    fn empty_patch() {
        assert!(BookPatch::new().is_empty());
        assert!(!BookPatch::new().title("1984").is_empty());
    }

    #[test]
    fn query_matches() {
        let book = orwell();
        assert!(BookQuery::new().matches(&book));
        assert!(BookQuery::new().title("1984").matches(&book));
        assert!(BookQuery::new()
            .title("1984")
            .author("George Orwell")
            .publication_year(1949)
            .matches(&book));
        assert!(!BookQuery::new().title("Animal Farm").matches(&book));
        assert!(!BookQuery::new().title("1984").publication_year(1950).matches(&book));
    }

    #[test]
    fn query_describe() {
        assert_eq!(BookQuery::new().describe(), "any book");
        assert_eq!(
            BookQuery::new().title("1984").publication_year(1949).describe(),
            "title \"1984\", publication_year 1949"
        );
    }

    #[test]
    fn serialize_deserialize() {
        let book = orwell();
        let serialized = serde_json::to_string(&book).unwrap();
        let deserialized: Book = serde_json::from_str(&serialized).unwrap();
        assert_eq!(book, deserialized);
    }
}
