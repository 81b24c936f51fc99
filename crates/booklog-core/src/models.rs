//! Data models for booklog
//!
//! Defines the core data structures: Book, Cover, Draft and FilterCriteria.
//! The on-disk layout lives in `codec`; these types are what the rest of
//! the crate works with.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Genre assigned when a draft leaves the genre blank
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Description assigned when a draft leaves the description blank
pub const NO_DESCRIPTION: &str = "No description";

/// Cover rendered for books without one
pub const PLACEHOLDER_COVER: &str = "assets/placeholders/book-placeholder.png";

/// Genres offered when adding a book
pub const GENRES: &[&str] = &[
    "Thriller",
    "Mystery",
    "Romance",
    "Fantasy",
    "Sci-Fi",
    "Non-fiction",
    "Historical Fiction",
    "Classic",
    "Other",
];

/// Cover images bundled with the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinCover {
    TheSilentPatient,
    TheHousemaid,
    GoneGirl,
}

impl BuiltinCover {
    /// Path of the bundled asset
    pub fn asset_path(&self) -> &'static str {
        match self {
            BuiltinCover::TheSilentPatient => "assets/books/the-silent-patient.png",
            BuiltinCover::TheHousemaid => "assets/books/the-housemaid.png",
            BuiltinCover::GoneGirl => "assets/books/gone-girl.png",
        }
    }
}

/// Where a book's cover comes from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cover {
    /// No cover; the placeholder is shown
    #[default]
    None,
    /// A bundled asset
    Builtin(BuiltinCover),
    /// An absolute `http://` or `https://` URL
    Url(String),
}

impl Cover {
    /// Build a cover from a user-supplied URL (empty means no cover)
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        if url.trim().is_empty() {
            Cover::None
        } else {
            Cover::Url(url)
        }
    }

    /// Resolve the image to display, falling back to the placeholder
    pub fn display_url(&self) -> &str {
        match self {
            Cover::None => PLACEHOLDER_COVER,
            Cover::Builtin(builtin) => builtin.asset_path(),
            Cover::Url(url) if url.trim().is_empty() => PLACEHOLDER_COVER,
            Cover::Url(url) => url,
        }
    }
}

/// A book in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Unique identifier
    pub id: String,
    /// Title
    pub name: String,
    pub author: String,
    /// One of [`GENRES`] or [`UNKNOWN_GENRE`]
    pub genre: String,
    /// Rating in `[0, 5]`
    pub rating: f64,
    pub description: String,
    pub cover: Cover,
    /// Whether the book has been read
    pub read: bool,
}

impl Book {
    /// Create an unread book with a fresh ID and default genre/description
    pub fn new(name: impl Into<String>, author: impl Into<String>, rating: f64) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, author, rating)
    }

    /// Create a book with a specific ID (for seed data and loading)
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        author: impl Into<String>,
        rating: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            author: author.into(),
            genre: UNKNOWN_GENRE.to_string(),
            rating,
            description: NO_DESCRIPTION.to_string(),
            cover: Cover::None,
            read: false,
        }
    }

    /// Cover to display for this book
    pub fn cover_url(&self) -> &str {
        self.cover.display_url()
    }
}

/// Transient form data for a new book
///
/// Mirrors the add-book form: every field is raw text as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub author: String,
    pub genre: String,
    /// Rating as typed; may use a comma as decimal separator
    pub rating: String,
    pub description: String,
    pub img_url: String,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the rating, normalising a decimal comma to a dot
    pub fn set_rating(&mut self, rating: &str) {
        self.rating = rating.replacen(',', ".", 1);
    }

    /// Reset every field (after submit or cancel)
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Criteria for narrowing the catalog list
///
/// Empty fields match everything; all non-empty fields must match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// ID prefix
    pub id: String,
    /// Case-insensitive substring of the name
    pub name: String,
    /// Case-insensitive substring of the author
    pub author: String,
}

impl FilterCriteria {
    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            ..Self::default()
        }
    }

    /// True when no criterion is set
    pub fn is_empty(&self) -> bool {
        self.id.trim().is_empty() && self.name.trim().is_empty() && self.author.trim().is_empty()
    }

    /// Check whether a book satisfies every criterion
    pub fn matches(&self, book: &Book) -> bool {
        let id_query = self.id.trim();
        let name_query = self.name.trim().to_lowercase();
        let author_query = self.author.trim().to_lowercase();

        let id_match = id_query.is_empty() || book.id.starts_with(id_query);
        let name_match = name_query.is_empty() || book.name.to_lowercase().contains(&name_query);
        let author_match =
            author_query.is_empty() || book.author.to_lowercase().contains(&author_query);

        id_match && name_match && author_match
    }
}
