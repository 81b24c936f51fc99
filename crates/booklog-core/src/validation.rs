//! Draft validation
//!
//! Rules are checked in a fixed order and only the first violation is
//! reported: name, author, rating presence, rating range, cover URL scheme.

use thiserror::Error;

use crate::models::{Book, Cover, Draft, NO_DESCRIPTION, UNKNOWN_GENRE};

/// Lowest accepted rating
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating
pub const MAX_RATING: f64 = 5.0;

/// Reasons a draft cannot become a book
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required.")]
    MissingName,

    #[error("Author is required.")]
    MissingAuthor,

    #[error("Rating is required.")]
    MissingRating,

    #[error("Rating must be between 0 and 5.")]
    RatingOutOfRange,

    #[error("Cover URL must start with http:// or https://")]
    InvalidCoverUrl,
}

impl ValidationError {
    /// Name of the draft field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "name",
            ValidationError::MissingAuthor => "author",
            ValidationError::MissingRating | ValidationError::RatingOutOfRange => "rating",
            ValidationError::InvalidCoverUrl => "img_url",
        }
    }
}

/// A draft that passed validation, with defaults applied
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedDraft {
    pub name: String,
    pub author: String,
    pub genre: String,
    pub rating: f64,
    pub description: String,
    pub cover: Cover,
}

impl ValidatedDraft {
    /// Turn into an unread book with the given ID
    pub fn into_book(self, id: impl Into<String>) -> Book {
        Book {
            id: id.into(),
            name: self.name,
            author: self.author,
            genre: self.genre,
            rating: self.rating,
            description: self.description,
            cover: self.cover,
            read: false,
        }
    }
}

impl Draft {
    /// Check every rule and apply defaults for blank optional fields
    pub fn validate(&self) -> Result<ValidatedDraft, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingName);
        }

        let author = self.author.trim();
        if author.is_empty() {
            return Err(ValidationError::MissingAuthor);
        }

        let rating = parse_rating(&self.rating)?;

        if !self.img_url.is_empty() && !has_http_scheme(&self.img_url) {
            return Err(ValidationError::InvalidCoverUrl);
        }

        Ok(ValidatedDraft {
            name: name.to_string(),
            author: author.to_string(),
            genre: non_blank_or(&self.genre, UNKNOWN_GENRE),
            rating,
            description: non_blank_or(&self.description, NO_DESCRIPTION),
            cover: Cover::from_url(self.img_url.trim()),
        })
    }
}

/// Parse a typed rating, accepting a decimal comma
pub fn parse_rating(raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingRating);
    }

    let rating: f64 = trimmed
        .replacen(',', ".", 1)
        .parse()
        .map_err(|_| ValidationError::RatingOutOfRange)?;

    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::RatingOutOfRange);
    }

    Ok(rating)
}

fn has_http_scheme(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn non_blank_or(value: &str, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
