//! Catalog persistence format
//!
//! The catalog is stored as a JSON array of flat records:
//!
//! ```text
//! [{"id":"1","name":"The Silent Patient","author":"Alex Michaelides",
//!   "genre":"Thriller","rating":4.13,"description":"...",
//!   "imgUrl":"builtin:theSilentPatient","read":false}]
//! ```
//!
//! Bundled covers have no stable URL, so they are written as
//! `builtin:<name>` tokens and mapped back on decode. Any other `imgUrl`
//! is kept verbatim; an empty one means "no cover".

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::models::{Book, BuiltinCover, Cover};

/// Prefix of built-in cover tokens
pub const BUILTIN_PREFIX: &str = "builtin:";

/// Token ↔ asset mapping for bundled covers
const BUILTIN_COVERS: &[(&str, BuiltinCover)] = &[
    ("builtin:theSilentPatient", BuiltinCover::TheSilentPatient),
    ("builtin:theHousemaid", BuiltinCover::TheHousemaid),
    ("builtin:goneGirl", BuiltinCover::GoneGirl),
];

/// Errors decoding a stored catalog
#[derive(Error, Debug)]
pub enum CodecError {
    /// Not valid JSON, or records with the wrong shape
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON whose top level is not an array
    #[error("Stored catalog is not a list (found {found})")]
    NotASequence { found: &'static str },
}

/// A book as it appears on disk
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredBook {
    id: String,
    name: String,
    author: String,
    genre: String,
    rating: f64,
    description: String,
    #[serde(default)]
    img_url: String,
    #[serde(default)]
    read: bool,
}

impl From<&Book> for StoredBook {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            author: book.author.clone(),
            genre: book.genre.clone(),
            rating: book.rating,
            description: book.description.clone(),
            img_url: encode_cover(&book.cover),
            read: book.read,
        }
    }
}

impl From<StoredBook> for Book {
    fn from(stored: StoredBook) -> Self {
        Self {
            cover: decode_cover(&stored.img_url),
            id: stored.id,
            name: stored.name,
            author: stored.author,
            genre: stored.genre,
            rating: stored.rating,
            description: stored.description,
            read: stored.read,
        }
    }
}

/// Token for a bundled cover
pub fn builtin_token(cover: BuiltinCover) -> &'static str {
    BUILTIN_COVERS
        .iter()
        .find(|(_, c)| *c == cover)
        .map(|(token, _)| *token)
        .unwrap_or(BUILTIN_PREFIX)
}

/// Bundled cover for a token, if the token is known
pub fn builtin_from_token(token: &str) -> Option<BuiltinCover> {
    BUILTIN_COVERS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|(_, cover)| *cover)
}

/// Stored `imgUrl` value for a cover
///
/// Exact round trip holds for canonical covers, the ones [`decode_cover`]
/// produces. `Cover::Url("")` reads back as `Cover::None`, and a `Url`
/// holding a known token reads back as the matching `Cover::Builtin`.
pub fn encode_cover(cover: &Cover) -> String {
    match cover {
        Cover::None => String::new(),
        Cover::Builtin(builtin) => builtin_token(*builtin).to_string(),
        Cover::Url(url) => url.clone(),
    }
}

/// Cover for a stored `imgUrl` value
pub fn decode_cover(img_url: &str) -> Cover {
    if img_url.is_empty() {
        return Cover::None;
    }
    match builtin_from_token(img_url) {
        Some(builtin) => Cover::Builtin(builtin),
        None => Cover::Url(img_url.to_string()),
    }
}

/// Serialize a catalog to its stored JSON form
pub fn encode(catalog: &Catalog) -> Result<String, CodecError> {
    let stored: Vec<StoredBook> = catalog.iter().map(StoredBook::from).collect();
    Ok(serde_json::to_string(&stored)?)
}

/// Parse a stored catalog
pub fn decode(json: &str) -> Result<Catalog, CodecError> {
    let value: Value = serde_json::from_str(json)?;
    if !value.is_array() {
        return Err(CodecError::NotASequence {
            found: json_kind(&value),
        });
    }

    let stored: Vec<StoredBook> = serde_json::from_value(value)?;
    Ok(Catalog::from_books(
        stored.into_iter().map(Book::from).collect(),
    ))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
