//! Seed dataset
//!
//! Used on first run and whenever stored data cannot be read.

use crate::catalog::Catalog;
use crate::models::{Book, BuiltinCover, Cover};

/// Number of books in the seed dataset
pub const SEED_LEN: usize = 3;

/// Build the fixed seed catalog
pub fn seed_catalog() -> Catalog {
    Catalog::from_books(seed_books())
}

/// The fixed seed books, in display order
pub fn seed_books() -> Vec<Book> {
    vec![
        seed_book(
            "1",
            "The Silent Patient",
            "Alex Michaelides",
            4.13,
            "Alicia Berenson s life is seemingly perfect. A famous painter married to an in-demand fashion photographer...",
            BuiltinCover::TheSilentPatient,
            false,
        ),
        seed_book(
            "2",
            "The Housemaid",
            "Freida McFadden",
            4.28,
            "Every day I clean the Winchesters' beautiful house top to bottom...",
            BuiltinCover::TheHousemaid,
            true,
        ),
        seed_book(
            "3",
            "Gone Girl",
            "Gillian Flynn",
            4.15,
            "Who are you? What have we done to each other?...",
            BuiltinCover::GoneGirl,
            false,
        ),
    ]
}

fn seed_book(
    id: &str,
    name: &str,
    author: &str,
    rating: f64,
    description: &str,
    cover: BuiltinCover,
    read: bool,
) -> Book {
    let mut book = Book::with_id(id, name, author, rating);
    book.genre = "Thriller".to_string();
    book.description = description.to_string();
    book.cover = Cover::Builtin(cover);
    book.read = read;
    book
}
