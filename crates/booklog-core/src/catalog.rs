//! The catalog value
//!
//! A `Catalog` is an ordered, immutable snapshot of books. Mutations return a
//! new catalog and leave the original untouched, so a filtered view taken
//! from an older snapshot stays valid while the store moves on.

use std::sync::Arc;

use crate::models::{Book, FilterCriteria};

/// Ordered collection of books (cheap to clone)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    books: Arc<Vec<Book>>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog from books in display order
    pub fn from_books(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(books),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Look up a book by exact ID
    pub fn get(&self, id: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Number of books marked as read
    pub fn read_count(&self) -> usize {
        self.books.iter().filter(|b| b.read).count()
    }

    /// New catalog with `book` placed first
    pub fn with_prepended(&self, book: Book) -> Self {
        let mut books = Vec::with_capacity(self.books.len() + 1);
        books.push(book);
        books.extend(self.books.iter().cloned());
        Self::from_books(books)
    }

    /// New catalog with the read flag of `id` flipped
    ///
    /// An unknown ID yields an identical catalog.
    pub fn with_read_toggled(&self, id: &str) -> Self {
        let books = self
            .books
            .iter()
            .map(|b| {
                if b.id == id {
                    Book {
                        read: !b.read,
                        ..b.clone()
                    }
                } else {
                    b.clone()
                }
            })
            .collect();
        Self::from_books(books)
    }

    /// Whether this catalog and `other` share the same snapshot
    pub fn ptr_eq(&self, other: &Catalog) -> bool {
        Arc::ptr_eq(&self.books, &other.books)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Book;
    type IntoIter = std::slice::Iter<'a, Book>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Book>> for Catalog {
    fn from(books: Vec<Book>) -> Self {
        Self::from_books(books)
    }
}

/// Books matching every criterion, in catalog order
pub fn filter(catalog: &Catalog, criteria: &FilterCriteria) -> Vec<Book> {
    catalog
        .iter()
        .filter(|book| criteria.matches(book))
        .cloned()
        .collect()
}

/// Look up a single book by ID
pub fn select(catalog: &Catalog, id: &str) -> Option<Book> {
    catalog.get(id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::seed_catalog;

    #[test]
    fn test_filter_by_name() {
        let catalog = seed_catalog();
        let result = filter(&catalog, &FilterCriteria::by_name("house"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "The Housemaid");
    }

    #[test]
    fn test_filter_by_id_prefix() {
        let catalog = seed_catalog();
        let result = filter(&catalog, &FilterCriteria::by_id("1"));
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, "1");
    }

    #[test]
    fn test_filter_empty_criteria_returns_all_in_order() {
        let catalog = seed_catalog();
        let result = filter(&catalog, &FilterCriteria::default());
        let ids: Vec<_> = result.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_filter_combines_criteria() {
        let catalog = seed_catalog();
        let criteria = FilterCriteria {
            id: String::new(),
            name: "g".into(),
            author: "flynn".into(),
        };
        let result = filter(&catalog, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Gone Girl");

        let none = FilterCriteria {
            id: "1".into(),
            name: "gone".into(),
            author: String::new(),
        };
        assert!(filter(&catalog, &none).is_empty());
    }

    #[test]
    fn test_select() {
        let catalog = seed_catalog();
        assert_eq!(select(&catalog, "3").unwrap().name, "Gone Girl");
        assert!(select(&catalog, "42").is_none());
        // exact match only, unlike the ID filter
        assert!(select(&Catalog::new(), "1").is_none());
    }

    #[test]
    fn test_with_prepended() {
        let catalog = seed_catalog();
        let book = Book::new("Dune", "Frank Herbert", 4.5);
        let next = catalog.with_prepended(book.clone());

        assert_eq!(next.len(), 4);
        assert_eq!(next.books()[0], book);
        assert_eq!(&next.books()[1..], catalog.books());
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_with_read_toggled() {
        let catalog = seed_catalog();
        let next = catalog.with_read_toggled("1");

        assert!(next.get("1").unwrap().read);
        assert!(!catalog.get("1").unwrap().read);
        assert_eq!(next.get("2"), catalog.get("2"));

        let back = next.with_read_toggled("1");
        assert_eq!(back, catalog);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let catalog = seed_catalog();
        let next = catalog.with_read_toggled("missing");
        assert_eq!(next, catalog);
    }

    #[test]
    fn test_snapshot_survives_mutation() {
        let catalog = seed_catalog();
        let snapshot = catalog.clone();
        assert!(snapshot.ptr_eq(&catalog));

        let next = catalog.with_read_toggled("2");
        assert!(!next.ptr_eq(&snapshot));
        assert!(snapshot.get("2").unwrap().read);
        assert!(!next.get("2").unwrap().read);
    }

    #[test]
    fn test_read_count() {
        assert_eq!(seed_catalog().read_count(), 1);
    }
}
