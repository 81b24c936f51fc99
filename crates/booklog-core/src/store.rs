//! Catalog store
//!
//! The `CatalogStore` owns the book collection and keeps it in step with a
//! [`BlobStore`]. Every successful mutation replaces the in-memory catalog
//! with a new snapshot and then writes the whole catalog under one key.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = CatalogStore::open_with_config(&Config::load()?)?;
//!
//! let book = store.add(&draft)?;
//! store.toggle_read(&book.id);
//!
//! let thrillers = store.filter(&FilterCriteria::by_name("girl"));
//! ```
//!
//! Besides the collection, the store holds the UI-facing state that
//! surrounds it: the current filter, the add-book draft and the selected
//! book (list view vs. details view).

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::catalog::{self, Catalog};
use crate::codec;
use crate::config::Config;
use crate::models::{Book, Draft, FilterCriteria};
use crate::seed::seed_catalog;
use crate::storage::{open_backend, BlobStore, StorageResult};
use crate::validation::ValidationError;

/// Where the catalog came from when the store was opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from storage
    Stored,
    /// Nothing was stored under the key
    SeedEmpty,
    /// Stored data could not be read or decoded
    SeedRecovered { reason: String },
}

impl LoadSource {
    pub fn is_seed(&self) -> bool {
        !matches!(self, LoadSource::Stored)
    }
}

/// What the UI should currently show
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    /// The (filtered) list of books
    List,
    /// Details for the selected book
    Details(&'a Book),
    /// A book was selected but no longer exists
    NotFound(&'a str),
}

/// Fields of the add-book draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Author,
    Genre,
    Rating,
    Description,
    ImgUrl,
}

/// Read the catalog stored under `key`
///
/// Never fails: a missing key, unreadable storage, invalid JSON or a
/// non-array value all yield the seed dataset.
pub fn load<B: BlobStore + ?Sized>(blobs: &B, key: &str) -> Catalog {
    load_with_source(blobs, key).0
}

/// Like [`load`], also reporting whether the seed dataset was used
pub fn load_with_source<B: BlobStore + ?Sized>(blobs: &B, key: &str) -> (Catalog, LoadSource) {
    let raw = match blobs.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored catalog, using seed data");
            return (seed_catalog(), LoadSource::SeedEmpty);
        }
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored catalog, using seed data");
            return (
                seed_catalog(),
                LoadSource::SeedRecovered {
                    reason: e.to_string(),
                },
            );
        }
    };

    match codec::decode(&raw) {
        Ok(catalog) => {
            debug!(key, books = catalog.len(), "Loaded stored catalog");
            (catalog, LoadSource::Stored)
        }
        Err(e) => {
            warn!(key, error = %e, "Stored catalog is unreadable, using seed data");
            (
                seed_catalog(),
                LoadSource::SeedRecovered {
                    reason: e.to_string(),
                },
            )
        }
    }
}

/// Write the whole catalog under `key`
pub fn save<B: BlobStore + ?Sized>(blobs: &mut B, key: &str, catalog: &Catalog) -> StorageResult<()> {
    let json = codec::encode(catalog)?;
    blobs.set(key, &json)
}

/// Owns the catalog and its durable copy
pub struct CatalogStore<B: BlobStore = Box<dyn BlobStore>> {
    blobs: B,
    key: String,
    catalog: Catalog,
    source: LoadSource,
    dirty: bool,
    filter: FilterCriteria,
    draft: Draft,
    selected: Option<String>,
}

impl CatalogStore {
    /// Open the store described by the configuration
    pub fn open_with_config(config: &Config) -> Result<Self> {
        let blobs = open_backend(config).context("Failed to open storage backend")?;
        Ok(CatalogStore::open(blobs, config.storage_key.clone()))
    }
}

impl<B: BlobStore> CatalogStore<B> {
    /// Load the catalog from `blobs`, falling back to the seed dataset
    pub fn open(blobs: B, key: impl Into<String>) -> Self {
        let key = key.into();
        let (catalog, source) = load_with_source(&blobs, &key);
        info!(
            backend = blobs.backend_name(),
            key = %key,
            books = catalog.len(),
            seeded = source.is_seed(),
            "Catalog store opened"
        );

        Self {
            blobs,
            key,
            catalog,
            source,
            dirty: false,
            filter: FilterCriteria::default(),
            draft: Draft::default(),
            selected: None,
        }
    }

    /// Current catalog snapshot (cheap to clone, never invalidated)
    pub fn catalog(&self) -> Catalog {
        self.catalog.clone()
    }

    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn load_source(&self) -> &LoadSource {
        &self.source
    }

    pub fn backend(&self) -> &B {
        &self.blobs
    }

    /// True when the last write to storage failed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    // ==================== Mutations ====================

    /// Validate a draft and prepend the resulting book
    ///
    /// On a validation failure the catalog is left untouched.
    pub fn add(&mut self, draft: &Draft) -> Result<Book, ValidationError> {
        let validated = draft.validate().inspect_err(|e| {
            debug!(field = e.field(), error = %e, "Rejected draft");
        })?;

        let book = validated.into_book(self.fresh_id());
        self.catalog = self.catalog.with_prepended(book.clone());
        info!(id = %book.id, name = %book.name, "Added book");

        self.persist();
        Ok(book)
    }

    /// Flip the read flag of a book; unknown IDs are ignored
    pub fn toggle_read(&mut self, id: &str) {
        let next = self.catalog.with_read_toggled(id);
        match next.get(id) {
            Some(book) => info!(id, read = book.read, "Toggled read flag"),
            None => debug!(id, "Toggle for unknown book ignored"),
        }
        self.catalog = next;

        self.persist();
    }

    /// Replace the stored catalog with the seed dataset
    pub fn reset(&mut self) -> StorageResult<()> {
        self.catalog = seed_catalog();
        self.selected = None;
        self.dirty = true;
        info!(key = %self.key, "Catalog reset to seed data");
        self.save()
    }

    // ==================== Queries ====================

    /// Books matching `criteria`, in catalog order
    pub fn filter(&self, criteria: &FilterCriteria) -> Vec<Book> {
        catalog::filter(&self.catalog, criteria)
    }

    /// Look up a book by ID
    pub fn select(&self, id: &str) -> Option<Book> {
        catalog::select(&self.catalog, id)
    }

    // ==================== Filter ====================

    pub fn filter_criteria(&self) -> &FilterCriteria {
        &self.filter
    }

    pub fn set_filter(&mut self, criteria: FilterCriteria) {
        debug!(?criteria, "Filter updated");
        self.filter = criteria;
    }

    /// Books matching the current filter
    pub fn filtered_books(&self) -> Vec<Book> {
        self.filter(&self.filter)
    }

    // ==================== Draft ====================

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Update one draft field as typed
    pub fn update_draft(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Name => self.draft.name = value.to_string(),
            DraftField::Author => self.draft.author = value.to_string(),
            DraftField::Genre => self.draft.genre = value.to_string(),
            DraftField::Rating => self.draft.set_rating(value),
            DraftField::Description => self.draft.description = value.to_string(),
            DraftField::ImgUrl => self.draft.img_url = value.to_string(),
        }
    }

    /// Add the current draft; it is cleared only on success
    pub fn submit_draft(&mut self) -> Result<Book, ValidationError> {
        let draft = self.draft.clone();
        let book = self.add(&draft)?;
        self.draft.clear();
        Ok(book)
    }

    /// Discard the current draft
    pub fn cancel_draft(&mut self) {
        self.draft.clear();
    }

    // ==================== Selection ====================

    /// Switch to the details view for `id`
    pub fn open_details(&mut self, id: impl Into<String>) {
        let id = id.into();
        debug!(id = %id, "Navigation changed");
        self.selected = Some(id);
    }

    /// Switch back to the list view
    pub fn back_to_list(&mut self) {
        debug!("Navigation changed");
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn view(&self) -> View<'_> {
        match self.selected.as_deref() {
            None => View::List,
            Some(id) => match self.catalog.get(id) {
                Some(book) => View::Details(book),
                None => View::NotFound(id),
            },
        }
    }

    // ==================== Persistence ====================

    /// Write the current catalog to storage
    pub fn save(&mut self) -> StorageResult<()> {
        save(&mut self.blobs, &self.key, &self.catalog)?;
        self.dirty = false;
        debug!(key = %self.key, books = self.catalog.len(), "Catalog saved");
        Ok(())
    }

    /// Retry a failed write; a no-op when storage is up to date
    pub fn flush(&mut self) -> StorageResult<()> {
        if self.dirty {
            self.save()?;
        }
        Ok(())
    }

    /// Save after a mutation, keeping the store dirty on failure
    fn persist(&mut self) {
        self.dirty = true;
        match self.save() {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!(key = %self.key, error = %e, "Failed to save catalog, will retry on flush");
            }
            Err(e) => error!(key = %self.key, error = %e, "Failed to save catalog"),
        }
    }

    fn fresh_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().to_string();
            if !self.catalog.contains(&id) {
                return id;
            }
        }
    }
}
