//! booklog Core Library
//!
//! This crate provides the core functionality for booklog, a local-first
//! books catalog: an ordered list of books that can be filtered, extended
//! and marked as read, persisted as a single JSON blob.
//!
//! # Architecture
//!
//! - **Catalog**: immutable snapshots; every mutation builds a new one
//! - **BlobStore**: durable key/value text storage (file, SQLite or memory)
//!
//! Stored data that cannot be read falls back to a fixed seed dataset.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = CatalogStore::open_with_config(&Config::load()?)?;
//!
//! let mut draft = Draft::new();
//! draft.name = "Dune".into();
//! draft.author = "Frank Herbert".into();
//! draft.set_rating("4,5");
//! let book = store.add(&draft)?;
//!
//! let matches = store.filter(&FilterCriteria::by_author("herbert"));
//! ```
//!
//! # Modules
//!
//! - `store`: Catalog store (main entry point)
//! - `catalog`: Catalog snapshots, `filter` and `select`
//! - `models`: Books, covers, drafts and filter criteria
//! - `validation`: Draft validation rules
//! - `codec`: Stored JSON format and built-in cover tokens
//! - `seed`: Fallback dataset
//! - `storage`: Blob store backends
//! - `config`: Application configuration

pub mod catalog;
pub mod codec;
pub mod config;
pub mod models;
pub mod seed;
pub mod storage;
pub mod store;
pub mod validation;

pub use catalog::{filter, select, Catalog};
pub use codec::CodecError;
pub use config::{Backend, Config};
pub use models::{Book, BuiltinCover, Cover, Draft, FilterCriteria, GENRES};
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore, SqliteBlobStore, StorageError};
pub use store::{load, CatalogStore, DraftField, LoadSource, View};
pub use validation::ValidationError;
