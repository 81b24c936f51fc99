//! Storage layer
//!
//! The catalog is persisted as a single text blob under one key. Any
//! [`BlobStore`] can hold it:
//!
//! - **file**: one file per key, written atomically
//! - **sqlite**: one row per key in a `blobs` table
//! - **memory**: a map, for tests and embedding

pub mod blob;
pub mod error;
pub mod file;
pub mod sqlite;

use anyhow::{Context, Result};

use crate::config::{Backend, Config};

pub use blob::{BlobStore, MemoryBlobStore};
pub use error::{StorageError, StorageResult};
pub use file::FileBlobStore;
pub use sqlite::SqliteBlobStore;

/// Open the blob store selected by the configuration
pub fn open_backend(config: &Config) -> Result<Box<dyn BlobStore>> {
    let store: Box<dyn BlobStore> = match config.backend {
        Backend::File => Box::new(FileBlobStore::new(config.data_dir.clone())),
        Backend::Sqlite => {
            let path = config.sqlite_path();
            Box::new(
                SqliteBlobStore::open(&path)
                    .with_context(|| format!("Failed to open SQLite database at {:?}", path))?,
            )
        }
    };
    Ok(store)
}
