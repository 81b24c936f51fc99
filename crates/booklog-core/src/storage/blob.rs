//! Key/value blob stores
//!
//! A blob store holds opaque text values under string keys. Writes replace
//! the whole value; there are no partial updates.

use std::collections::HashMap;

use super::error::StorageResult;

/// Durable (or in-memory) text storage addressed by key
pub trait BlobStore {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replace the value stored under `key`
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Size in bytes of the value stored under `key`, if any
    fn stored_size(&self, key: &str) -> StorageResult<Option<u64>>;

    /// Short name used in logs and status output
    fn backend_name(&self) -> &'static str;
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn stored_size(&self, key: &str) -> StorageResult<Option<u64>> {
        (**self).stored_size(key)
    }

    fn backend_name(&self) -> &'static str {
        (**self).backend_name()
    }
}

/// Blob store kept entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    values: HashMap<String, String>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value
    pub fn with_value(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.into(), value.into());
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn stored_size(&self, key: &str) -> StorageResult<Option<u64>> {
        Ok(self.values.get(key).map(|v| v.len() as u64))
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
