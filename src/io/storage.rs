//! Object storage boundary with filesystem and in-memory backends

use crate::io::error::{AugmentError, Result, WithObject, invalid_parameter};
use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Minimal object store interface used by the event handler
pub trait ObjectStore {
    /// Read the full contents of `key` in `bucket`
    ///
    /// # Errors
    ///
    /// Returns an error if the object is missing or cannot be read
    fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Store `bytes` under `key` in `bucket`, replacing any existing object
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be written
    fn write(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Object store backed by a directory tree, one sub-directory per bucket
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding all buckets
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path of an object
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket or key is empty, absolute, or escapes
    /// its bucket directory
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf> {
        Self::check_component("bucket", bucket)?;
        Self::check_component("key", key)?;
        Ok(self.root.join(bucket).join(key))
    }

    fn check_component(parameter: &'static str, value: &str) -> Result<()> {
        let path = Path::new(value);
        let escapes = path
            .components()
            .any(|component| !matches!(component, Component::Normal(_)));
        if value.is_empty() || escapes {
            return Err(invalid_parameter(
                parameter,
                &value,
                &"must be a non-empty relative path without '..'",
            ));
        }
        Ok(())
    }
}

impl ObjectStore for FsStore {
    fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let path = self.object_path(bucket, key)?;
        std::fs::read(path).for_object(bucket, key, "read")
    }

    fn write(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.object_path(bucket, key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).for_object(bucket, key, "create bucket directory")?;
        }
        std::fs::write(path, bytes).for_object(bucket, key, "write")
    }
}

/// Object store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an object
    pub fn insert(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((bucket.to_string(), key.to_string()), bytes);
    }

    /// Copy of an object's bytes, if present
    pub fn get(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Sorted keys stored in `bucket`
    pub fn keys(&self, bucket: &str) -> Vec<String> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|(stored_bucket, _)| stored_bucket == bucket)
            .map(|(_, key)| key.clone())
            .collect()
    }
}

impl ObjectStore for MemoryStore {
    fn read(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        self.get(bucket, key).ok_or_else(|| AugmentError::Storage {
            bucket: bucket.to_string(),
            key: key.to_string(),
            operation: "read",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "object not found"),
        })
    }

    fn write(&self, bucket: &str, key: &str, bytes: &[u8]) -> Result<()> {
        self.insert(bucket, key, bytes.to_vec());
        Ok(())
    }
}
