use crate::domain::ports::CollectionStore;
use crate::error::Result;
use async_trait::async_trait;
use rocksdb::{DB, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

/// A persistent named-collection store backed by RocksDB.
///
/// Each collection lives under a single key (its name) holding the whole
/// JSON-encoded list, mirroring the durable-but-unsynchronized local storage
/// the flow was designed against. No partial updates exist at this layer.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbStore {
    db: Arc<DB>,
}

impl RocksDbStore {
    /// Opens or creates a RocksDB instance at the specified path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db: Arc::new(db) })
    }
}

#[async_trait]
impl CollectionStore for RocksDbStore {
    async fn get_all<T>(&self, name: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.db.get(name.as_bytes())? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T>(&self, name: &str, items: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let bytes = serde_json::to_vec(items)?;
        self.db.put(name.as_bytes(), bytes)?;
        Ok(())
    }
}
