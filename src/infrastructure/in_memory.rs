use crate::domain::ports::CollectionStore;
use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store of named collections.
///
/// Each collection is held as a JSON array under its name, so reads and
/// writes go through the same serialization path as the persistent backend.
/// `Clone` shares the underlying map; ideal for tests.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, serde_json::Value>>>,
}

impl InMemoryStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CollectionStore for InMemoryStore {
    async fn get_all<T>(&self, name: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        let collections = self.collections.read().await;
        match collections.get(name) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Vec::new()),
        }
    }

    async fn save<T>(&self, name: &str, items: &[T]) -> Result<()>
    where
        T: Serialize + Sync,
    {
        let value = serde_json::to_value(items)?;
        let mut collections = self.collections.write().await;
        collections.insert(name.to_string(), value);
        Ok(())
    }
}
