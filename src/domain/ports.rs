use crate::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Exposes the id a collection item is updated and deleted by.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Named-collection persistence contract.
///
/// Backends only supply whole-collection reads and writes. `add`, `update`
/// and `delete` are provided as read-modify-write over those two primitives,
/// so no backend can offer partial updates the engine would come to depend on.
/// There is no indexing or querying; callers filter after `get_all`.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    /// Reads the full collection, or an empty list if it was never written.
    async fn get_all<T>(&self, name: &str) -> Result<Vec<T>>
    where
        T: DeserializeOwned + Send;

    /// Replaces the full collection.
    async fn save<T>(&self, name: &str, items: &[T]) -> Result<()>
    where
        T: Serialize + Sync;

    async fn add<T>(&self, name: &str, item: T) -> Result<()>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
    {
        let mut items: Vec<T> = self.get_all(name).await?;
        items.push(item);
        self.save(name, &items).await
    }

    async fn update<T>(&self, name: &str, item: T) -> Result<()>
    where
        T: Keyed + Serialize + DeserializeOwned + Send + Sync,
    {
        let mut items: Vec<T> = self.get_all(name).await?;
        if let Some(slot) = items.iter_mut().find(|existing| existing.key() == item.key()) {
            *slot = item;
        }
        self.save(name, &items).await
    }

    async fn delete<T>(&self, name: &str, id: &str) -> Result<()>
    where
        T: Keyed + Serialize + DeserializeOwned + Send + Sync,
    {
        let mut items: Vec<T> = self.get_all(name).await?;
        items.retain(|existing| existing.key() != id);
        self.save(name, &items).await
    }
}
