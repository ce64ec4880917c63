use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};

use super::memory::MemoryStore;
use super::store::{Collection, DocumentStore, StoreError, UpdateCount};

/// `MemoryStore` whose updates on one collection always fail.
pub struct FailingStore {
    inner: MemoryStore,
    failing: Collection,
}

impl FailingStore {
    pub fn failing_updates_on(collection: Collection) -> Self {
        Self {
            inner: MemoryStore::new(),
            failing: collection,
        }
    }

    pub fn inner(&self) -> &MemoryStore {
        &self.inner
    }

    fn check(&self, collection: Collection) -> Result<(), StoreError> {
        if collection == self.failing {
            Err(StoreError::UnsupportedOperator(format!("update on {} rejected", collection.name())))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FailingStore {
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<ObjectId, StoreError> {
        self.inner.insert_one(collection, document).await
    }

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError> {
        self.inner.find_one(collection, filter).await
    }

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError> {
        self.inner.find(collection, filter).await
    }

    async fn update_one(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError> {
        self.check(collection)?;
        self.inner.update_one(collection, filter, update).await
    }

    async fn update_many(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError> {
        self.check(collection)?;
        self.inner.update_many(collection, filter, update).await
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        self.inner.delete_one(collection, filter).await
    }

    async fn delete_many(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        self.inner.delete_many(collection, filter).await
    }

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        self.inner.count(collection, filter).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
