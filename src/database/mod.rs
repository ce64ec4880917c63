#[cfg(test)]
pub mod failing;
pub mod memory;
pub mod store;

pub use memory::MemoryStore;
pub use store::{Collection, DocumentStore, StoreError, UpdateCount};

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{oid::ObjectId, Document};
use mongodb::{Client, Database};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, StoreError> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Pool compartilhado por todos os requests
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));
        client_options.app_name = Some("gpuhunt-api".to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        Ok(Self { db })
    }

    fn collection(&self, collection: Collection) -> mongodb::Collection<Document> {
        self.db.collection(collection.name())
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<ObjectId, StoreError> {
        let result = self.collection(collection).insert_one(document).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError::UnexpectedId(result.inserted_id.to_string()))
    }

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError> {
        Ok(self.collection(collection).find_one(filter).await?)
    }

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError> {
        let cursor = self.collection(collection).find(filter).await?;
        Ok(cursor.try_collect().await?)
    }

    async fn update_one(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError> {
        let result = self.collection(collection).update_one(filter, update).await?;
        Ok(UpdateCount {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn update_many(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError> {
        let result = self.collection(collection).update_many(filter, update).await?;
        Ok(UpdateCount {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection(collection).delete_one(filter).await?.deleted_count)
    }

    async fn delete_many(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection(collection).delete_many(filter).await?.deleted_count)
    }

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        Ok(self.collection(collection).count_documents(filter).await?)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.db.list_collection_names().await?;
        Ok(())
    }
}

/// Opens the store named by `DATABASE_URL`. `memory://` selects the
/// in-process store, anything else is handed to the MongoDB driver.
pub async fn connect(config: &AppConfig) -> Result<std::sync::Arc<dyn DocumentStore>, StoreError> {
    if config.database_url.starts_with("memory://") {
        log::warn!("⚠️  Using in-memory store, data is lost on shutdown");
        return Ok(std::sync::Arc::new(MemoryStore::new()));
    }

    log::info!("📊 Connecting to MongoDB database: {}", config.database_name);
    let db = MongoDB::new(&config.database_url, &config.database_name).await?;
    Ok(std::sync::Arc::new(db))
}
