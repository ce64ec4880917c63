use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Document};
use thiserror::Error;

/// Collections used by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Users,
    Products,
    Orders,
    Reports,
    Categories,
    Blogs,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Products => "products",
            Collection::Orders => "orders",
            Collection::Reports => "reports",
            Collection::Categories => "categories",
            Collection::Blogs => "blogs",
        }
    }
}

/// Result of an update: how many documents matched the filter and how many
/// actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateCount {
    pub matched: u64,
    pub modified: u64,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("Unsupported query operator: {0}")]
    UnsupportedOperator(String),

    #[error("Store returned a non-ObjectId identifier: {0}")]
    UnexpectedId(String),
}

/// Document store consumed by the services.
///
/// Filters and updates use MongoDB query syntax. Every call is a single
/// document-level operation; nothing here spans collections.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert_one(&self, collection: Collection, document: Document) -> Result<ObjectId, StoreError>;

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError>;

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError>;

    async fn update_one(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError>;

    async fn update_many(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError>;

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, StoreError>;

    async fn delete_many(&self, collection: Collection, filter: Document) -> Result<u64, StoreError>;

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, StoreError>;

    /// Round trip to the backing store.
    async fn ping(&self) -> Result<(), StoreError>;
}
