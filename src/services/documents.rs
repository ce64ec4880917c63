//! Typed reads on top of the untyped `DocumentStore`.

use mongodb::bson::{self, oid::ObjectId, Document};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::database::{Collection, DocumentStore};
use crate::utils::error::{AppError, AppResult};

/// Documents that fail to decode are logged and left out of the result.
pub async fn find_all<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: Document,
) -> AppResult<Vec<T>> {
    let documents = store.find(collection, filter).await?;
    let mut items = Vec::with_capacity(documents.len());
    for document in documents {
        match bson::from_document(document) {
            Ok(item) => items.push(item),
            Err(e) => log::error!("❌ Skipping undecodable document in {}: {}", collection.name(), e),
        }
    }
    Ok(items)
}

pub async fn find_first<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: Collection,
    filter: Document,
) -> AppResult<Option<T>> {
    match store.find_one(collection, filter).await? {
        Some(document) => Ok(Some(bson::from_document(document)?)),
        None => Ok(None),
    }
}

pub async fn insert<T: Serialize>(store: &dyn DocumentStore, collection: Collection, item: &T) -> AppResult<ObjectId> {
    let document = bson::to_document(item)?;
    Ok(store.insert_one(collection, document).await?)
}

/// Parses a path id; malformed ids are a client error, not a store failure.
pub fn parse_object_id(raw: &str, what: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidRequest(format!("Invalid {} ID: {}", what, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_find_all_skips_undecodable_documents() {
        use crate::database::MemoryStore;
        use crate::models::Report;
        use mongodb::bson::doc;

        let store = MemoryStore::new();
        store
            .insert_one(Collection::Reports, doc! { "reportedByEmail": "a@x.com", "productId": "p1" })
            .await
            .unwrap();
        store.insert_one(Collection::Reports, doc! { "productId": 42 }).await.unwrap();

        let reports: Vec<Report> = find_all(&store, Collection::Reports, doc! {}).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].reported_by_email, "a@x.com");
    }

    #[test]
    fn test_parse_object_id() {
        let id = ObjectId::new();
        assert_eq!(parse_object_id(&id.to_hex(), "product").unwrap(), id);
        assert!(matches!(parse_object_id("nope", "product"), Err(AppError::InvalidRequest(_))));
    }
}
