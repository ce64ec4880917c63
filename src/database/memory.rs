use std::collections::HashMap;

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, Bson, Document};
use tokio::sync::RwLock;

use super::store::{Collection, DocumentStore, StoreError, UpdateCount};

/// In-process document store.
///
/// Understands the subset of MongoDB query syntax the services use:
/// equality, `$eq`, `$ne` and `$in` in filters, `$set` and `$addToSet` in
/// updates. Anything else is rejected with `UnsupportedOperator`.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn filter_matches(document: &Document, filter: &Document) -> Result<bool, StoreError> {
    for (field, condition) in filter {
        let value = document.get(field);

        let is_operator_doc = matches!(condition, Bson::Document(d) if d.keys().next().is_some_and(|k| k.starts_with('$')));
        if !is_operator_doc {
            if value != Some(condition) {
                return Ok(false);
            }
            continue;
        }

        let Bson::Document(operators) = condition else {
            continue;
        };

        for (operator, operand) in operators {
            let ok = match operator.as_str() {
                "$eq" => value == Some(operand),
                // Missing fields satisfy $ne, as in MongoDB
                "$ne" => value != Some(operand),
                "$in" => match operand {
                    Bson::Array(candidates) => value.is_some_and(|v| candidates.contains(v)),
                    other => return Err(StoreError::UnsupportedOperator(format!("$in expects an array, got {}", other))),
                },
                other => return Err(StoreError::UnsupportedOperator(other.to_string())),
            };
            if !ok {
                return Ok(false);
            }
        }
    }
    Ok(true)
}

/// Applies an update document in place. Returns whether anything changed.
fn apply_update(document: &mut Document, update: &Document) -> Result<bool, StoreError> {
    let mut changed = false;

    for (operator, fields) in update {
        let Bson::Document(fields) = fields else {
            return Err(StoreError::UnsupportedOperator(format!("{} expects a document", operator)));
        };

        match operator.as_str() {
            "$set" => {
                for (field, value) in fields {
                    if document.get(field) != Some(value) {
                        document.insert(field.clone(), value.clone());
                        changed = true;
                    }
                }
            }
            "$addToSet" => {
                for (field, value) in fields {
                    match document.get_mut(field) {
                        Some(Bson::Array(items)) => {
                            if !items.contains(value) {
                                items.push(value.clone());
                                changed = true;
                            }
                        }
                        Some(_) => {
                            return Err(StoreError::UnsupportedOperator(format!("$addToSet on non-array field {}", field)));
                        }
                        None => {
                            document.insert(field.clone(), Bson::Array(vec![value.clone()]));
                            changed = true;
                        }
                    }
                }
            }
            other => return Err(StoreError::UnsupportedOperator(other.to_string())),
        }
    }

    Ok(changed)
}

impl MemoryStore {
    async fn update(&self, collection: Collection, filter: Document, update: Document, many: bool) -> Result<UpdateCount, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();
        let mut count = UpdateCount::default();

        for document in documents.iter_mut() {
            if !filter_matches(document, &filter)? {
                continue;
            }
            count.matched += 1;
            if apply_update(document, &update)? {
                count.modified += 1;
            }
            if !many {
                break;
            }
        }

        Ok(count)
    }

    async fn delete(&self, collection: Collection, filter: Document, many: bool) -> Result<u64, StoreError> {
        let mut collections = self.collections.write().await;
        let documents = collections.entry(collection).or_default();

        let mut doomed = Vec::new();
        for (index, document) in documents.iter().enumerate() {
            if filter_matches(document, &filter)? {
                doomed.push(index);
                if !many {
                    break;
                }
            }
        }

        for index in doomed.iter().rev() {
            documents.remove(*index);
        }

        Ok(doomed.len() as u64)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_one(&self, collection: Collection, mut document: Document) -> Result<ObjectId, StoreError> {
        let id = match document.get("_id") {
            Some(Bson::ObjectId(id)) => *id,
            Some(other) => return Err(StoreError::UnexpectedId(other.to_string())),
            None => {
                let id = ObjectId::new();
                document.insert("_id", id);
                id
            }
        };

        self.collections.write().await.entry(collection).or_default().push(document);
        Ok(id)
    }

    async fn find_one(&self, collection: Collection, filter: Document) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        for document in collections.get(&collection).into_iter().flatten() {
            if filter_matches(document, &filter)? {
                return Ok(Some(document.clone()));
            }
        }
        Ok(None)
    }

    async fn find(&self, collection: Collection, filter: Document) -> Result<Vec<Document>, StoreError> {
        let collections = self.collections.read().await;
        let mut found = Vec::new();
        for document in collections.get(&collection).into_iter().flatten() {
            if filter_matches(document, &filter)? {
                found.push(document.clone());
            }
        }
        Ok(found)
    }

    async fn update_one(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError> {
        self.update(collection, filter, update, false).await
    }

    async fn update_many(&self, collection: Collection, filter: Document, update: Document) -> Result<UpdateCount, StoreError> {
        self.update(collection, filter, update, true).await
    }

    async fn delete_one(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        self.delete(collection, filter, false).await
    }

    async fn delete_many(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        self.delete(collection, filter, true).await
    }

    async fn count(&self, collection: Collection, filter: Document) -> Result<u64, StoreError> {
        Ok(self.find(collection, filter).await?.len() as u64)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
