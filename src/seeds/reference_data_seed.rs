use crate::database::{Collection, DocumentStore};
use crate::models::{Blog, Category};
use mongodb::bson::{self, doc, Document};

/// Seeds the read-only collections (categories, blogs).
/// Only inserts into a collection that is empty.
pub async fn seed_reference_data(store: &dyn DocumentStore) {
    seed_collection(store, Collection::Categories, default_categories()).await;
    seed_collection(store, Collection::Blogs, default_blogs()).await;
}

async fn seed_collection<T: serde::Serialize>(store: &dyn DocumentStore, collection: Collection, items: Vec<T>) {
    let name = collection.name();

    let count = match store.count(collection, doc! {}).await {
        Ok(count) => count,
        Err(e) => {
            log::error!("   ❌ Failed to count {}: {}", name, e);
            return;
        }
    };

    if count > 0 {
        log::info!("📋 {}: {} documents already in DB, skipping seed", name, count);
        return;
    }

    log::info!("📋 {}: seeding {} default documents...", name, items.len());

    let mut inserted = 0;
    for item in &items {
        let document: Document = match bson::to_document(item) {
            Ok(document) => document,
            Err(e) => {
                log::error!("   ❌ Failed to encode {} seed: {}", name, e);
                continue;
            }
        };
        match store.insert_one(collection, document).await {
            Ok(_) => inserted += 1,
            Err(e) => log::error!("   ❌ Failed to seed {}: {}", name, e),
        }
    }

    log::info!("   ✅ Inserted {} documents into {}", inserted, name);
}

fn default_categories() -> Vec<Category> {
    [
        ("NVIDIA GeForce", "/images/categories/geforce.png"),
        ("AMD Radeon", "/images/categories/radeon.png"),
        ("Intel Arc", "/images/categories/arc.png"),
    ]
    .into_iter()
    .map(|(name, image_url)| Category {
        id: None,
        name: name.into(),
        image_url: image_url.into(),
    })
    .collect()
}

fn default_blogs() -> Vec<Blog> {
    vec![
        Blog {
            id: None,
            title: "SQL vs NoSQL databases".into(),
            body: "Relational databases store rows in tables with a fixed schema and join them at query time. \
                   Document databases store self-contained JSON-like documents whose shape can vary, trading \
                   joins and multi-row transactions for flexible schemas and simple horizontal scaling."
                .into(),
            author: Some("GPUHunt".into()),
        },
        Blog {
            id: None,
            title: "What is a JWT and how does it work?".into(),
            body: "A JSON Web Token is a signed, base64url-encoded set of claims. The server signs the claims \
                   with a secret; later requests send the token back as a bearer credential and the server \
                   checks the signature and expiry before trusting the claims."
                .into(),
            author: Some("GPUHunt".into()),
        },
        Blog {
            id: None,
            title: "How to check a used GPU before you buy".into(),
            body: "Ask for a stress-test screenshot, inspect the fans and the PCB for heat damage, compare the \
                   serial number with the box, and meet somewhere you can power the card on."
                .into(),
            author: Some("GPUHunt".into()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::MemoryStore;

    #[tokio::test]
    async fn test_seed_only_fills_empty_collections() {
        let store = MemoryStore::new();
        store.insert_one(Collection::Blogs, doc! { "title": "mine", "body": "x" }).await.unwrap();

        seed_reference_data(&store).await;
        seed_reference_data(&store).await;

        assert_eq!(store.count(Collection::Categories, doc! {}).await.unwrap(), 3);
        assert_eq!(store.count(Collection::Blogs, doc! {}).await.unwrap(), 1);
    }
}
