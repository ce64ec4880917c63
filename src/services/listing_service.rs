use mongodb::bson::{doc, oid::ObjectId, Document};

use crate::database::{Collection, DocumentStore, UpdateCount};
use crate::models::{Listing, NewListing};
use crate::services::documents::{find_all, insert, parse_object_id};
use crate::services::role_service;
use crate::utils::error::{AppError, AppResult};

/// The one "available" predicate: neither paid nor sold. Fields that are
/// absent count as false.
pub fn available_filter() -> Document {
    doc! {
        "paid": { "$ne": true },
        "sold": { "$ne": true },
    }
}

fn with_availability(mut filter: Document) -> Document {
    for (field, condition) in available_filter() {
        filter.insert(field, condition);
    }
    filter
}

pub async fn create(store: &dyn DocumentStore, request: NewListing) -> AppResult<ObjectId> {
    if request.seller_email.trim().is_empty() {
        return Err(AppError::InvalidRequest("sellerEmail is required".to_string()));
    }
    if !request.price.is_finite() || request.price < 0.0 {
        return Err(AppError::InvalidRequest(format!("Invalid price: {}", request.price)));
    }

    // Listings of a verified seller start out verified
    let verified = role_service::is_verified(store, &request.seller_email).await?;

    let listing = Listing {
        id: None,
        seller_email: request.seller_email,
        seller_name: request.seller_name,
        product_name: request.product_name,
        product_category: request.product_category,
        price: request.price,
        original_price: request.original_price,
        condition: request.condition,
        location: request.location,
        years_of_use: request.years_of_use,
        description: request.description,
        image_url: request.image_url,
        advertised: request.advertised,
        paid: request.paid,
        sold: request.sold,
        verified,
        posted_at: chrono::Utc::now().timestamp(),
    };

    let id = insert(store, Collection::Products, &listing).await?;
    log::info!("✅ Listing {} created by {}", id.to_hex(), listing.seller_email);
    Ok(id)
}

/// Advertised listings that are still available
pub async fn list_advertised(store: &dyn DocumentStore) -> AppResult<Vec<Listing>> {
    find_all(store, Collection::Products, with_availability(doc! { "advertised": true })).await
}

/// Available listings in a category
pub async fn list_by_category(store: &dyn DocumentStore, category: &str) -> AppResult<Vec<Listing>> {
    find_all(store, Collection::Products, with_availability(doc! { "productCategory": category })).await
}

/// Everything a seller has listed, sold or not
pub async fn list_by_seller(store: &dyn DocumentStore, seller_email: &str) -> AppResult<Vec<Listing>> {
    find_all(store, Collection::Products, doc! { "sellerEmail": seller_email }).await
}

pub async fn advertise(store: &dyn DocumentStore, listing_id: &str) -> AppResult<UpdateCount> {
    let id = parse_object_id(listing_id, "product")?;
    let count = store
        .update_one(Collection::Products, doc! { "_id": id }, doc! { "$set": { "advertised": true } })
        .await?;

    if count.matched == 0 {
        return Err(AppError::NotFound(format!("Product {} not found", listing_id)));
    }
    Ok(count)
}
