use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{Collection, DocumentStore};
use crate::models::{Listing, NewOrder, Order};
use crate::services::documents::{find_all, find_first, insert, parse_object_id};
use crate::utils::error::{AppError, AppResult};

/// Checkout: records a buyer's order on an available listing. Orders always
/// start unpaid; payment goes through `consistency::pay_order`.
pub async fn create(store: &dyn DocumentStore, request: NewOrder) -> AppResult<ObjectId> {
    let listing_id = parse_object_id(&request.product_id, "product")?;
    if request.buyer_email.trim().is_empty() {
        return Err(AppError::InvalidRequest("buyerEmail is required".to_string()));
    }

    let listing: Listing = find_first(store, Collection::Products, doc! { "_id": listing_id })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product {} not found", request.product_id)))?;

    if listing.paid || listing.sold {
        return Err(AppError::Conflict(format!("Product {} is no longer available", request.product_id)));
    }

    let order = Order {
        id: None,
        product_id: listing_id.to_hex(),
        buyer_email: request.buyer_email,
        buyer_name: request.buyer_name,
        product_name: request.product_name.or(listing.product_name),
        price: request.price.or(Some(listing.price)),
        phone: request.phone,
        meeting_location: request.meeting_location,
        paid: false,
        created_at: chrono::Utc::now().timestamp(),
    };

    let id = insert(store, Collection::Orders, &order).await?;
    log::info!("🛒 Order {} placed by {} for product {}", id.to_hex(), order.buyer_email, order.product_id);
    Ok(id)
}

pub async fn list_by_buyer(store: &dyn DocumentStore, buyer_email: &str) -> AppResult<Vec<Order>> {
    find_all(store, Collection::Orders, doc! { "buyerEmail": buyer_email }).await
}
