//! Workflows that write to more than one collection.
//!
//! Each workflow is a fixed sequence of single-collection writes. There is no
//! transaction and no compensation: a write that landed stays landed even if
//! a later step matches nothing, and a store error stops the sequence at the
//! step that failed. The `WriteOutcome` reports exactly which steps touched
//! documents so callers can see "1 of 2" instead of a bare boolean.
//!
//! Concurrent requests on the same ids can interleave between steps (two
//! payments, or a payment racing a delete), so `Order.paid ==
//! Listing.paid` can be violated under load.

use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{Collection, DocumentStore};
use crate::models::{Listing, Order, Report, SuccessPolicy, WriteAction, WriteOutcome};
use crate::services::documents::{find_all, find_first, parse_object_id};
use crate::services::role_service;
use crate::utils::error::{AppError, AppResult};

/// Marks the order for `product_id` and the listing itself as paid.
///
/// Both updates must modify a document for the outcome to be complete.
/// Repeating the call modifies nothing and reports `Unchanged`.
pub async fn pay_order(store: &dyn DocumentStore, product_id: &str) -> AppResult<WriteOutcome> {
    let listing_id = parse_object_id(product_id, "product")?;

    let order: Order = find_first(store, Collection::Orders, doc! { "productId": listing_id.to_hex() })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No order for product {}", product_id)))?;
    let order_id = order
        .id
        .ok_or_else(|| AppError::Internal("Stored order has no _id".to_string()))?;

    let mut outcome = WriteOutcome::new("pay_order", SuccessPolicy::AllRequired);

    let count = store
        .update_one(Collection::Orders, doc! { "_id": order_id }, doc! { "$set": { "paid": true } })
        .await?;
    outcome.required(Collection::Orders, WriteAction::Update, count.modified);

    let count = store
        .update_one(Collection::Products, doc! { "_id": listing_id }, doc! { "$set": { "paid": true } })
        .await?;
    outcome.required(Collection::Products, WriteAction::Update, count.modified);

    log::info!("💳 pay_order {} -> {:?} ({}/{})", product_id, outcome.status(), outcome.completed(), outcome.total());
    Ok(outcome)
}

/// Removes a listing and the orders placed on it. Reports about the listing
/// are cleaned up too but don't count towards the status, so a listing that
/// was never ordered reports `Partial`.
pub async fn delete_listing(store: &dyn DocumentStore, product_id: &str) -> AppResult<WriteOutcome> {
    let listing_id = parse_object_id(product_id, "product")?;
    let hex = listing_id.to_hex();

    let mut outcome = WriteOutcome::new("delete_listing", SuccessPolicy::AllRequired);

    let deleted = store.delete_one(Collection::Products, doc! { "_id": listing_id }).await?;
    outcome.required(Collection::Products, WriteAction::Delete, deleted);

    let deleted = store.delete_many(Collection::Orders, doc! { "productId": &hex }).await?;
    outcome.required(Collection::Orders, WriteAction::Delete, deleted);

    let deleted = store.delete_many(Collection::Reports, doc! { "productId": &hex }).await?;
    outcome.cleanup(Collection::Reports, WriteAction::Delete, deleted);

    log::info!("🗑️  delete_listing {} -> {:?}", product_id, outcome.status());
    Ok(outcome)
}

/// Deletes a seller's listings (and their orders and reports), then the
/// account.
///
/// Unlike the other workflows this one is acknowledged when *either* the
/// listings or the account were removed (`AnyRequired`). The per-step counts
/// are in the outcome for callers that want the strict reading.
pub async fn delete_seller_account(store: &dyn DocumentStore, email: &str) -> AppResult<WriteOutcome> {
    let listings: Vec<Listing> = find_all(store, Collection::Products, doc! { "sellerEmail": email }).await?;
    let listing_ids: Vec<String> = listings
        .iter()
        .filter_map(|listing| listing.id.map(|id| id.to_hex()))
        .collect();

    let mut outcome = WriteOutcome::new("delete_seller_account", SuccessPolicy::AnyRequired);

    let deleted = store.delete_many(Collection::Products, doc! { "sellerEmail": email }).await?;
    outcome.required(Collection::Products, WriteAction::Delete, deleted);

    // Listings created after the lookup above keep their orders
    let (orders, reports) = if listing_ids.is_empty() {
        (0, 0)
    } else {
        let filter = doc! { "productId": { "$in": &listing_ids } };
        let orders = store.delete_many(Collection::Orders, filter.clone()).await?;
        let reports = store.delete_many(Collection::Reports, filter).await?;
        (orders, reports)
    };
    outcome.cleanup(Collection::Orders, WriteAction::Delete, orders);
    outcome.cleanup(Collection::Reports, WriteAction::Delete, reports);

    let deleted = store.delete_one(Collection::Users, doc! { "email": email }).await?;
    outcome.required(Collection::Users, WriteAction::Delete, deleted);

    log::info!(
        "🗑️  delete_seller_account {} -> {:?}, {} listing(s) removed",
        email,
        outcome.status(),
        outcome.affected(Collection::Products)
    );
    Ok(outcome)
}

/// Flags a seller and all of their listings as verified.
pub async fn verify_seller(store: &dyn DocumentStore, email: &str) -> AppResult<WriteOutcome> {
    if role_service::find_account(store, email).await?.is_none() {
        return Err(AppError::NotFound(format!("Account {} not found", email)));
    }

    let mut outcome = WriteOutcome::new("verify_seller", SuccessPolicy::AllRequired);

    let count = store
        .update_one(Collection::Users, doc! { "email": email }, doc! { "$set": { "verified": true } })
        .await?;
    outcome.required(Collection::Users, WriteAction::Update, count.modified);

    let count = store
        .update_many(Collection::Products, doc! { "sellerEmail": email }, doc! { "$set": { "verified": true } })
        .await?;
    outcome.required(Collection::Products, WriteAction::Update, count.modified);

    log::info!("✔️  verify_seller {} -> {:?}", email, outcome.status());
    Ok(outcome)
}

/// Resolves a report by removing it together with the reported listing.
/// Orders and any other reports on that listing are cleaned up.
pub async fn delete_reported_listing(store: &dyn DocumentStore, report_id: &str) -> AppResult<WriteOutcome> {
    let id = parse_object_id(report_id, "report")?;
    let report: Report = find_first(store, Collection::Reports, doc! { "_id": id })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Report {} not found", report_id)))?;

    let mut outcome = WriteOutcome::new("delete_reported_listing", SuccessPolicy::AllRequired);

    let deleted = store.delete_one(Collection::Reports, doc! { "_id": id }).await?;
    outcome.required(Collection::Reports, WriteAction::Delete, deleted);

    let deleted = match ObjectId::parse_str(&report.product_id) {
        Ok(listing_id) => store.delete_one(Collection::Products, doc! { "_id": listing_id }).await?,
        Err(_) => {
            log::warn!("⚠️  Report {} points at malformed product id {}", report_id, report.product_id);
            0
        }
    };
    outcome.required(Collection::Products, WriteAction::Delete, deleted);

    let filter = doc! { "productId": &report.product_id };
    let orders = store.delete_many(Collection::Orders, filter.clone()).await?;
    outcome.cleanup(Collection::Orders, WriteAction::Delete, orders);
    let reports = store.delete_many(Collection::Reports, filter).await?;
    outcome.cleanup(Collection::Reports, WriteAction::Delete, reports);

    log::info!("🗑️  delete_reported_listing {} -> {:?}", report_id, outcome.status());
    Ok(outcome)
}
