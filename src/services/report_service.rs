use mongodb::bson::{doc, oid::ObjectId};

use crate::database::{Collection, DocumentStore};
use crate::models::{NewReport, Report};
use crate::services::documents::{find_all, insert, parse_object_id};
use crate::utils::error::{AppError, AppResult};

pub async fn create(store: &dyn DocumentStore, request: NewReport) -> AppResult<ObjectId> {
    let listing_id = parse_object_id(&request.product_id, "product")?;
    if request.reported_by_email.trim().is_empty() {
        return Err(AppError::InvalidRequest("reportedByEmail is required".to_string()));
    }

    let report = Report {
        id: None,
        reported_by_email: request.reported_by_email,
        product_id: listing_id.to_hex(),
        product_name: request.product_name,
        reason: request.reason,
    };

    let id = insert(store, Collection::Reports, &report).await?;
    log::info!("🚩 Product {} reported by {}", report.product_id, report.reported_by_email);
    Ok(id)
}

pub async fn list(store: &dyn DocumentStore) -> AppResult<Vec<Report>> {
    find_all(store, Collection::Reports, doc! {}).await
}
