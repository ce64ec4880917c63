use actix_web::{web, HttpResponse};

use crate::api::products::listings;
use crate::models::{CategoryResponse, ListingResponse};
use crate::services::{catalog_service, listing_service};
use crate::state::AppState;
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    responses((status = 200, description = "GPU categories", body = [CategoryResponse]))
)]
pub async fn get_categories(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let categories: Vec<CategoryResponse> = catalog_service::list_categories(state.store())
        .await?
        .into_iter()
        .map(CategoryResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(categories))
}

/// GET /api/categories/{categoryName} - Anúncios disponíveis da categoria
#[utoipa::path(
    get,
    path = "/api/categories/{categoryName}",
    tag = "Catalog",
    params(("categoryName" = String, Path, description = "Exact category name")),
    responses((status = 200, description = "Available listings in the category", body = [ListingResponse]))
)]
pub async fn get_category_products(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let list = listing_service::list_by_category(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(listings(list)))
}
