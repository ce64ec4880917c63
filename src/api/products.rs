use actix_web::{web, HttpResponse};

use crate::models::{InsertResponse, Listing, ListingResponse, NewListing, UpdateResponse, WriteSummary};
use crate::services::{consistency, listing_service};
use crate::state::AppState;
use crate::utils::error::AppError;

pub(crate) fn listings(list: Vec<Listing>) -> Vec<ListingResponse> {
    list.into_iter().map(ListingResponse::from).collect()
}

/// POST /api/products - Cria um anúncio
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = NewListing,
    responses(
        (status = 201, description = "Listing created", body = InsertResponse),
        (status = 400, description = "Invalid listing")
    )
)]
pub async fn create_product(state: web::Data<AppState>, body: web::Json<NewListing>) -> Result<HttpResponse, AppError> {
    let id = listing_service::create(state.store(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(InsertResponse::new(id)))
}

/// GET /api/products/advertised - Anúncios em destaque ainda disponíveis
#[utoipa::path(
    get,
    path = "/api/products/advertised",
    tag = "Products",
    responses((status = 200, description = "Advertised listings that are neither paid nor sold", body = [ListingResponse]))
)]
pub async fn get_advertised(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let list = listing_service::list_advertised(state.store()).await?;
    Ok(HttpResponse::Ok().json(listings(list)))
}

/// GET /api/products/myProducts/{email}
#[utoipa::path(
    get,
    path = "/api/products/myProducts/{email}",
    tag = "Products",
    params(("email" = String, Path, description = "Seller email")),
    responses((status = 200, description = "Every listing of the seller", body = [ListingResponse]))
)]
pub async fn get_my_products(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let list = listing_service::list_by_seller(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(listings(list)))
}

/// PUT /api/products/myProducts/{id} - Coloca o anúncio em destaque
#[utoipa::path(
    put,
    path = "/api/products/myProducts/{id}",
    tag = "Products",
    params(("id" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Listing advertised", body = UpdateResponse),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn advertise_product(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let count = listing_service::advertise(state.store(), &path).await?;
    log::info!("📣 Product {} advertised", path.as_str());
    Ok(HttpResponse::Ok().json(UpdateResponse::from(count)))
}

/// DELETE /api/products/{productId} - Remove o anúncio e os pedidos associados
#[utoipa::path(
    delete,
    path = "/api/products/{productId}",
    tag = "Products",
    params(("productId" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Per-step write result", body = WriteSummary),
        (status = 400, description = "Malformed id")
    )
)]
pub async fn delete_product(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let outcome = consistency::delete_listing(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(outcome.summary()))
}
