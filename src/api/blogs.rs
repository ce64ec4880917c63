use actix_web::{web, HttpResponse};

use crate::models::BlogResponse;
use crate::services::catalog_service;
use crate::state::AppState;
use crate::utils::error::AppError;

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "Catalog",
    responses((status = 200, description = "Blog posts", body = [BlogResponse]))
)]
pub async fn get_blogs(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let blogs: Vec<BlogResponse> = catalog_service::list_blogs(state.store())
        .await?
        .into_iter()
        .map(BlogResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(blogs))
}
