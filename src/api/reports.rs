use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::{InsertResponse, NewReport, ReportResponse, WriteSummary};
use crate::services::{authorization, consistency, report_service};
use crate::state::AppState;
use crate::utils::error::AppError;

/// PUT /api/reports - Denuncia um anúncio
#[utoipa::path(
    put,
    path = "/api/reports",
    tag = "Reports",
    request_body = NewReport,
    responses(
        (status = 201, description = "Report stored", body = InsertResponse),
        (status = 400, description = "Malformed product id")
    )
)]
pub async fn create_report(state: web::Data<AppState>, body: web::Json<NewReport>) -> Result<HttpResponse, AppError> {
    let id = report_service::create(state.store(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(InsertResponse::new(id)))
}

#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "Reports",
    responses((status = 200, description = "All reports", body = [ReportResponse]))
)]
pub async fn get_reports(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reports: Vec<ReportResponse> = report_service::list(state.store())
        .await?
        .into_iter()
        .map(ReportResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(reports))
}

/// DELETE /api/reports/{id} - Remove a denúncia e o anúncio denunciado (admin)
#[utoipa::path(
    delete,
    path = "/api/reports/{id}",
    tag = "Reports",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Report id")),
    responses(
        (status = 200, description = "Per-step write result", body = WriteSummary),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn delete_report(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    authorization::require_admin(state.store(), &user).await?;
    let outcome = consistency::delete_reported_listing(state.store(), &path).await?;
    log::info!("🚩 {} removed reported listing (report {})", user.email, path.as_str());
    Ok(HttpResponse::Ok().json(outcome.summary()))
}
