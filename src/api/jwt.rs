use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::services::role_service;
use crate::state::AppState;
use crate::utils::error::AppError;

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TokenQuery {
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
}

/// GET /api/jwt?email= - Emite um token para uma conta existente
#[utoipa::path(
    get,
    path = "/api/jwt",
    tag = "Auth",
    params(TokenQuery),
    responses(
        (status = 200, description = "Signed access token", body = TokenResponse),
        (status = 403, description = "No account for this email")
    )
)]
pub async fn issue_token(state: web::Data<AppState>, query: web::Query<TokenQuery>) -> Result<HttpResponse, AppError> {
    let email = query.into_inner().email;

    if role_service::find_account(state.store(), &email).await?.is_none() {
        log::warn!("⚠️  Token requested for unknown account {}", email);
        return Err(AppError::Forbidden(format!("No account for {}", email)));
    }

    let access_token = state.tokens.issue(&email)?;
    log::info!("🔐 Token issued for {}", email);
    Ok(HttpResponse::Ok().json(TokenResponse { access_token }))
}
