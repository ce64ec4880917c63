use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::{AccountResponse, DeleteResponse, InsertResponse, ListingResponse, NewAccount, Role, RoleChangeRequest, UpdateResponse, WriteSummary};
use crate::services::{account_service, authorization, consistency, role_service};
use crate::state::AppState;
use crate::utils::error::AppError;

fn accounts(list: Vec<crate::models::Account>) -> Vec<AccountResponse> {
    list.into_iter().map(AccountResponse::from).collect()
}

/// POST /api/users - Registra uma conta (user ou seller)
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = NewAccount,
    responses(
        (status = 201, description = "Account created", body = InsertResponse),
        (status = 400, description = "Invalid email or role"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_user(state: web::Data<AppState>, body: web::Json<NewAccount>) -> Result<HttpResponse, AppError> {
    log::info!("👤 Registering account {}", body.email);
    let id = account_service::register(state.store(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(InsertResponse::new(id)))
}

/// GET /api/users - Lista todas as contas (admin)
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = [AccountResponse]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn list_users(state: web::Data<AppState>, user: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    authorization::require_admin(state.store(), &user).await?;
    let list = account_service::list_all(state.store()).await?;
    Ok(HttpResponse::Ok().json(accounts(list)))
}

/// GET /api/users/role/{email} - Role da conta, ou `false`
///
/// The token is optional; when one is sent it must belong to `email`.
#[utoipa::path(
    get,
    path = "/api/users/role/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Account email")),
    responses(
        (status = 200, description = "Role name, or false for unknown accounts", body = Role),
        (status = 403, description = "Token belongs to another account")
    )
)]
pub async fn get_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
    user: Option<web::ReqData<Claims>>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    if let Some(user) = user {
        authorization::authorize(&user, &email)?;
    }

    match role_service::get_role(state.store(), &email).await? {
        Some(role) => Ok(HttpResponse::Ok().json(role)),
        None => Ok(HttpResponse::Ok().json(false)),
    }
}

/// PUT /api/users/role/{email} - Altera a role (admin)
#[utoipa::path(
    put,
    path = "/api/users/role/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Account email")),
    request_body = RoleChangeRequest,
    responses(
        (status = 200, description = "Role updated", body = UpdateResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn change_role(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
    body: web::Json<RoleChangeRequest>,
) -> Result<HttpResponse, AppError> {
    authorization::require_admin(state.store(), &user).await?;
    let email = path.into_inner();

    let count = account_service::change_role(state.store(), &email, body.role).await?;
    log::info!("🔑 {} changed role of {} to {}", user.email, email, body.role);
    Ok(HttpResponse::Ok().json(UpdateResponse::from(count)))
}

/// GET /api/users/verified/{email}
#[utoipa::path(
    get,
    path = "/api/users/verified/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Account email")),
    responses((status = 200, description = "Whether the seller is verified", body = bool))
)]
pub async fn get_verified(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let verified = role_service::is_verified(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(verified))
}

#[utoipa::path(
    get,
    path = "/api/users/sellers",
    tag = "Users",
    responses((status = 200, description = "Seller accounts", body = [AccountResponse]))
)]
pub async fn list_sellers(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let list = role_service::list_by_role(state.store(), Role::Seller).await?;
    Ok(HttpResponse::Ok().json(accounts(list)))
}

#[utoipa::path(
    get,
    path = "/api/users/buyers",
    tag = "Users",
    responses((status = 200, description = "Buyer accounts", body = [AccountResponse]))
)]
pub async fn list_buyers(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let list = role_service::list_by_role(state.store(), Role::User).await?;
    Ok(HttpResponse::Ok().json(accounts(list)))
}

/// DELETE /api/users/buyers/{email} - Remove uma conta de comprador (admin)
#[utoipa::path(
    delete,
    path = "/api/users/buyers/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Buyer email")),
    responses(
        (status = 200, description = "Buyer deleted", body = DeleteResponse),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "No buyer with this email")
    )
)]
pub async fn delete_buyer(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    authorization::require_admin(state.store(), &user).await?;
    let deleted_count = account_service::delete_buyer(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(DeleteResponse {
        success: true,
        deleted_count,
    }))
}

/// PUT /api/users/sellers/{email} - Verifica o seller e os seus anúncios (admin)
#[utoipa::path(
    put,
    path = "/api/users/sellers/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Seller email")),
    responses(
        (status = 200, description = "Per-step write result", body = WriteSummary),
        (status = 403, description = "Not an admin"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn verify_seller(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    authorization::require_admin(state.store(), &user).await?;
    let outcome = consistency::verify_seller(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(outcome.summary()))
}

/// DELETE /api/users/sellers/{email} - Remove o seller e os seus anúncios (admin)
#[utoipa::path(
    delete,
    path = "/api/users/sellers/{email}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Seller email")),
    responses(
        (status = 200, description = "Per-step write result", body = WriteSummary),
        (status = 403, description = "Not an admin")
    )
)]
pub async fn delete_seller(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    authorization::require_admin(state.store(), &user).await?;
    let outcome = consistency::delete_seller_account(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(outcome.summary()))
}

/// GET /api/users/wishlists - Anúncios na wishlist do usuário autenticado
#[utoipa::path(
    get,
    path = "/api/users/wishlists",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wishlisted listings", body = [ListingResponse]),
        (status = 401, description = "Missing token")
    )
)]
pub async fn get_wishlist(state: web::Data<AppState>, user: web::ReqData<Claims>) -> Result<HttpResponse, AppError> {
    let listings = account_service::wishlist(state.store(), &user.email).await?;
    let listings: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(HttpResponse::Ok().json(listings))
}

/// PUT /api/users/wishlists/{productId}
#[utoipa::path(
    put,
    path = "/api/users/wishlists/{productId}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("productId" = String, Path, description = "Listing id")),
    responses(
        (status = 200, description = "Wishlist updated (modifiedCount 0 when already present)", body = UpdateResponse),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn add_to_wishlist(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let count = account_service::add_to_wishlist(state.store(), &user.email, &path).await?;
    Ok(HttpResponse::Ok().json(UpdateResponse::from(count)))
}
