use actix_web::{web, HttpResponse};

use crate::middleware::auth::Claims;
use crate::models::{InsertResponse, NewOrder, OrderResponse, WriteSummary};
use crate::services::{authorization, consistency, order_service};
use crate::state::AppState;
use crate::utils::error::AppError;

/// POST /api/orders - Registra um pedido de compra
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = NewOrder,
    responses(
        (status = 201, description = "Order placed", body = InsertResponse),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Listing already paid or sold")
    )
)]
pub async fn create_order(state: web::Data<AppState>, body: web::Json<NewOrder>) -> Result<HttpResponse, AppError> {
    let id = order_service::create(state.store(), body.into_inner()).await?;
    Ok(HttpResponse::Created().json(InsertResponse::new(id)))
}

/// GET /api/orders/{email} - Pedidos do comprador autenticado
#[utoipa::path(
    get,
    path = "/api/orders/{email}",
    tag = "Orders",
    security(("bearer_auth" = [])),
    params(("email" = String, Path, description = "Buyer email, must match the token")),
    responses(
        (status = 200, description = "Orders of the buyer", body = [OrderResponse]),
        (status = 401, description = "Missing token"),
        (status = 403, description = "Token belongs to another account")
    )
)]
pub async fn get_orders(
    state: web::Data<AppState>,
    user: web::ReqData<Claims>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let email = path.into_inner();
    authorization::authorize(&user, &email)?;

    let orders: Vec<OrderResponse> = order_service::list_by_buyer(state.store(), &email)
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(orders))
}

/// PATCH /api/orders/{productId} - Marca pedido e anúncio como pagos
#[utoipa::path(
    patch,
    path = "/api/orders/{productId}",
    tag = "Orders",
    params(("productId" = String, Path, description = "Listing id of the order")),
    responses(
        (status = 200, description = "Per-step write result", body = WriteSummary),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "No order for this listing")
    )
)]
pub async fn pay_order(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let outcome = consistency::pay_order(state.store(), &path).await?;
    Ok(HttpResponse::Ok().json(outcome.summary()))
}
