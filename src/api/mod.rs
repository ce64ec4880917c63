pub mod blogs;
pub mod categories;
pub mod health;
pub mod jwt;
pub mod orders;
pub mod products;
pub mod reports;
pub mod swagger;
pub mod users;

use actix_web::{guard, web, HttpResponse};

use crate::middleware::AuthMiddleware;
use crate::utils::error::AppError;

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().body("GPUHunt server is running")
}

/// Fallback for every unmatched route
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body("<h3>404 ! Not a valid url</h3>")
}

/// Registers every route. Public, optional-token and token-only resources
/// that share a path are split by method guard so the auth middleware only
/// wraps the methods that need it.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _| AppError::InvalidRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err, _| AppError::InvalidRequest(err.to_string()).into()),
    )
    .route("/", web::get().to(index))
    .route("/health", web::get().to(health::health_check))
    .route("/api/jwt", web::get().to(jwt::issue_token))
    // Users
    .service(
        web::scope("/api/users")
            .route("", web::post().to(users::create_user))
            .service(
                web::resource("")
                    .guard(guard::Get())
                    .route(web::get().to(users::list_users))
                    .wrap(AuthMiddleware::required()),
            )
            .service(
                web::resource("/role/{email}")
                    .guard(guard::Get())
                    .route(web::get().to(users::get_role))
                    .wrap(AuthMiddleware::optional()),
            )
            .service(
                web::resource("/role/{email}")
                    .guard(guard::Put())
                    .route(web::put().to(users::change_role))
                    .wrap(AuthMiddleware::required()),
            )
            .route("/verified/{email}", web::get().to(users::get_verified))
            .route("/sellers", web::get().to(users::list_sellers))
            .route("/buyers", web::get().to(users::list_buyers))
            .service(
                web::resource("/buyers/{email}")
                    .route(web::delete().to(users::delete_buyer))
                    .wrap(AuthMiddleware::required()),
            )
            .service(
                web::resource("/sellers/{email}")
                    .route(web::put().to(users::verify_seller))
                    .route(web::delete().to(users::delete_seller))
                    .wrap(AuthMiddleware::required()),
            )
            .service(
                web::resource("/wishlists")
                    .route(web::get().to(users::get_wishlist))
                    .wrap(AuthMiddleware::required()),
            )
            .service(
                web::resource("/wishlists/{product_id}")
                    .route(web::put().to(users::add_to_wishlist))
                    .wrap(AuthMiddleware::required()),
            ),
    )
    // Products
    .service(
        web::scope("/api/products")
            .route("", web::post().to(products::create_product))
            .route("/advertised", web::get().to(products::get_advertised))
            .route("/myProducts/{email}", web::get().to(products::get_my_products))
            .route("/myProducts/{id}", web::put().to(products::advertise_product))
            .route("/{product_id}", web::delete().to(products::delete_product)),
    )
    // Catalog
    .service(
        web::scope("/api/categories")
            .route("", web::get().to(categories::get_categories))
            .route("/{category_name}", web::get().to(categories::get_category_products)),
    )
    .route("/api/blogs", web::get().to(blogs::get_blogs))
    // Orders: GET is scoped to the token's email, PATCH (payment) is public
    .service(
        web::scope("/api/orders")
            .route("", web::post().to(orders::create_order))
            .service(
                web::resource("/{email}")
                    .guard(guard::Get())
                    .route(web::get().to(orders::get_orders))
                    .wrap(AuthMiddleware::required()),
            )
            .route("/{product_id}", web::patch().to(orders::pay_order)),
    )
    // Reports
    .service(
        web::scope("/api/reports")
            .route("", web::put().to(reports::create_report))
            .route("", web::get().to(reports::get_reports))
            .service(
                web::resource("/{id}")
                    .route(web::delete().to(reports::delete_report))
                    .wrap(AuthMiddleware::required()),
            ),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{Collection, DocumentStore, MemoryStore};
    use crate::models::{InsertResponse, ListingResponse, WriteStatus, WriteSummary};
    use crate::services::TokenKeys;
    use crate::state::AppState;
    use actix_web::{http::StatusCode, test, App};
    use mongodb::bson::doc;
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(Arc::new(MemoryStore::new()), TokenKeys::new("test-secret", 1)))
    }

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data($state.clone())
                    .configure(configure)
                    .default_service(web::to(not_found)),
            )
            .await
        };
    }

    fn bearer(state: &AppState, email: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", state.tokens.issue(email).unwrap()))
    }

    async fn add_account(state: &AppState, email: &str, role: &str) {
        state
            .store()
            .insert_one(Collection::Users, doc! { "email": email, "role": role, "verified": false })
            .await
            .unwrap();
    }

    #[actix_web::test]
    async fn test_paid_listing_leaves_advertised_list() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({
                "sellerEmail": "seller@x.com",
                "productName": "RTX 3070",
                "productCategory": "NVIDIA GeForce",
                "price": 250.0,
                "advertised": true
            }))
            .to_request();
        let created: InsertResponse = test::call_and_read_body_json(&app, req).await;
        assert!(created.success);
        let product_id = created.inserted_id;

        let req = test::TestRequest::get().uri("/api/products/advertised").to_request();
        let advertised: Vec<ListingResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(advertised.len(), 1);
        assert_eq!(advertised[0].id, product_id);

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({ "productId": product_id, "buyerEmail": "buyer@x.com" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::patch().uri(&format!("/api/orders/{}", product_id)).to_request();
        let paid: WriteSummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(paid.status, WriteStatus::Complete);
        assert!(paid.acknowledged);

        let req = test::TestRequest::get().uri("/api/products/advertised").to_request();
        let advertised: Vec<ListingResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(advertised.is_empty());

        let req = test::TestRequest::patch().uri(&format!("/api/orders/{}", product_id)).to_request();
        let again: WriteSummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(again.status, WriteStatus::Unchanged);
        assert!(!again.acknowledged);
    }

    #[actix_web::test]
    async fn test_orders_are_scoped_to_token_email() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/orders/buyer@x.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/orders/buyer@x.com")
            .insert_header(bearer(&state, "other@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/orders/buyer@x.com")
            .insert_header(("Authorization", "Bearer not-a-jwt"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/orders/buyer@x.com")
            .insert_header(bearer(&state, "buyer@x.com"))
            .to_request();
        let orders: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert!(orders.is_empty());
    }

    #[actix_web::test]
    async fn test_admin_routes_reject_non_admins() {
        let state = state();
        add_account(&state, "user@x.com", "user").await;
        add_account(&state, "admin@x.com", "admin").await;
        let app = app!(state);

        let req = test::TestRequest::delete().uri("/api/users/sellers/s@x.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/api/users")
            .insert_header(bearer(&state, "user@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get()
            .uri("/api/users")
            .insert_header(bearer(&state, "admin@x.com"))
            .to_request();
        let users: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(users.len(), 2);

        // Registration stays public
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({ "email": "new@x.com", "role": "seller" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    #[actix_web::test]
    async fn test_role_lookup_with_optional_token() {
        let state = state();
        add_account(&state, "seller@x.com", "seller").await;
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/users/role/seller@x.com").to_request();
        let role: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(role, json!("seller"));

        let req = test::TestRequest::get().uri("/api/users/role/ghost@x.com").to_request();
        let role: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(role, json!(false));

        let req = test::TestRequest::get()
            .uri("/api/users/role/seller@x.com")
            .insert_header(bearer(&state, "someone@x.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_delete_unordered_listing_is_partial() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/products")
            .set_json(json!({ "sellerEmail": "s@x.com", "productCategory": "AMD Radeon", "price": 90.0 }))
            .to_request();
        let created: InsertResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/products/{}", created.inserted_id))
            .to_request();
        let outcome: WriteSummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(outcome.status, WriteStatus::Partial);
        assert_eq!((outcome.completed, outcome.total), (1, 2));
        assert!(!outcome.acknowledged);

        let req = test::TestRequest::delete().uri("/api/products/not-an-id").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_token_only_for_known_accounts() {
        let state = state();
        add_account(&state, "buyer@x.com", "user").await;
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/jwt?email=ghost@x.com").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::get().uri("/api/jwt?email=buyer@x.com").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let token = body["accessToken"].as_str().unwrap();
        assert_eq!(state.tokens.verify(token).unwrap().email, "buyer@x.com");
    }

    #[actix_web::test]
    async fn test_unknown_route_and_bad_body() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/api/nothing-here").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = test::read_body(resp).await;
        assert_eq!(body, "<h3>404 ! Not a valid url</h3>");

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], json!(false));
    }

    #[actix_web::test]
    async fn test_health_reports_store() {
        let state = state();
        let app = app!(state);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "connected");
    }

    macro_rules! create_listing {
        ($app:expr, $seller:expr) => {{
            let req = test::TestRequest::post()
                .uri("/api/products")
                .set_json(json!({ "sellerEmail": $seller, "productCategory": "NVIDIA GeForce", "price": 300.0, "advertised": true }))
                .to_request();
            let created: InsertResponse = test::call_and_read_body_json(&$app, req).await;
            created.inserted_id
        }};
    }

    #[actix_web::test]
    async fn test_role_is_false_for_accounts_without_known_role() {
        let state = state();
        add_account(&state, "admin@x.com", "admin").await;
        add_account(&state, "odd@x.com", "buyer").await;
        state.store().insert_one(Collection::Users, doc! { "email": "legacy@x.com" }).await.unwrap();
        let app = app!(state);

        for email in ["legacy@x.com", "odd@x.com"] {
            let req = test::TestRequest::get().uri(&format!("/api/users/role/{}", email)).to_request();
            let role: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(role, json!(false), "{}", email);
        }

        let req = test::TestRequest::get()
            .uri("/api/users")
            .insert_header(bearer(&state, "admin@x.com"))
            .to_request();
        let users: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(users.len(), 3);
    }

    #[actix_web::test]
    async fn test_store_failure_mid_payment_is_a_generic_500() {
        use crate::database::failing::FailingStore;

        let store = Arc::new(FailingStore::failing_updates_on(Collection::Products));
        let state = web::Data::new(AppState::new(store.clone(), TokenKeys::new("test-secret", 1)));
        let app = app!(state);

        let product_id = create_listing!(app, "seller@x.com");
        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({ "productId": product_id, "buyerEmail": "buyer@x.com" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

        let req = test::TestRequest::patch().uri(&format!("/api/orders/{}", product_id)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "success": false, "error": "Internal server error" }));

        // No rollback: the order stays paid, the listing does not
        let order = store.inner().find_one(Collection::Orders, doc! { "productId": product_id.as_str() }).await.unwrap().unwrap();
        assert!(order.get_bool("paid").unwrap());
        let req = test::TestRequest::get().uri("/api/products/advertised").to_request();
        let advertised: Vec<ListingResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(advertised.len(), 1);
    }

    #[actix_web::test]
    async fn test_admin_moderation_routes() {
        let state = state();
        add_account(&state, "admin@x.com", "admin").await;
        add_account(&state, "seller@x.com", "seller").await;
        add_account(&state, "buyer@x.com", "user").await;
        let app = app!(state);

        let product_id = create_listing!(app, "seller@x.com");

        let req = test::TestRequest::put()
            .uri("/api/users/sellers/seller@x.com")
            .insert_header(bearer(&state, "admin@x.com"))
            .to_request();
        let verified: WriteSummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(verified.status, WriteStatus::Complete);

        let req = test::TestRequest::get().uri("/api/products/myProducts/seller@x.com").to_request();
        let listings: Vec<ListingResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(listings[0].verified);

        let req = test::TestRequest::put()
            .uri("/api/reports")
            .set_json(json!({ "reportedByEmail": "buyer@x.com", "productId": product_id, "reason": "scam" }))
            .to_request();
        let report: InsertResponse = test::call_and_read_body_json(&app, req).await;

        let req = test::TestRequest::delete()
            .uri(&format!("/api/reports/{}", report.inserted_id))
            .insert_header(bearer(&state, "buyer@x.com"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/reports/{}", report.inserted_id))
            .insert_header(bearer(&state, "admin@x.com"))
            .to_request();
        let removed: WriteSummary = test::call_and_read_body_json(&app, req).await;
        assert_eq!(removed.status, WriteStatus::Complete);
        assert!(removed.acknowledged);

        let req = test::TestRequest::get().uri("/api/products/advertised").to_request();
        let advertised: Vec<ListingResponse> = test::call_and_read_body_json(&app, req).await;
        assert!(advertised.is_empty());

        let req = test::TestRequest::delete()
            .uri("/api/users/buyers/buyer@x.com")
            .insert_header(bearer(&state, "admin@x.com"))
            .to_request();
        let deleted: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(deleted["deletedCount"], 1);

        let req = test::TestRequest::delete()
            .uri("/api/users/buyers/seller@x.com")
            .insert_header(bearer(&state, "admin@x.com"))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_wishlist_routes_use_token_email() {
        let state = state();
        add_account(&state, "buyer@x.com", "user").await;
        let app = app!(state);

        let product_id = create_listing!(app, "seller@x.com");

        let req = test::TestRequest::put()
            .uri(&format!("/api/users/wishlists/{}", product_id))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

        for expected_modified in [1, 0] {
            let req = test::TestRequest::put()
                .uri(&format!("/api/users/wishlists/{}", product_id))
                .insert_header(bearer(&state, "buyer@x.com"))
                .to_request();
            let updated: serde_json::Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(updated["modifiedCount"], expected_modified);
        }

        let req = test::TestRequest::get()
            .uri("/api/users/wishlists")
            .insert_header(bearer(&state, "buyer@x.com"))
            .to_request();
        let wishlist: Vec<ListingResponse> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist[0].id, product_id);
    }
}
