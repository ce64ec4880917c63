use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "GPUHunt API",
        version = "1.0.0",
        description = "REST backend for a second-hand GPU marketplace.\n\n**Authentication:** protected endpoints take a JWT Bearer token issued by `GET /api/jwt`.\n\n**Multi-collection writes** (pay, delete listing, delete or verify seller, delete reported listing) return a per-step `WriteSummary` instead of a single boolean."
    ),
    paths(
        // Health
        crate::api::health::health_check,

        // Auth
        crate::api::jwt::issue_token,

        // Users
        crate::api::users::create_user,
        crate::api::users::list_users,
        crate::api::users::get_role,
        crate::api::users::change_role,
        crate::api::users::get_verified,
        crate::api::users::list_sellers,
        crate::api::users::list_buyers,
        crate::api::users::delete_buyer,
        crate::api::users::verify_seller,
        crate::api::users::delete_seller,
        crate::api::users::get_wishlist,
        crate::api::users::add_to_wishlist,

        // Products
        crate::api::products::create_product,
        crate::api::products::get_advertised,
        crate::api::products::get_my_products,
        crate::api::products::advertise_product,
        crate::api::products::delete_product,

        // Catalog
        crate::api::categories::get_categories,
        crate::api::categories::get_category_products,
        crate::api::blogs::get_blogs,

        // Orders
        crate::api::orders::create_order,
        crate::api::orders::get_orders,
        crate::api::orders::pay_order,

        // Reports
        crate::api::reports::create_report,
        crate::api::reports::get_reports,
        crate::api::reports::delete_report,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::api::jwt::TokenResponse,

            crate::models::Role,
            crate::models::NewAccount,
            crate::models::RoleChangeRequest,
            crate::models::AccountResponse,
            crate::models::NewListing,
            crate::models::ListingResponse,
            crate::models::NewOrder,
            crate::models::OrderResponse,
            crate::models::NewReport,
            crate::models::ReportResponse,
            crate::models::CategoryResponse,
            crate::models::BlogResponse,

            crate::models::InsertResponse,
            crate::models::UpdateResponse,
            crate::models::DeleteResponse,
            crate::models::WriteSummary,
            crate::models::WriteStep,
            crate::models::WriteStatus,
            crate::models::WriteAction,
            crate::models::SuccessPolicy,
        )
    ),
    tags(
        (name = "Health", description = "Service and store health."),
        (name = "Auth", description = "Access token issuance."),
        (name = "Users", description = "Accounts, roles, seller verification and wishlists."),
        (name = "Products", description = "GPU listings."),
        (name = "Catalog", description = "Categories and blog posts."),
        (name = "Orders", description = "Checkout and payment."),
        (name = "Reports", description = "Reported listings and their moderation."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from GET /api/jwt"))
                        .build()
                ),
            );
        }
    }
}
