mod api;
mod config;
mod database;
mod middleware;
mod models;
mod seeds;
mod services;
mod state;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::services::TokenKeys;
use crate::state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting GPUHunt API...");
    log::info!("📊 Database: {} ({})", config.database_name, config.database_url);

    let store = database::connect(&config).await.map_err(|e| {
        log::error!("❌ Failed to connect to the database: {}", e);
        std::io::Error::other(e)
    })?;

    log::info!("✅ Database connected successfully");

    // 🌱 Seed categories and blogs
    seeds::reference_data_seed::seed_reference_data(store.as_ref()).await;

    let state = web::Data::new(AppState::new(
        store,
        TokenKeys::new(&config.token_secret, config.token_ttl_hours),
    ));

    let bind_address = config.bind_address();
    log::info!("🌐 Server starting on {}", bind_address);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_address);
    log::info!("📄 OpenAPI spec at: http://{}/api-docs/openapi.json", bind_address);

    let allowed_origins = config.cors_allowed_origins.clone();

    // Start HTTP server
    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        if allowed_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi)
            )
            .configure(api::configure)
            .default_service(web::to(api::not_found))
    })
    .bind(bind_address)?
    .run()
    .await
}
