// File: services/pixrelay_backend/src/main.rs
use axum::{routing::get, Router};
use pixrelay_common::logging;
use pixrelay_config::load_config;
use pixrelay_sacapay::routes as sacapay_routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() {
    let config = Arc::new(load_config().expect("Failed to load config"));
    logging::init();

    let api_router = Router::new()
        .route("/", get(|| async { "Welcome to PixRelay API!" }))
        .merge(sacapay_routes::routes(config.clone()));

    #[allow(unused_mut)]
    let mut app = Router::new()
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http());

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use pixrelay_sacapay::doc::SacapayApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "PixRelay API",
                version = "0.1.0",
                description = "Sacapay PIX payment glue API"
            ),
            servers( (url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(SacapayApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui =
            SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc.clone());
        app = app.merge(swagger_ui);
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Failed to bind server address");
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .expect("Server error");
}
