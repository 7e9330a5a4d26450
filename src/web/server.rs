use axum::{routing::get, routing::post, Json, Router};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::store::Store;

use super::api::report as report_handlers;
use super::api::telemetry as telemetry_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::ui::handlers as ui_handlers;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<Mutex<Store>>,
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "message": "Rover base is running",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "submit_sample": "/api/telemetry/sample",
            "add_waypoint": "/api/telemetry/waypoint",
            "route_analysis": "/api/report/analysis",
            "report_data": "/api/report/data",
            "export": "/api/report/export",
            "html_report": "/report"
        }
    }))
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let store = Store::new(config.storage.base_folder.clone());

    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(Mutex::new(store)),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // Service banner and rendered report
        .route("/", get(root))
        .route("/report", get(ui_handlers::report_page))
        // Telemetry API endpoints
        .route(
            "/api/telemetry/sample",
            post(telemetry_handlers::submit_sample),
        )
        .route(
            "/api/telemetry/samples",
            get(telemetry_handlers::list_samples),
        )
        .route(
            "/api/telemetry/waypoint",
            post(telemetry_handlers::submit_waypoint),
        )
        .route(
            "/api/telemetry/waypoint/auto",
            post(telemetry_handlers::auto_waypoint),
        )
        .route(
            "/api/telemetry/waypoints",
            get(telemetry_handlers::list_waypoints),
        )
        // Report API endpoints
        .route("/api/report/analysis", get(report_handlers::analysis))
        .route("/api/report/data", get(report_handlers::report_data))
        .route("/api/report/export", get(report_handlers::export))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await
}
