use axum::{
    routing::{get, patch, post},
    Extension, Router,
};
use sea_orm::DatabaseConnection;

use crate::{api, diagnosis::DynDiagnosisSource};

async fn health_check() -> &'static str {
    "OK"
}

/// Core API surface under `/api`, plus the health probe. Operational layers
/// (tracing, CORS, prometheus, body limits) are stacked on top by the server
/// binary.
pub fn router(db: DatabaseConnection, diagnosis_source: DynDiagnosisSource) -> Router {
    let api_routes = Router::new()
        .route("/", get(api::root))
        .route(
            "/plants",
            get(api::plant::list_plants).post(api::plant::create_plant),
        )
        .route(
            "/plants/:id",
            get(api::plant::get_plant).delete(api::plant::delete_plant),
        )
        .route("/plants/:id/water", post(api::plant::water_plant))
        .route("/detect-disease/:id", post(api::detection::detect_disease))
        .route(
            "/plants/:id/detections",
            get(api::detection::list_plant_detections),
        )
        .route(
            "/plants/:id/sensor-data",
            get(api::sensor::get_sensor_data).post(api::sensor::add_sensor_data),
        )
        .route("/plants/:id/alerts", get(api::alert::list_plant_alerts))
        .route("/alerts", get(api::alert::list_alerts))
        .route("/alerts/:id/resolve", patch(api::alert::resolve_alert))
        .route("/dashboard/stats", get(api::dashboard::get_stats));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes)
        .layer(Extension(db))
        .layer(Extension(diagnosis_source))
}
