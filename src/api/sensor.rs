use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rand::Rng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::entities::{sensor_reading, SensorReading};
use crate::rules;

const READING_LIST_LIMIT: u64 = 100;

#[derive(serde::Deserialize, Default)]
pub struct SensorDataRequest {
    soil_moisture: Option<f64>,
    temperature: Option<f64>,
    humidity: Option<f64>,
    light_level: Option<f64>,
}

// Telemetry is accepted for any plant id, existing or not. Fields the probe
// did not report are synthesized within plausible indoor ranges.
pub async fn add_sensor_data(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
    Json(payload): Json<SensorDataRequest>,
) -> Response {
    // rng stays inside this block: ThreadRng must not be held across awaits.
    let (soil_moisture, temperature, humidity, light_level) = {
        let mut rng = rand::rng();
        let soil_moisture = payload
            .soil_moisture
            .unwrap_or_else(|| rng.random_range(30.0..80.0));
        let temperature = payload
            .temperature
            .unwrap_or_else(|| rng.random_range(18.0..28.0));
        let humidity = payload
            .humidity
            .unwrap_or_else(|| rng.random_range(40.0..70.0));
        let light_level = payload
            .light_level
            .unwrap_or_else(|| rng.random_range(200.0..800.0));
        (soil_moisture, temperature, humidity, light_level)
    };

    let new_reading = sensor_reading::ActiveModel {
        id: Set(Uuid::new_v4()),
        plant_id: Set(plant_id),
        soil_moisture: Set(soil_moisture),
        temperature: Set(temperature),
        humidity: Set(humidity),
        light_level: Set(light_level),
        timestamp: Set(chrono::Utc::now().naive_utc()),
    };

    let reading = match new_reading.insert(&db).await {
        Ok(r) => {
            crate::metrics::increment_sensor_readings();
            r
        }
        Err(e) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
                .into_response()
        }
    };

    // The reading is already persisted; a failed alert write surfaces as an
    // error without undoing it.
    if let Some(new_alert) = rules::evaluate_sensor_reading(reading.soil_moisture) {
        let alert_type = new_alert.alert_type;
        match new_alert.into_active_model(plant_id).insert(&db).await {
            Ok(_) => {
                crate::metrics::increment_alerts(alert_type);
                info!(
                    plant_id = %plant_id,
                    soil_moisture = reading.soil_moisture,
                    "low moisture alert raised"
                );
            }
            Err(e) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"error": e.to_string()})),
                )
                    .into_response()
            }
        }
    }

    (StatusCode::OK, Json(reading)).into_response()
}

pub async fn get_sensor_data(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
) -> Response {
    match SensorReading::find()
        .filter(sensor_reading::Column::PlantId.eq(plant_id))
        .order_by_desc(sensor_reading::Column::Timestamp)
        .limit(READING_LIST_LIMIT)
        .all(&db)
        .await
    {
        Ok(readings) => (StatusCode::OK, Json(readings)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
