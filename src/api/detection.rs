use axum::{
    extract::{Extension, Multipart, Path},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use base64::{engine::general_purpose, Engine};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Serialize;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::diagnosis::DynDiagnosisSource;
use crate::entities::{detection, Detection};
use crate::rules;

const DETECTION_LIST_LIMIT: u64 = 50;

#[derive(Serialize)]
pub struct DetectDiseaseResponse {
    pub disease_name: String,
    // Percentage, one decimal. The stored record keeps the raw fraction.
    pub confidence: f64,
    pub severity: String,
    pub treatment: String,
    pub description: String,
    pub recommendations: Vec<String>,
}

pub async fn detect_disease(
    Path(plant_id): Path<Uuid>,
    Extension(db): Extension<DatabaseConnection>,
    Extension(diagnosis_source): Extension<DynDiagnosisSource>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()}))))?
    {
        if field.name() != Some("file") {
            continue;
        }

        // The type check comes first so a bad upload is rejected before any
        // body bytes are pulled in.
        let is_image = field
            .content_type()
            .and_then(|ct| ct.parse::<mime::Mime>().ok())
            .map(|m| m.type_() == mime::IMAGE)
            .unwrap_or(false);
        if !is_image {
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({"error": "File must be an image"})),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| (StatusCode::BAD_REQUEST, Json(json!({"error": e.to_string()}))))?;
        let image_base64 = general_purpose::STANDARD.encode(&data);

        // Diagnosis is drawn from the injected source; the image content
        // plays no part in it.
        let diagnosis = diagnosis_source.diagnose();

        let new_detection = detection::ActiveModel {
            id: Set(Uuid::new_v4()),
            plant_id: Set(plant_id),
            image_data: Set(image_base64),
            disease_name: Set(diagnosis.disease_name.clone()),
            confidence: Set(diagnosis.confidence),
            severity: Set(diagnosis.severity.clone()),
            treatment: Set(diagnosis.treatment.clone()),
            description: Set(diagnosis.description.clone()),
            timestamp: Set(chrono::Utc::now().naive_utc()),
        };
        new_detection.insert(&db).await.map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        })?;
        crate::metrics::increment_detections(&diagnosis.disease_name);

        if let Some(new_alert) = rules::evaluate_diagnosis(&diagnosis) {
            let alert_type = new_alert.alert_type;
            new_alert
                .into_active_model(plant_id)
                .insert(&db)
                .await
                .map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        Json(json!({"error": e.to_string()})),
                    )
                })?;
            crate::metrics::increment_alerts(alert_type);
            info!(
                plant_id = %plant_id,
                disease = %diagnosis.disease_name,
                "disease alert raised"
            );
        }

        return Ok(Json(DetectDiseaseResponse {
            confidence: super::round1(diagnosis.confidence * 100.0),
            disease_name: diagnosis.disease_name,
            severity: diagnosis.severity,
            treatment: diagnosis.treatment,
            description: diagnosis.description,
            recommendations: diagnosis.recommendations,
        }));
    }

    Err((
        StatusCode::BAD_REQUEST,
        Json(json!({"error": "No file field found"})),
    ))
}

pub async fn list_plant_detections(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
) -> axum::response::Response {
    match Detection::find()
        .filter(detection::Column::PlantId.eq(plant_id))
        .order_by_desc(detection::Column::Timestamp)
        .limit(DETECTION_LIST_LIMIT)
        .all(&db)
        .await
    {
        Ok(detections) => (StatusCode::OK, Json(detections)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
