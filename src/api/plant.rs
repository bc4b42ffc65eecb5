use axum::{
    extract::{Extension, Json, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QuerySelect, Set};
use serde_json::json;
use uuid::Uuid;

use crate::entities::plant;

// Listing is bounded; the store's natural order is kept.
const PLANT_LIST_LIMIT: u64 = 1000;

#[derive(serde::Deserialize)]
pub struct CreatePlantRequest {
    name: String,
    plant_type: String,
}

pub async fn create_plant(
    Extension(db): Extension<DatabaseConnection>,
    Json(payload): Json<CreatePlantRequest>,
) -> Response {
    let new_plant = plant::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        plant_type: Set(payload.plant_type),
        created_at: Set(chrono::Utc::now().naive_utc()),
        last_watered: Set(None),
        soil_moisture: Set(None),
        health_status: Set("healthy".to_string()),
    };

    match new_plant.insert(&db).await {
        Ok(p) => {
            crate::metrics::increment_plants();
            (StatusCode::CREATED, Json(p)).into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))).into_response(),
    }
}

pub async fn list_plants(Extension(db): Extension<DatabaseConnection>) -> Response {
    match plant::Entity::find().limit(PLANT_LIST_LIMIT).all(&db).await {
        Ok(plants) => (StatusCode::OK, Json(plants)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))).into_response(),
    }
}

pub async fn get_plant(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
) -> Response {
    match plant::Entity::find_by_id(plant_id).one(&db).await {
        Ok(Some(p)) => (StatusCode::OK, Json(p)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, Json(json!({"error": "Plant not found"}))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))).into_response(),
    }
}

// Deleting a plant does not touch detections, sensor readings, or alerts
// that reference it; orphaned rows are tolerated.
pub async fn delete_plant(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
) -> Response {
    match plant::Entity::delete_by_id(plant_id).exec(&db).await {
        Ok(res) if res.rows_affected == 0 => (StatusCode::NOT_FOUND, Json(json!({"error": "Plant not found"}))).into_response(),
        Ok(_) => (StatusCode::OK, Json(json!({"message": "Plant deleted successfully"}))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))).into_response(),
    }
}

pub async fn water_plant(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
) -> Response {
    let plant = match plant::Entity::find_by_id(plant_id).one(&db).await {
        Ok(Some(p)) => p,
        Ok(None) => return (StatusCode::NOT_FOUND, Json(json!({"error": "Plant not found"}))).into_response(),
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))).into_response(),
    };

    let mut active_plant = plant.into_active_model();
    active_plant.last_watered = Set(Some(chrono::Utc::now().naive_utc()));

    match active_plant.update(&db).await {
        Ok(_) => (StatusCode::OK, Json(json!({"message": "Plant watered successfully"}))).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": e.to_string()}))).into_response(),
    }
}
