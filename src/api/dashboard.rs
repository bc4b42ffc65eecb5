use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use serde::Serialize;
use serde_json::json;

use crate::diagnosis::HEALTHY_PLANT;
use crate::entities::{alert, detection, Alert, Detection, Plant};

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_plants: u64,
    pub total_detections: u64,
    pub active_alerts: u64,
    pub healthy_plants: u64,
    pub health_percentage: f64,
}

// Four independent counts, recomputed on every call.
pub async fn get_stats(Extension(db): Extension<DatabaseConnection>) -> Response {
    match compute_stats(&db).await {
        Ok(stats) => (StatusCode::OK, Json(stats)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

async fn compute_stats(db: &DatabaseConnection) -> Result<DashboardStats, DbErr> {
    let total_plants = Plant::find().count(db).await?;
    let total_detections = Detection::find().count(db).await?;
    let active_alerts = Alert::find()
        .filter(alert::Column::Resolved.eq(false))
        .count(db)
        .await?;
    let healthy_plants = Detection::find()
        .filter(detection::Column::DiseaseName.eq(HEALTHY_PLANT))
        .count(db)
        .await?;

    Ok(DashboardStats {
        total_plants,
        total_detections,
        active_alerts,
        healthy_plants,
        health_percentage: health_percentage(healthy_plants, total_detections),
    })
}

// The denominator floors at 1 so an empty detections table reports 0.0
// instead of dividing by zero.
fn health_percentage(healthy: u64, total: u64) -> f64 {
    super::round1(healthy as f64 / total.max(1) as f64 * 100.0)
}

#[cfg(test)]
mod tests {
    use super::health_percentage;

    #[test]
    fn percentage_with_no_detections_is_zero() {
        assert_eq!(health_percentage(0, 0), 0.0);
    }

    #[test]
    fn percentage_rounds_to_one_decimal() {
        assert_eq!(health_percentage(1, 3), 33.3);
        assert_eq!(health_percentage(2, 3), 66.7);
        assert_eq!(health_percentage(3, 3), 100.0);
    }

    #[test]
    fn all_healthy_is_one_hundred() {
        assert_eq!(health_percentage(7, 7), 100.0);
    }
}
