use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::entities::{alert, Alert, Detection, Plant, SensorReading};

/// Seed gauges from table counts at startup so the scrape endpoint reports
/// sensible values before any traffic arrives.
pub async fn init_metrics(db: &DatabaseConnection) {
    let plant_count = Plant::find().count(db).await.unwrap_or(0);
    metrics::gauge!("plantpulse_plants_total").set(plant_count as f64);

    let detection_count = Detection::find().count(db).await.unwrap_or(0);
    metrics::gauge!("plantpulse_detections_total").set(detection_count as f64);

    let reading_count = SensorReading::find().count(db).await.unwrap_or(0);
    metrics::gauge!("plantpulse_sensor_readings_total").set(reading_count as f64);

    let active_alerts = Alert::find()
        .filter(alert::Column::Resolved.eq(false))
        .count(db)
        .await
        .unwrap_or(0);
    metrics::gauge!("plantpulse_active_alerts").set(active_alerts as f64);

    tracing::info!(
        "Initialized metrics: Plants={}, Detections={}, Readings={}, ActiveAlerts={}",
        plant_count,
        detection_count,
        reading_count,
        active_alerts
    );
}

pub fn increment_plants() {
    metrics::gauge!("plantpulse_plants_total").increment(1.0);
}

pub fn increment_detections(disease_name: &str) {
    metrics::gauge!("plantpulse_detections_total").increment(1.0);
    metrics::counter!("plantpulse_detections_by_disease_total", "disease" => disease_name.to_string())
        .increment(1);
}

pub fn increment_sensor_readings() {
    metrics::gauge!("plantpulse_sensor_readings_total").increment(1.0);
}

pub fn increment_alerts(alert_type: &str) {
    metrics::gauge!("plantpulse_active_alerts").increment(1.0);
    metrics::counter!("plantpulse_alerts_total", "alert_type" => alert_type.to_string()).increment(1);
}
