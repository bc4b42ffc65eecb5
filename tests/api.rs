//! Route-level tests driving the axum router against a scripted
//! `MockDatabase`, so no live Postgres is needed.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use tower::ServiceExt;
use uuid::Uuid;

use plantpulse_server::app;
use plantpulse_server::diagnosis::{Diagnosis, DiagnosisSource, RandomDiagnosisSource};
use plantpulse_server::entities::{alert, detection, plant, sensor_reading};

struct FixedDiagnosisSource(Diagnosis);

impl DiagnosisSource for FixedDiagnosisSource {
    fn diagnose(&self) -> Diagnosis {
        self.0.clone()
    }
}

fn test_app(db: DatabaseConnection) -> axum::Router {
    app::router(db, Arc::new(RandomDiagnosisSource))
}

fn plant_model(name: &str, plant_type: &str) -> plant::Model {
    plant::Model {
        id: Uuid::new_v4(),
        name: name.to_string(),
        plant_type: plant_type.to_string(),
        created_at: chrono::Utc::now().naive_utc(),
        last_watered: None,
        soil_moisture: None,
        health_status: "healthy".to_string(),
    }
}

fn detection_model(plant_id: Uuid, disease_name: &str, confidence: f64) -> detection::Model {
    detection::Model {
        id: Uuid::new_v4(),
        plant_id,
        image_data: "aGVsbG8=".to_string(),
        disease_name: disease_name.to_string(),
        confidence,
        severity: "Medium".to_string(),
        treatment: "treat".to_string(),
        description: "desc".to_string(),
        timestamp: chrono::Utc::now().naive_utc(),
    }
}

fn alert_model(plant_id: Uuid, alert_type: &str) -> alert::Model {
    alert::Model {
        id: Uuid::new_v4(),
        plant_id,
        alert_type: alert_type.to_string(),
        message: "message".to_string(),
        severity: "medium".to_string(),
        timestamp: chrono::Utc::now().naive_utc(),
        resolved: false,
    }
}

fn reading_model(plant_id: Uuid, soil_moisture: f64) -> sensor_reading::Model {
    sensor_reading::Model {
        id: Uuid::new_v4(),
        plant_id,
        soil_moisture,
        temperature: 22.0,
        humidity: 55.0,
        light_level: 400.0,
        timestamp: chrono::Utc::now().naive_utc(),
    }
}

fn count_row(n: i64) -> BTreeMap<&'static str, Value> {
    BTreeMap::from([("num_items", Value::BigInt(Some(n)))])
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn multipart_request(uri: &str, content_type: &str, payload: &[u8]) -> Request<Body> {
    let boundary = "test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"leaf\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(payload);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn root_returns_greeting() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let response = test_app(db)
        .oneshot(Request::builder().uri("/api/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "AI Plant Care System API");
}

#[tokio::test]
async fn health_check_responds_ok() {
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
    let response = test_app(db)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_plant_returns_created_profile() {
    let created = plant_model("Basil", "herb");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![created.clone()]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/plants")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"name":"Basil","plant_type":"herb"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Basil");
    assert_eq!(json["plant_type"], "herb");
    assert_eq!(json["health_status"], "healthy");
}

#[tokio::test]
async fn get_unknown_plant_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<plant::Model>::new()])
        .into_connection();

    let uri = format!("/api/plants/{}", Uuid::new_v4());
    let response = test_app(db)
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Plant not found");
}

#[tokio::test]
async fn delete_unknown_plant_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let uri = format!("/api/plants/{}", Uuid::new_v4());
    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn watering_updates_last_watered() {
    let existing = plant_model("Fern", "fern");
    let mut watered = existing.clone();
    watered.last_watered = Some(chrono::Utc::now().naive_utc());

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![existing], vec![watered]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let uri = format!("/api/plants/{}/water", Uuid::new_v4());
    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Plant watered successfully");
}

#[tokio::test]
async fn detect_disease_rejects_non_image_upload() {
    // No scripted results: the request must be rejected before any query.
    let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

    let uri = format!("/api/detect-disease/{}", Uuid::new_v4());
    let response = test_app(db)
        .oneshot(multipart_request(&uri, "text/plain", b"not an image"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "File must be an image");
}

#[tokio::test]
async fn detect_disease_reports_percentage_and_raises_alert() {
    let plant_id = Uuid::new_v4();
    let fixed = Diagnosis {
        disease_name: "Powdery Mildew".to_string(),
        confidence: 0.88,
        severity: "Medium".to_string(),
        treatment: "spray".to_string(),
        description: "white growth".to_string(),
        recommendations: vec!["a".to_string(), "b".to_string()],
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![detection_model(plant_id, "Powdery Mildew", 0.88)]])
        .append_query_results([vec![alert_model(plant_id, "disease_detected")]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let app = app::router(db, Arc::new(FixedDiagnosisSource(fixed)));
    let uri = format!("/api/detect-disease/{plant_id}");
    let response = app
        .oneshot(multipart_request(&uri, "image/png", b"\x89PNG fake"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["disease_name"], "Powdery Mildew");
    assert_eq!(json["confidence"].as_f64().unwrap(), 88.0);
    assert_eq!(json["severity"], "Medium");
}

#[tokio::test]
async fn healthy_diagnosis_skips_the_alert_insert() {
    let plant_id = Uuid::new_v4();
    let fixed = Diagnosis {
        disease_name: "Healthy Plant".to_string(),
        confidence: 0.923,
        severity: "None".to_string(),
        treatment: "keep going".to_string(),
        description: "all good".to_string(),
        recommendations: vec![],
    };

    // Only the detection insert is scripted; an alert insert would error.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![detection_model(plant_id, "Healthy Plant", 0.923)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let app = app::router(db, Arc::new(FixedDiagnosisSource(fixed)));
    let uri = format!("/api/detect-disease/{plant_id}");
    let response = app
        .oneshot(multipart_request(&uri, "image/jpeg", b"fake jpeg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["disease_name"], "Healthy Plant");
    assert_eq!(json["confidence"].as_f64().unwrap(), 92.3);
}

#[tokio::test]
async fn low_moisture_reading_raises_an_alert() {
    let plant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![reading_model(plant_id, 25.0)]])
        .append_query_results([vec![alert_model(plant_id, "low_moisture")]])
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
        ])
        .into_connection();

    let uri = format!("/api/plants/{plant_id}/sensor-data");
    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"soil_moisture":25.0,"temperature":22.0,"humidity":55.0,"light_level":400.0}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["soil_moisture"].as_f64().unwrap(), 25.0);
}

#[tokio::test]
async fn adequate_moisture_reading_raises_no_alert() {
    let plant_id = Uuid::new_v4();
    // Only the reading insert is scripted; an alert insert would error.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![reading_model(plant_id, 50.0)]])
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let uri = format!("/api/plants/{plant_id}/sensor-data");
    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(&uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    r#"{"soil_moisture":50.0,"temperature":22.0,"humidity":55.0,"light_level":400.0}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn listing_plant_alerts_returns_scripted_rows() {
    let plant_id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            alert_model(plant_id, "low_moisture"),
            alert_model(plant_id, "disease_detected"),
        ]])
        .into_connection();

    let uri = format!("/api/plants/{plant_id}/alerts");
    let response = test_app(db)
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn resolving_unknown_alert_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let uri = format!("/api/alerts/{}/resolve", Uuid::new_v4());
    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Alert not found");
}

#[tokio::test]
async fn resolving_alert_reports_success() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .into_connection();

    let uri = format!("/api/alerts/{}/resolve", Uuid::new_v4());
    let response = test_app(db)
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(&uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Alert resolved");
}

#[tokio::test]
async fn dashboard_stats_computes_health_percentage() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![count_row(5)], // plants
            vec![count_row(4)], // detections
            vec![count_row(2)], // active alerts
            vec![count_row(1)], // healthy detections
        ])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total_plants"], 5);
    assert_eq!(json["total_detections"], 4);
    assert_eq!(json["active_alerts"], 2);
    assert_eq!(json["healthy_plants"], 1);
    assert_eq!(json["health_percentage"].as_f64().unwrap(), 25.0);
}

#[tokio::test]
async fn dashboard_stats_with_no_detections_reports_zero_percent() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
            vec![count_row(0)],
        ])
        .into_connection();

    let response = test_app(db)
        .oneshot(
            Request::builder()
                .uri("/api/dashboard/stats")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["health_percentage"].as_f64().unwrap(), 0.0);
}
