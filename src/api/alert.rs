use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde_json::json;
use uuid::Uuid;

use crate::entities::{alert, prelude::*};

const PLANT_ALERT_LIST_LIMIT: u64 = 50;
const ALERT_LIST_LIMIT: u64 = 100;

pub async fn list_plant_alerts(
    Extension(db): Extension<DatabaseConnection>,
    Path(plant_id): Path<Uuid>,
) -> impl IntoResponse {
    match Alert::find()
        .filter(alert::Column::PlantId.eq(plant_id))
        .order_by_desc(alert::Column::Timestamp)
        .limit(PLANT_ALERT_LIST_LIMIT)
        .all(&db)
        .await
    {
        Ok(alerts) => (StatusCode::OK, Json(alerts)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

pub async fn list_alerts(Extension(db): Extension<DatabaseConnection>) -> impl IntoResponse {
    match Alert::find()
        .order_by_desc(alert::Column::Timestamp)
        .limit(ALERT_LIST_LIMIT)
        .all(&db)
        .await
    {
        Ok(alerts) => (StatusCode::OK, Json(alerts)).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}

// PATCH /alerts/:id/resolve
//
// A single conditional UPDATE. Zero rows affected means either the id does
// not exist or the alert was already resolved; both report 404 and callers
// cannot tell them apart.
pub async fn resolve_alert(
    Extension(db): Extension<DatabaseConnection>,
    Path(alert_id): Path<Uuid>,
) -> impl IntoResponse {
    let result = Alert::update_many()
        .col_expr(alert::Column::Resolved, Expr::value(true))
        .filter(alert::Column::Id.eq(alert_id))
        .filter(alert::Column::Resolved.eq(false))
        .exec(&db)
        .await;

    match result {
        Ok(res) if res.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": "Alert not found"})),
        )
            .into_response(),
        Ok(_) => (StatusCode::OK, Json(json!({"message": "Alert resolved"}))).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": e.to_string()})),
        )
            .into_response(),
    }
}
