use axum::response::Json;
use serde_json::{json, Value};

pub mod alert;
pub mod dashboard;
pub mod detection;
pub mod plant;
pub mod sensor;

pub async fn root() -> Json<Value> {
    Json(json!({ "message": "AI Plant Care System API" }))
}

// Values reported to clients (confidence percent, health percentage) carry
// one decimal place.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn rounds_to_one_decimal() {
        assert_eq!(round1(33.333333), 33.3);
        assert_eq!(round1(87.65), 87.7);
        assert_eq!(round1(0.0), 0.0);
    }
}
