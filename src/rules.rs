use sea_orm::Set;
use uuid::Uuid;

use crate::diagnosis::Diagnosis;
use crate::entities::alert;

pub const LOW_MOISTURE_THRESHOLD: f64 = 30.0;
pub const LOW_MOISTURE_MESSAGE: &str = "Soil moisture is low. Consider watering your plant.";

pub const ALERT_TYPE_LOW_MOISTURE: &str = "low_moisture";
pub const ALERT_TYPE_DISEASE_DETECTED: &str = "disease_detected";

/// An alert a rule decided to raise. The caller attaches the plant id and
/// timestamp when persisting.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAlert {
    pub alert_type: &'static str,
    pub message: String,
    pub severity: String,
}

impl NewAlert {
    /// Attach the plant and stamp the row for insertion.
    pub fn into_active_model(self, plant_id: Uuid) -> alert::ActiveModel {
        alert::ActiveModel {
            id: Set(Uuid::new_v4()),
            plant_id: Set(plant_id),
            alert_type: Set(self.alert_type.to_string()),
            message: Set(self.message),
            severity: Set(self.severity),
            timestamp: Set(chrono::Utc::now().naive_utc()),
            resolved: Set(false),
        }
    }
}

/// Single moisture rule: strictly below the threshold raises an alert.
/// Repeated low readings raise repeated alerts; there is no deduplication.
pub fn evaluate_sensor_reading(soil_moisture: f64) -> Option<NewAlert> {
    if soil_moisture < LOW_MOISTURE_THRESHOLD {
        Some(NewAlert {
            alert_type: ALERT_TYPE_LOW_MOISTURE,
            message: LOW_MOISTURE_MESSAGE.to_string(),
            severity: "medium".to_string(),
        })
    } else {
        None
    }
}

/// Any non-healthy diagnosis raises an alert carrying the diagnosis severity
/// in lowercase.
pub fn evaluate_diagnosis(diagnosis: &Diagnosis) -> Option<NewAlert> {
    if diagnosis.is_healthy() {
        return None;
    }
    Some(NewAlert {
        alert_type: ALERT_TYPE_DISEASE_DETECTED,
        message: format!("Disease detected: {}", diagnosis.disease_name),
        severity: diagnosis.severity.to_lowercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagnosis(name: &str, severity: &str) -> Diagnosis {
        Diagnosis {
            disease_name: name.to_string(),
            confidence: 0.9,
            severity: severity.to_string(),
            treatment: String::new(),
            description: String::new(),
            recommendations: vec![],
        }
    }

    #[test]
    fn low_moisture_raises_an_alert() {
        let alert = evaluate_sensor_reading(25.0).expect("expected an alert");
        assert_eq!(alert.alert_type, "low_moisture");
        assert_eq!(alert.severity, "medium");
        assert_eq!(alert.message, LOW_MOISTURE_MESSAGE);
    }

    #[test]
    fn adequate_moisture_raises_nothing() {
        assert_eq!(evaluate_sensor_reading(50.0), None);
    }

    #[test]
    fn threshold_is_strict() {
        assert_eq!(evaluate_sensor_reading(30.0), None);
        assert!(evaluate_sensor_reading(29.999).is_some());
    }

    #[test]
    fn disease_diagnosis_raises_alert_with_lowercase_severity() {
        let alert =
            evaluate_diagnosis(&diagnosis("Tomato Late Blight", "High")).expect("expected alert");
        assert_eq!(alert.alert_type, "disease_detected");
        assert_eq!(alert.severity, "high");
        assert_eq!(alert.message, "Disease detected: Tomato Late Blight");
    }

    #[test]
    fn healthy_diagnosis_raises_nothing() {
        assert_eq!(evaluate_diagnosis(&diagnosis("Healthy Plant", "None")), None);
    }
}
