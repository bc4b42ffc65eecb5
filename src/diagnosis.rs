use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

/// Diagnosis name that indicates no disease was found. Detections carrying
/// this name never produce alerts and count toward the healthy total on the
/// dashboard.
pub const HEALTHY_PLANT: &str = "Healthy Plant";

struct DiseaseInfo {
    name: &'static str,
    severity: &'static str,
    treatment: &'static str,
    description: &'static str,
    recommendations: [&'static str; 4],
}

static DISEASE_CATALOG: [DiseaseInfo; 4] = [
    DiseaseInfo {
        name: "Tomato Late Blight",
        severity: "High",
        treatment: "Remove affected leaves immediately. Apply copper-based fungicide every 7-10 days. Ensure good air circulation.",
        description: "A serious fungal disease that causes dark, water-soaked spots on leaves and stems. Can spread rapidly in humid conditions.",
        recommendations: [
            "Improve air circulation around plants",
            "Water at soil level to avoid wetting leaves",
            "Apply preventive fungicide sprays",
            "Remove and destroy infected plant material",
        ],
    },
    DiseaseInfo {
        name: "Powdery Mildew",
        severity: "Medium",
        treatment: "Spray with baking soda solution (1 tsp per quart of water). Improve air circulation and reduce humidity.",
        description: "White, powdery fungal growth on leaf surfaces. Common in humid conditions with poor air circulation.",
        recommendations: [
            "Increase spacing between plants",
            "Water in the morning to allow leaves to dry",
            "Apply neem oil or horticultural oil",
            "Remove severely affected leaves",
        ],
    },
    DiseaseInfo {
        name: "Bacterial Leaf Spot",
        severity: "Medium",
        treatment: "Remove affected leaves and apply copper-based bactericide. Avoid overhead watering.",
        description: "Small, dark spots with yellow halos on leaves. Caused by bacterial infection, often spread by water splash.",
        recommendations: [
            "Use drip irrigation instead of overhead watering",
            "Apply copper-based treatments",
            "Remove infected plant debris",
            "Improve garden sanitation",
        ],
    },
    DiseaseInfo {
        name: HEALTHY_PLANT,
        severity: "None",
        treatment: "Continue current care routine. Monitor regularly for any changes.",
        description: "Your plant appears healthy with no signs of disease. Keep up the good work!",
        recommendations: [
            "Maintain consistent watering schedule",
            "Ensure adequate sunlight exposure",
            "Monitor for early signs of stress",
            "Continue regular fertilization",
        ],
    },
];

/// Outcome of one diagnosis run. `confidence` is a 0-1 fraction; handlers
/// convert it to a percentage at the API boundary.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnosis {
    pub disease_name: String,
    pub confidence: f64,
    pub severity: String,
    pub treatment: String,
    pub description: String,
    pub recommendations: Vec<String>,
}

impl Diagnosis {
    pub fn is_healthy(&self) -> bool {
        self.disease_name == HEALTHY_PLANT
    }
}

/// Produces a diagnosis for an uploaded image. The image bytes are stored
/// but never inspected here; swapping in a real classifier means providing
/// another implementation of this trait and nothing else.
pub trait DiagnosisSource: Send + Sync {
    fn diagnose(&self) -> Diagnosis;
}

pub type DynDiagnosisSource = Arc<dyn DiagnosisSource>;

/// Picks uniformly from the canned catalog and samples a confidence score.
pub struct RandomDiagnosisSource;

impl DiagnosisSource for RandomDiagnosisSource {
    fn diagnose(&self) -> Diagnosis {
        let mut rng = rand::rng();
        let info = &DISEASE_CATALOG[rng.random_range(0..DISEASE_CATALOG.len())];
        let confidence = if info.name == HEALTHY_PLANT {
            rng.random_range(0.85..0.98)
        } else {
            rng.random_range(0.75..0.95)
        };

        Diagnosis {
            disease_name: info.name.to_string(),
            confidence,
            severity: info.severity.to_string(),
            treatment: info.treatment.to_string(),
            description: info.description.to_string(),
            recommendations: info.recommendations.iter().map(|r| r.to_string()).collect(),
        }
    }
}
