//! Offline symptom triage backing `POST /api/analyze`.
//!
//! A keyword decision list: the first branch whose keywords occur in the text decides the
//! speciality, the urgency and two candidate diseases.

use care_flow::{AnalysisResult, PossibleDisease, Urgency};
use serde_json::{Map, json};

fn disease(name: &str, probability: f64, notes: &str) -> PossibleDisease {
    PossibleDisease {
        name: name.to_string(),
        probability,
        notes: Some(notes.to_string()),
    }
}

fn mentions_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

pub fn triage(symptoms_text: &str) -> AnalysisResult {
    let text = symptoms_text.to_lowercase();

    let (speciality, urgency, possible_diseases) = if text.contains("fever") {
        if mentions_any(&text, &["joint", "muscle", "pain"]) {
            (
                "General Medicine",
                Urgency::Medium,
                vec![
                    disease("Dengue Fever", 0.6, "Fever with joint/muscle pain"),
                    disease("Viral Infection", 0.3, "Common viral symptoms"),
                ],
            )
        } else {
            (
                "General Medicine",
                Urgency::Low,
                vec![
                    disease("Viral Fever", 0.7, "Common fever symptoms"),
                    disease("Flu", 0.2, "Influenza-like illness"),
                ],
            )
        }
    } else if text.contains("chest") && text.contains("pain") {
        (
            "Cardiology",
            Urgency::High,
            vec![
                disease("Angina", 0.5, "Chest pain, needs evaluation"),
                disease("Gastritis", 0.3, "Acid reflux related"),
            ],
        )
    } else if text.contains("head") {
        (
            "Neurology",
            Urgency::Low,
            vec![
                disease("Tension Headache", 0.6, "Common headache"),
                disease("Migraine", 0.3, "Severe headache"),
            ],
        )
    } else if mentions_any(&text, &["stomach", "abdominal", "vomit"]) {
        (
            "Gastroenterology",
            Urgency::Low,
            vec![
                disease("Gastroenteritis", 0.6, "Stomach infection"),
                disease("Food Poisoning", 0.3, "Food-related illness"),
            ],
        )
    } else if mentions_any(&text, &["cough", "cold"]) {
        (
            "General Medicine",
            Urgency::Low,
            vec![
                disease("Upper Respiratory Infection", 0.7, "Common cold"),
                disease("Bronchitis", 0.2, "Chest infection"),
            ],
        )
    } else {
        (
            "General Physician",
            Urgency::Low,
            vec![disease("General Checkup Recommended", 0.5, "Consult a doctor")],
        )
    };

    let mut extra = Map::new();
    extra.insert("confidence".to_string(), json!(0.5));

    AnalysisResult {
        speciality: Some(speciality.to_string()),
        urgency,
        possible_diseases,
        extra,
    }
}
