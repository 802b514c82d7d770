use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

use crate::tables::HospitalKind;

/// Top-level view of the navigation flow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    #[serde(alias = "hero")]
    Search,
    Results,
    #[serde(alias = "details")]
    Detail,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Section::Search => "search",
            Section::Results => "results",
            Section::Detail => "detail",
        };
        f.write_str(name)
    }
}

/// Estimated price band for one condition at one hospital.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRange {
    #[serde(rename = "predictedDisease", default)]
    pub condition: String,
    pub low: u64,
    pub high: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcceptedScheme {
    #[serde(rename = "schemeName")]
    pub scheme_name: String,
    #[serde(rename = "schemeId", default, skip_serializing_if = "Option::is_none")]
    pub scheme_id: Option<String>,
}

/// Hospital record as returned by the hospital search call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalDescriptor {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hospital_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_cost_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialities: Vec<String>,
    #[serde(
        rename = "acceptedSchemes",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub accepted_schemes: Vec<AcceptedScheme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_beds: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_cost: Option<CostRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_text: Option<String>,
}

impl HospitalDescriptor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            address: String::new(),
            city: String::new(),
            hospital_type: None,
            base_cost_factor: None,
            rating: None,
            specialities: Vec::new(),
            accepted_schemes: Vec::new(),
            map_url: None,
            contact: None,
            total_beds: None,
            doctor_count: None,
            computed_cost: None,
            cost_text: None,
        }
    }

    pub fn with_type(mut self, hospital_type: impl Into<String>) -> Self {
        self.hospital_type = Some(hospital_type.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    pub fn kind(&self) -> HospitalKind {
        HospitalKind::from_declared(self.hospital_type.as_deref())
    }

    /// Per-facility pricing override. Absent, zero, negative or non-finite factors price at 1.0.
    pub fn base_factor(&self) -> f64 {
        self.base_cost_factor
            .filter(|factor| factor.is_finite() && *factor > 0.0)
            .unwrap_or(1.0)
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Urgency {
    #[default]
    Low,
    Medium,
    High,
}

impl Urgency {
    /// Case-insensitive; anything unrecognized is treated as low.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "high" => Urgency::High,
            "medium" => Urgency::Medium,
            _ => Urgency::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Urgency::Low => "Low",
            Urgency::Medium => "Medium",
            Urgency::High => "High",
        }
    }
}

impl Serialize for Urgency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Urgency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(Urgency::parse).unwrap_or_default())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleDisease {
    pub name: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Result of the external symptom analysis. Only three fields are interpreted; everything else
/// is carried through untouched so snapshots round-trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speciality: Option<String>,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub possible_diseases: Vec<PossibleDisease>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AnalysisResult {
    pub fn speciality_or_default(&self) -> &str {
        self.speciality
            .as_deref()
            .filter(|speciality| !speciality.trim().is_empty())
            .unwrap_or("General Physician")
    }

    pub fn top_disease(&self) -> Option<&str> {
        self.possible_diseases
            .first()
            .map(|disease| disease.name.as_str())
            .filter(|name| !name.trim().is_empty())
    }
}

/// The sole unit of durable UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub hospitals: Vec<HospitalDescriptor>,
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub city: String,
    #[serde(default = "restored_section")]
    pub active_section: Section,
    #[serde(default)]
    pub detail_hospital: Option<HospitalDescriptor>,
}

fn restored_section() -> Section {
    Section::Results
}

/// Request body of the analyze call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub symptoms_text: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub analysis: AnalysisResult,
}

/// Query parameters of the hospital search call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HospitalQuery {
    #[serde(default)]
    pub speciality: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub disease: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HospitalsResponse {
    pub hospitals: Vec<HospitalDescriptor>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn urgency_is_case_insensitive_and_defaults_to_low() {
        let analysis: AnalysisResult = serde_json::from_value(json!({
            "speciality": "Cardiology",
            "urgency": "HIGH",
            "possible_diseases": [{"name": "Angina", "probability": 0.5}]
        }))
        .unwrap();
        assert_eq!(analysis.urgency, Urgency::High);

        let missing: AnalysisResult = serde_json::from_value(json!({})).unwrap();
        assert_eq!(missing.urgency, Urgency::Low);
        assert_eq!(missing.speciality_or_default(), "General Physician");
        assert_eq!(missing.top_disease(), None);

        let null: AnalysisResult = serde_json::from_value(json!({"urgency": null})).unwrap();
        assert_eq!(null.urgency, Urgency::Low);
    }

    #[test]
    fn opaque_analysis_fields_survive() {
        let raw = json!({"speciality": "ENT", "urgency": "low", "possible_diseases": [], "confidence": 0.5});
        let analysis: AnalysisResult = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(analysis.extra.get("confidence"), Some(&json!(0.5)));
        assert_eq!(serde_json::to_value(&analysis).unwrap(), raw);
    }

    #[test]
    fn hospital_ids_accept_numbers() {
        let hospital: HospitalDescriptor =
            serde_json::from_value(json!({"id": 7, "name": "Civil Hospital"})).unwrap();
        assert_eq!(hospital.id, "7");
        assert_eq!(hospital.kind(), HospitalKind::Unknown);
        assert_eq!(hospital.base_factor(), 1.0);
    }

    #[test]
    fn legacy_section_names_are_accepted() {
        let hero: Section = serde_json::from_value(json!("hero")).unwrap();
        let details: Section = serde_json::from_value(json!("details")).unwrap();
        assert_eq!(hero, Section::Search);
        assert_eq!(details, Section::Detail);
        assert_eq!(serde_json::to_value(Section::Detail).unwrap(), json!("detail"));
    }

    #[test]
    fn snapshot_without_section_restores_results() {
        let snapshot: SessionSnapshot =
            serde_json::from_value(json!({"hospitals": [], "symptoms": "fever"})).unwrap();
        assert_eq!(snapshot.active_section, Section::Results);
    }
}
