//! Static pricing tables.
//!
//! These are configuration data, not user-facing interfaces, but every value here is part of the
//! estimate's output contract and must stay in sync with the hospital search service.

use serde::{Deserialize, Serialize};

/// Condition used when no symptom keyword matches.
pub const DEFAULT_CONDITION: &str = "General Checkup";

/// Lower and upper edges of the estimate band, as multiples of the computed total (±15%).
pub const ESTIMATE_LOW: f64 = 0.85;
pub const ESTIMATE_HIGH: f64 = 1.15;

/// Coarse severity bucket driving the default base cost and location sensitivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
    Critical,
    /// Condition is unknown or carries no tier. Priced at the minimal fallback base of 500 and
    /// never adjusted for location.
    Unclassified,
}

impl Severity {
    pub fn default_base_cost(self) -> u64 {
        match self {
            Severity::Mild => 300,
            Severity::Moderate => 5_000,
            Severity::Severe => 50_000,
            Severity::Critical => 150_000,
            Severity::Unclassified => 500,
        }
    }

    /// Minor-ailment pricing is dominated by the consultation fee, so only moderate and worse
    /// conditions pick up the city factor.
    pub fn is_location_sensitive(self) -> bool {
        matches!(
            self,
            Severity::Moderate | Severity::Severe | Severity::Critical
        )
    }
}

/// A canonical condition and its pricing inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Condition {
    pub name: &'static str,
    pub severity: Severity,
    pub base_cost: Option<u64>,
}

impl Condition {
    const fn new(name: &'static str, severity: Severity, base_cost: u64) -> Self {
        Self {
            name,
            severity,
            base_cost: Some(base_cost),
        }
    }

    pub fn base_cost(&self) -> u64 {
        self.base_cost
            .unwrap_or_else(|| self.severity.default_base_cost())
    }
}

pub const CONDITIONS: &[Condition] = &[
    // Serious conditions
    Condition::new("Angina", Severity::Unclassified, 40_000),
    Condition::new("Myocardial infarction", Severity::Critical, 150_000),
    Condition::new("Appendicitis", Severity::Severe, 50_000),
    Condition::new("Hip Replacement", Severity::Severe, 180_000),
    Condition::new("Dengue", Severity::Moderate, 8_000),
    // Common problems
    Condition::new("Fever", Severity::Mild, 100),
    Condition::new("Cold", Severity::Mild, 100),
    Condition::new("Cough", Severity::Mild, 100),
    Condition::new("Viral Infection", Severity::Moderate, 300),
    Condition::new("Stomach Pain", Severity::Unclassified, 400),
    Condition::new("Headache", Severity::Mild, 200),
    Condition::new("Body Pain", Severity::Unclassified, 300),
    Condition::new("Food Poisoning", Severity::Moderate, 800),
    Condition::new("Minor Injury", Severity::Unclassified, 600),
    Condition::new("Skin Allergy", Severity::Mild, 400),
    Condition::new("UTI", Severity::Moderate, 1_000),
    Condition::new("Sore Throat", Severity::Mild, 250),
    Condition::new("General Checkup", Severity::Mild, 300),
];

/// Normalized symptom keyword to canonical condition name.
pub const SYMPTOM_KEYWORDS: &[(&str, &str)] = &[
    ("cold", "Cold"),
    ("fever", "Fever"),
    ("cough", "Cough"),
    ("headache", "Headache"),
    ("throat", "Sore Throat"),
    ("sorethroat", "Sore Throat"),
    ("vomiting", "Food Poisoning"),
    ("stomach", "Stomach Pain"),
    ("stomachpain", "Stomach Pain"),
    ("bodypain", "Body Pain"),
    ("weakness", "Viral Infection"),
    ("allergy", "Skin Allergy"),
    ("urine", "UTI"),
    ("injury", "Minor Injury"),
];

/// Location factors keyed by exact city name.
pub const CITY_FACTORS: &[(&str, f64)] = &[
    ("Ahmedabad", 1.05),
    ("Mumbai", 1.3),
    ("Gandhinagar", 1.2),
    ("Delhi", 1.25),
    ("rural", 0.85),
];

/// Declared facility type of a hospital.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HospitalKind {
    Government,
    Private,
    Premium,
    Trust,
    /// Missing or unrecognized type; priced above government/trust but below private.
    Unknown,
}

impl HospitalKind {
    /// Exact key match on the trimmed type; any other spelling prices as [`HospitalKind::Unknown`].
    pub fn from_declared(declared: Option<&str>) -> Self {
        match declared.map(str::trim) {
            Some("government") => HospitalKind::Government,
            Some("private") => HospitalKind::Private,
            Some("premium") => HospitalKind::Premium,
            Some("trust") => HospitalKind::Trust,
            _ => HospitalKind::Unknown,
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            HospitalKind::Government => 0.5,
            HospitalKind::Private => 1.3,
            HospitalKind::Premium => 1.6,
            HospitalKind::Trust => 0.8,
            HospitalKind::Unknown => 1.2,
        }
    }
}

pub fn find_condition(name: &str) -> Option<&'static Condition> {
    CONDITIONS.iter().find(|condition| condition.name == name)
}

pub fn condition_for_keyword(keyword: &str) -> Option<&'static str> {
    SYMPTOM_KEYWORDS
        .iter()
        .find(|(key, _)| *key == keyword)
        .map(|(_, condition)| *condition)
}

/// Unknown or missing cities are priced at 1.0.
pub fn city_factor(city: Option<&str>) -> f64 {
    city.and_then(|city| {
        CITY_FACTORS
            .iter()
            .find(|(name, _)| *name == city)
            .map(|(_, factor)| *factor)
    })
    .unwrap_or(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_points_at_a_known_condition() {
        for (keyword, condition) in SYMPTOM_KEYWORDS {
            assert!(
                find_condition(condition).is_some(),
                "keyword {keyword} maps to unknown condition {condition}"
            );
        }
    }

    #[test]
    fn unclassified_conditions_keep_their_explicit_base() {
        let angina = find_condition("Angina").unwrap();
        assert_eq!(angina.severity, Severity::Unclassified);
        assert_eq!(angina.base_cost(), 40_000);
        assert!(!angina.severity.is_location_sensitive());
    }

    #[test]
    fn unknown_hospital_type_is_not_private() {
        assert_eq!(HospitalKind::from_declared(None), HospitalKind::Unknown);
        assert_eq!(HospitalKind::from_declared(Some("clinic")), HospitalKind::Unknown);
        assert_eq!(HospitalKind::from_declared(Some(" premium ")), HospitalKind::Premium);
        assert_eq!(HospitalKind::from_declared(Some("Premium")), HospitalKind::Unknown);
        assert_ne!(
            HospitalKind::Unknown.multiplier(),
            HospitalKind::Private.multiplier()
        );
    }

    #[test]
    fn city_lookup_is_exact() {
        assert_eq!(city_factor(Some("Mumbai")), 1.3);
        assert_eq!(city_factor(Some("mumbai")), 1.0);
        assert_eq!(city_factor(None), 1.0);
    }
}
