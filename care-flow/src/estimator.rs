//! Condition + location + hospital to an approximate cost band.
//!
//! Deterministic and side-effect free apart from `debug!` tracing: the output depends only on its
//! inputs and the static tables.

use tracing::debug;

use crate::{
    format::format_cost_range,
    inference::ConditionQuery,
    models::{CostRange, HospitalDescriptor},
    tables::{ESTIMATE_HIGH, ESTIMATE_LOW, HospitalKind, Severity, city_factor, find_condition},
};

/// Breakdown of the multiplicative factors behind an estimate.
#[derive(Debug, Clone, PartialEq)]
pub struct CostBreakdown {
    pub condition: String,
    pub severity: Severity,
    pub base: u64,
    pub city_factor: f64,
    pub hospital_multiplier: f64,
    pub hospital_factor: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.base as f64 * self.city_factor * self.hospital_multiplier * self.hospital_factor
    }

    pub fn range(&self) -> CostRange {
        let total = self.total();
        CostRange {
            condition: self.condition.clone(),
            low: (total * ESTIMATE_LOW).round() as u64,
            high: (total * ESTIMATE_HIGH).round() as u64,
        }
    }
}

pub fn cost_breakdown(
    query: &ConditionQuery,
    city: Option<&str>,
    hospital: Option<&HospitalDescriptor>,
) -> CostBreakdown {
    let condition = query.resolve().to_string();
    let known = find_condition(&condition);
    let severity = known.map_or(Severity::Unclassified, |c| c.severity);
    let base = known.map_or_else(|| severity.default_base_cost(), |c| c.base_cost());

    let city_factor = if severity.is_location_sensitive() {
        city_factor(city.filter(|city| !city.is_empty()))
    } else {
        1.0
    };

    let kind = hospital.map_or(HospitalKind::Unknown, HospitalDescriptor::kind);
    let hospital_factor = hospital.map_or(1.0, HospitalDescriptor::base_factor);

    debug!(
        condition = %condition,
        ?severity,
        base,
        city_factor,
        ?kind,
        hospital_factor,
        "cost breakdown"
    );

    CostBreakdown {
        condition,
        severity,
        base,
        city_factor,
        hospital_multiplier: kind.multiplier(),
        hospital_factor,
    }
}

/// Estimate `[low, high]` for a condition (or symptom list) at a hospital in a city.
pub fn estimate_cost(
    query: &ConditionQuery,
    city: Option<&str>,
    hospital: Option<&HospitalDescriptor>,
) -> CostRange {
    cost_breakdown(query, city, hospital).range()
}

/// Attach the estimate and its display text to a hospital record.
pub fn annotate_hospital(
    hospital: &mut HospitalDescriptor,
    query: &ConditionQuery,
    city: Option<&str>,
) {
    let range = estimate_cost(query, city, Some(hospital));
    hospital.cost_text = Some(format_cost_range(range.low, range.high));
    hospital.computed_cost = Some(range);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn private_hospital() -> HospitalDescriptor {
        HospitalDescriptor::new("1", "Sterling Hospital").with_type("private")
    }

    #[test]
    fn capitalized_type_is_priced_as_unknown() {
        let query = ConditionQuery::condition("Myocardial infarction");
        let hospital = HospitalDescriptor::new("1", "Sterling Hospital").with_type("Private");
        let range = estimate_cost(&query, None, Some(&hospital));
        assert_eq!((range.low, range.high), (153_000, 207_000));
    }

    #[test]
    fn myocardial_infarction_at_private_hospital() {
        let query = ConditionQuery::condition("Myocardial infarction");
        let range = estimate_cost(&query, None, Some(&private_hospital()));
        assert_eq!(range.condition, "Myocardial infarction");
        assert_eq!(range.low, 165_750);
        assert_eq!(range.high, 224_250);
    }

    #[test]
    fn mild_conditions_ignore_city() {
        let query = ConditionQuery::condition("Fever");
        let hospital = private_hospital();
        assert_eq!(
            estimate_cost(&query, Some("Mumbai"), Some(&hospital)),
            estimate_cost(&query, None, Some(&hospital))
        );
    }

    #[test]
    fn moderate_conditions_pick_up_city_factor() {
        let query = ConditionQuery::condition("Dengue");
        let hospital = private_hospital();
        let mumbai = estimate_cost(&query, Some("Mumbai"), Some(&hospital));
        let elsewhere = estimate_cost(&query, Some("Surat"), Some(&hospital));
        assert!(mumbai.low > elsewhere.low);
        assert!(mumbai.high > elsewhere.high);
    }

    #[test]
    fn unknown_condition_uses_minimal_base_and_unknown_type() {
        let query = ConditionQuery::condition("Dengue Fever");
        let breakdown = cost_breakdown(&query, Some("Mumbai"), None);
        assert_eq!(breakdown.severity, Severity::Unclassified);
        assert_eq!(breakdown.base, 500);
        assert_eq!(breakdown.city_factor, 1.0);
        assert_eq!(breakdown.hospital_multiplier, 1.2);
        let range = breakdown.range();
        assert_eq!((range.low, range.high), (510, 690));
    }

    #[test]
    fn symptoms_resolve_before_pricing() {
        let query = ConditionQuery::symptoms(["vomiting", "fever"]);
        let government = HospitalDescriptor::new("2", "Civil Hospital").with_type("government");
        let range = estimate_cost(&query, Some("Ahmedabad"), Some(&government));
        // 800 * 1.05 * 0.5
        assert_eq!(range.condition, "Food Poisoning");
        assert_eq!((range.low, range.high), (357, 483));
    }

    #[test]
    fn hospital_base_factor_is_applied_last() {
        let mut premium = HospitalDescriptor::new("3", "Apollo Hospitals").with_type("premium");
        premium.base_cost_factor = Some(1.4);
        let query = ConditionQuery::condition("Appendicitis");
        let breakdown = cost_breakdown(&query, None, Some(&premium));
        assert!((breakdown.total() - 50_000.0 * 1.6 * 1.4).abs() < 1e-6);

        premium.base_cost_factor = Some(0.0);
        assert_eq!(premium.base_factor(), 1.0);
    }

    #[test]
    fn ranges_are_ordered_for_every_table_entry() {
        let kinds = [
            None,
            Some("government"),
            Some("private"),
            Some("premium"),
            Some("trust"),
            Some("other"),
        ];
        let cities = [None, Some("Mumbai"), Some("rural"), Some("Nowhere")];
        for condition in crate::tables::CONDITIONS {
            for kind in kinds {
                for city in cities {
                    let hospital =
                        kind.map(|kind| HospitalDescriptor::new("x", "x").with_type(kind));
                    let range = estimate_cost(
                        &ConditionQuery::condition(condition.name),
                        city,
                        hospital.as_ref(),
                    );
                    assert!(range.low <= range.high, "{condition:?} {kind:?} {city:?}");
                }
            }
        }
    }

    #[test]
    fn annotation_attaches_range_and_text() {
        let mut hospital = private_hospital();
        let query = ConditionQuery::condition("Myocardial infarction");
        annotate_hospital(&mut hospital, &query, None);
        assert_eq!(
            hospital.cost_text.as_deref(),
            Some("₹1,65,750 – ₹2,24,250 (approx.)")
        );
        assert_eq!(hospital.computed_cost.map(|range| range.high), Some(224_250));
    }
}
