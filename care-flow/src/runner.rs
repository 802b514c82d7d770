//! SearchRunner: one user-initiated "analyze then search" operation, committed through the
//! navigation controller only once both calls have succeeded.
//!
//! The two network calls are the only suspension points and always run in sequence: the hospital
//! search needs the speciality and disease the analysis produced.

use std::sync::Arc;
use tracing::{error, info};

use crate::{
    client::CareApi,
    error::{CareError, Result},
    estimator::annotate_hospital,
    inference::{ConditionQuery, tokenize_symptoms},
    models::{AnalysisResult, AnalyzeRequest, HospitalDescriptor, HospitalQuery},
    navigation::NavigationController,
    tables::find_condition,
};

/// Disease sent to hospital search when the analysis names none.
pub const DEFAULT_DISEASE: &str = "General";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// Empty input; nothing was sent and nothing changed.
    Blocked,
    Completed {
        analysis: AnalysisResult,
        hospitals: usize,
    },
}

#[derive(Clone)]
pub struct SearchRunner {
    api: Arc<dyn CareApi>,
}

impl SearchRunner {
    pub fn new(api: Arc<dyn CareApi>) -> Self {
        Self { api }
    }

    /// Run analyze → search → annotate → commit.
    ///
    /// Upstream failures surface as [`CareError::Upstream`] and leave the controller untouched.
    pub async fn run(
        &self,
        controller: &mut NavigationController,
        symptoms: &str,
        city: &str,
    ) -> Result<SearchOutcome> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Ok(SearchOutcome::Blocked);
        }
        let city = city.trim();

        let (analysis, hospitals) = self
            .fetch(symptoms, city)
            .await
            .map_err(|e| {
                let e = e.into_upstream();
                if let CareError::Upstream { detail } = &e {
                    error!(%detail, "search failed");
                }
                e
            })?;

        let count = hospitals.len();
        controller.complete_search(symptoms, city, analysis.clone(), hospitals)?;
        info!(hospitals = count, "search completed");

        Ok(SearchOutcome::Completed {
            analysis,
            hospitals: count,
        })
    }

    async fn fetch(
        &self,
        symptoms: &str,
        city: &str,
    ) -> Result<(AnalysisResult, Vec<HospitalDescriptor>)> {
        let analysis = self
            .api
            .analyze(&AnalyzeRequest {
                symptoms_text: symptoms.to_string(),
                location: city.to_string(),
            })
            .await?;

        let query = HospitalQuery {
            speciality: Some(analysis.speciality_or_default().to_string()),
            city: Some(city.to_string()),
            disease: Some(analysis.top_disease().unwrap_or(DEFAULT_DISEASE).to_string()),
            budget: None,
        };
        let mut hospitals = self.api.search_hospitals(&query).await?;

        let estimate_for = estimate_query(&analysis, symptoms);
        let city = Some(city).filter(|city| !city.is_empty());
        for hospital in hospitals.iter_mut().filter(|h| h.computed_cost.is_none()) {
            annotate_hospital(hospital, &estimate_for, city);
        }

        Ok((analysis, hospitals))
    }
}

/// The analysed disease when it is a priced condition, otherwise the user's own words.
fn estimate_query(analysis: &AnalysisResult, symptoms: &str) -> ConditionQuery {
    match analysis.top_disease() {
        Some(disease) if find_condition(disease).is_some() => ConditionQuery::condition(disease),
        _ => ConditionQuery::symptoms(tokenize_symptoms(symptoms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::testing::ScriptedApi,
        models::{CostRange, PossibleDisease, Section, Urgency},
        storage::SessionStateStore,
    };

    fn analysis(disease: &str) -> AnalysisResult {
        AnalysisResult {
            speciality: Some("Gastroenterology".into()),
            urgency: Urgency::Medium,
            possible_diseases: vec![PossibleDisease {
                name: disease.into(),
                probability: 0.6,
                notes: None,
            }],
            extra: Default::default(),
        }
    }

    fn catalog() -> Vec<HospitalDescriptor> {
        vec![
            HospitalDescriptor::new("1", "Civil Hospital").with_type("government"),
            HospitalDescriptor::new("2", "Sterling Hospital").with_type("private"),
        ]
    }

    #[tokio::test]
    async fn empty_input_is_blocked_before_any_call() {
        let api = Arc::new(ScriptedApi::default());
        let runner = SearchRunner::new(api.clone());
        let store = SessionStateStore::in_memory();
        let mut controller = NavigationController::new(store.clone());

        let outcome = runner.run(&mut controller, "   ", "Ahmedabad").await.unwrap();
        assert_eq!(outcome, SearchOutcome::Blocked);
        assert_eq!(api.calls(), 0);
        assert!(store.restore().is_none());
    }

    #[tokio::test]
    async fn successful_search_commits_annotated_results() {
        let api = Arc::new(ScriptedApi {
            analysis: Some(analysis("Food Poisoning")),
            hospitals: catalog(),
            ..Default::default()
        });
        let runner = SearchRunner::new(api.clone());
        let store = SessionStateStore::in_memory();
        let mut controller = NavigationController::new(store.clone());

        let outcome = runner
            .run(&mut controller, " vomiting, fever ", "Ahmedabad")
            .await
            .unwrap();
        assert!(matches!(outcome, SearchOutcome::Completed { hospitals: 2, .. }));
        assert_eq!(api.calls(), 2);

        let query = api.queries.lock().unwrap()[0].clone();
        assert_eq!(query.speciality.as_deref(), Some("Gastroenterology"));
        assert_eq!(query.disease.as_deref(), Some("Food Poisoning"));
        assert_eq!(query.city.as_deref(), Some("Ahmedabad"));

        let state = controller.state();
        assert_eq!(state.section(), Section::Results);
        assert_eq!(state.symptoms(), "vomiting, fever");
        let civil = &state.hospitals()[0];
        assert_eq!(
            civil.computed_cost,
            Some(CostRange {
                condition: "Food Poisoning".into(),
                low: 357,
                high: 483,
            })
        );
        assert!(civil.cost_text.is_some());

        let persisted = store.restore().unwrap();
        assert_eq!(persisted.section, Section::Results);
        assert_eq!(persisted.snapshot.hospitals.len(), 2);
    }

    #[tokio::test]
    async fn unknown_analysed_disease_prices_from_symptoms() {
        let api = Arc::new(ScriptedApi {
            analysis: Some(analysis("Gastritis")),
            hospitals: catalog(),
            ..Default::default()
        });
        let runner = SearchRunner::new(api);
        let mut controller = NavigationController::new(SessionStateStore::in_memory());

        runner
            .run(&mut controller, "vomiting, fever", "")
            .await
            .unwrap();
        let cost = controller.state().hospitals()[1].computed_cost.clone().unwrap();
        assert_eq!(cost.condition, "Food Poisoning");
    }

    #[tokio::test]
    async fn existing_estimates_are_kept() {
        let mut priced = HospitalDescriptor::new("9", "Apollo Hospitals").with_type("premium");
        priced.computed_cost = Some(CostRange {
            condition: "Dengue".into(),
            low: 1,
            high: 2,
        });
        let api = Arc::new(ScriptedApi {
            hospitals: vec![priced.clone()],
            ..Default::default()
        });
        let runner = SearchRunner::new(api.clone());
        let mut controller = NavigationController::new(SessionStateStore::in_memory());

        runner.run(&mut controller, "fever", "Mumbai").await.unwrap();
        assert_eq!(controller.state().hospitals(), &[priced]);
        let query = api.queries.lock().unwrap()[0].clone();
        assert_eq!(query.speciality.as_deref(), Some("General Physician"));
        assert_eq!(query.disease.as_deref(), Some(DEFAULT_DISEASE));
    }

    #[tokio::test]
    async fn upstream_failure_leaves_state_untouched() {
        let api = Arc::new(ScriptedApi {
            analysis: Some(analysis("Dengue")),
            search_error: Some("catalog offline".into()),
            ..Default::default()
        });
        let runner = SearchRunner::new(api);
        let store = SessionStateStore::in_memory();
        let mut controller = NavigationController::new(store.clone());

        let err = runner
            .run(&mut controller, "fever", "Ahmedabad")
            .await
            .unwrap_err();
        assert!(matches!(&err, CareError::Upstream { detail } if detail == "catalog offline"));
        assert_eq!(controller.state().section(), Section::Search);
        assert!(store.restore().is_none());
    }
}
