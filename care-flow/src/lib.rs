pub mod client;
pub mod detail;
pub mod error;
pub mod estimator;
pub mod format;
pub mod inference;
pub mod models;
pub mod navigation;
pub mod render;
pub mod runner;
pub mod storage;
pub mod tables;

// Re-export commonly used types
pub use client::{ApiEnvelope, CareApi};
#[cfg(feature = "http")]
pub use client::HttpCareApi;
pub use detail::{
    CostSummary, DetailFragment, DetailPane, DetailTicket, DetailView, DetailViewLoader,
    escape_html, inject_cost_summary,
};
pub use error::{CareError, Result};
pub use estimator::{CostBreakdown, annotate_hospital, cost_breakdown, estimate_cost};
pub use format::{format_cost_range, format_inr};
pub use inference::{ConditionQuery, condition_from_symptoms, tokenize_symptoms};
pub use models::{
    AcceptedScheme, AnalysisResult, AnalyzeRequest, AnalyzeResponse, CostRange,
    HospitalDescriptor, HospitalQuery, HospitalsResponse, PossibleDisease, Section,
    SessionSnapshot, Urgency,
};
pub use navigation::{NavAction, NavState, NavigationController, StartupPlan};
pub use render::{AnalysisSummary, HospitalCard, HospitalFilter, HospitalList, ListItem};
pub use runner::{SearchOutcome, SearchRunner};
pub use storage::{
    FileSnapshotBackend, InMemorySnapshotBackend, RestoredSession, SessionStateStore,
    SnapshotBackend,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::ScriptedApi;
    use std::sync::Arc;

    const PAGE: &str = r#"<div class="detail-page"><h1>Apollo Hospitals</h1>
        <div class="dpage-body"><p>Bhat GIDC</p></div></div>"#;

    fn api() -> Arc<ScriptedApi> {
        Arc::new(ScriptedApi {
            analysis: Some(AnalysisResult {
                speciality: Some("Cardiology".into()),
                urgency: Urgency::High,
                possible_diseases: vec![PossibleDisease {
                    name: "Myocardial infarction".into(),
                    probability: 0.7,
                    notes: None,
                }],
                extra: Default::default(),
            }),
            hospitals: vec![
                HospitalDescriptor::new("3", "Civil Hospital").with_type("government"),
                HospitalDescriptor::new("4", "Apollo Hospitals").with_type("Private"),
            ],
            fragments: [("4".to_string(), PAGE.to_string())].into(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn search_open_reload_back_and_start_over() {
        let api = api();
        let dir = tempfile::tempdir().unwrap();
        let tab = || SessionStateStore::new(Arc::new(FileSnapshotBackend::new(dir.path())));

        // first page load: search and open a hospital
        let (mut controller, plan) = NavigationController::start(tab());
        assert_eq!(plan, StartupPlan::Search);
        SearchRunner::new(api.clone())
            .run(&mut controller, "chest pain", "")
            .await
            .unwrap();

        // the filter ignores case; the price multiplier does not
        let list = HospitalList::new(controller.state().hospitals(), HospitalFilter::parse("private"));
        let apollo = list.select(0).cloned().unwrap();
        assert_eq!(
            apollo.computed_cost.as_ref().map(|c| (c.low, c.high)),
            Some((153_000, 207_000))
        );

        let loader = DetailViewLoader::new(api.clone());
        let mut pane = DetailPane::new();
        loader.open(&mut controller, &mut pane, apollo.clone()).await.unwrap();
        assert!(matches!(pane.view(), DetailView::Loaded(_)));

        // reload: resumes on the same detail view
        let (mut controller, plan) = NavigationController::start(tab());
        assert_eq!(plan, StartupPlan::Detail(apollo.clone()));
        assert_eq!(controller.state().hospitals().len(), 2);

        controller.back().unwrap();
        let persisted = tab().restore().unwrap();
        assert_eq!(persisted.section, Section::Results);
        assert_eq!(persisted.snapshot.detail_hospital, None);

        // reload again: results, then start over
        let (mut controller, plan) = NavigationController::start(tab());
        assert_eq!(plan, StartupPlan::Results);
        controller.new_search().unwrap();
        assert!(tab().restore().is_none());
    }
}
