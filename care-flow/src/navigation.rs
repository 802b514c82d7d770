use std::sync::Arc;
use tracing::info;

use crate::{
    error::{CareError, Result},
    models::{AnalysisResult, HospitalDescriptor, Section, SessionSnapshot},
    storage::{RestoredSession, SessionStateStore},
};

/// User-driven events that move the flow between sections.
#[derive(Debug, Clone)]
pub enum NavAction {
    /// A successful analyze-and-search finished: `search -> results`.
    SearchCompleted {
        symptoms: String,
        city: String,
        analysis: AnalysisResult,
        hospitals: Vec<HospitalDescriptor>,
    },
    /// A hospital card was selected: `results -> detail`.
    OpenDetail(HospitalDescriptor),
    /// `detail -> results`
    Back,
    /// `any -> search`, dropping all persisted state.
    NewSearch,
}

impl NavAction {
    fn name(&self) -> &'static str {
        match self {
            NavAction::SearchCompleted { .. } => "complete a search",
            NavAction::OpenDetail(_) => "open a hospital",
            NavAction::Back => "go back",
            NavAction::NewSearch => "start a new search",
        }
    }
}

/// One immutable value of the UI state. Transitions produce a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    section: Section,
    symptoms: String,
    city: String,
    analysis: Option<AnalysisResult>,
    hospitals: Arc<Vec<HospitalDescriptor>>,
    detail: Option<HospitalDescriptor>,
}

impl NavState {
    pub fn section(&self) -> Section {
        self.section
    }

    pub fn symptoms(&self) -> &str {
        &self.symptoms
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn hospitals(&self) -> &[HospitalDescriptor] {
        &self.hospitals
    }

    /// The open hospital; only ever set in the detail section.
    pub fn detail_hospital(&self) -> Option<&HospitalDescriptor> {
        self.detail.as_ref()
    }

    pub fn transition(&self, action: NavAction) -> Result<NavState> {
        let invalid = |action: &NavAction| CareError::InvalidTransition {
            from: self.section,
            action: action.name(),
        };

        match action {
            NavAction::SearchCompleted {
                symptoms,
                city,
                analysis,
                hospitals,
            } => {
                if self.section != Section::Search {
                    return Err(invalid(&NavAction::SearchCompleted {
                        symptoms,
                        city,
                        analysis,
                        hospitals,
                    }));
                }
                Ok(NavState {
                    section: Section::Results,
                    symptoms,
                    city,
                    analysis: Some(analysis),
                    hospitals: Arc::new(hospitals),
                    detail: None,
                })
            }
            NavAction::OpenDetail(hospital) => {
                if !matches!(self.section, Section::Results | Section::Detail) {
                    return Err(invalid(&NavAction::OpenDetail(hospital)));
                }
                // A detail restored from a snapshot may be re-entered even if the list does not
                // (yet) contain it.
                let known = self.hospitals.iter().any(|h| h.id == hospital.id)
                    || self.detail.as_ref().is_some_and(|open| open.id == hospital.id);
                if !known {
                    return Err(CareError::UnknownHospital(hospital.id));
                }
                Ok(NavState {
                    section: Section::Detail,
                    detail: Some(hospital),
                    ..self.clone()
                })
            }
            NavAction::Back => {
                if self.section != Section::Detail {
                    return Err(invalid(&NavAction::Back));
                }
                Ok(NavState {
                    section: Section::Results,
                    detail: None,
                    ..self.clone()
                })
            }
            NavAction::NewSearch => Ok(NavState::default()),
        }
    }

    pub fn to_snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            hospitals: self.hospitals.as_ref().clone(),
            analysis: self.analysis.clone(),
            symptoms: self.symptoms.clone(),
            city: self.city.clone(),
            active_section: self.section,
            detail_hospital: self.detail.clone(),
        }
    }

    fn from_snapshot(snapshot: SessionSnapshot, section: Section) -> Self {
        let detail = match section {
            Section::Detail => snapshot.detail_hospital,
            _ => None,
        };
        Self {
            section,
            symptoms: snapshot.symptoms,
            city: snapshot.city,
            analysis: snapshot.analysis,
            hospitals: Arc::new(snapshot.hospitals),
            detail,
        }
    }
}

/// What the caller has to render after startup.
#[derive(Debug, Clone, PartialEq)]
pub enum StartupPlan {
    /// Show the search form.
    Search,
    /// Render the results list.
    Results,
    /// Render the results list, then re-enter the detail view for this hospital.
    Detail(HospitalDescriptor),
}

/// Finite-state machine over {search, results, detail}.
///
/// Every transition persists through the [`SessionStateStore`] before it returns, so any
/// rendering or fetch that follows starts from an already durable state.
pub struct NavigationController {
    state: Arc<NavState>,
    store: SessionStateStore,
}

impl NavigationController {
    pub fn new(store: SessionStateStore) -> Self {
        Self {
            state: Arc::new(NavState::default()),
            store,
        }
    }

    /// Consult the store once and decide the initial view. Nothing is written here.
    pub fn start(store: SessionStateStore) -> (Self, StartupPlan) {
        let Some(RestoredSession { section, snapshot }) = store.restore() else {
            return (Self::new(store), StartupPlan::Search);
        };

        let (section, plan) = match (section, snapshot.detail_hospital.clone()) {
            (Section::Detail, Some(hospital)) => (Section::Detail, StartupPlan::Detail(hospital)),
            (Section::Results, _) => (Section::Results, StartupPlan::Results),
            _ => (Section::Search, StartupPlan::Search),
        };
        info!(%section, hospitals = snapshot.hospitals.len(), "restored session");

        let controller = Self {
            state: Arc::new(NavState::from_snapshot(snapshot, section)),
            store,
        };
        (controller, plan)
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Shared handle to the current state value.
    pub fn snapshot_state(&self) -> Arc<NavState> {
        Arc::clone(&self.state)
    }

    pub fn dispatch(&mut self, action: NavAction) -> Result<&NavState> {
        let clears = matches!(action, NavAction::NewSearch);
        let next = self.state.transition(action)?;

        if clears {
            self.store.clear();
        } else {
            self.store.save(&next.to_snapshot());
        }

        info!(from = %self.state.section, to = %next.section, "navigation transition");
        self.state = Arc::new(next);
        Ok(&self.state)
    }

    pub fn complete_search(
        &mut self,
        symptoms: impl Into<String>,
        city: impl Into<String>,
        analysis: AnalysisResult,
        hospitals: Vec<HospitalDescriptor>,
    ) -> Result<&NavState> {
        self.dispatch(NavAction::SearchCompleted {
            symptoms: symptoms.into(),
            city: city.into(),
            analysis,
            hospitals,
        })
    }

    pub fn open_detail(&mut self, hospital: HospitalDescriptor) -> Result<&NavState> {
        self.dispatch(NavAction::OpenDetail(hospital))
    }

    pub fn back(&mut self) -> Result<&NavState> {
        self.dispatch(NavAction::Back)
    }

    pub fn new_search(&mut self) -> Result<&NavState> {
        self.dispatch(NavAction::NewSearch)
    }
}
