//! One page load of the terminal front end.

use anyhow::{Context, bail};
use care_flow::{
    AnalysisSummary, CareApi, CareError, DetailPane, DetailView, DetailViewLoader,
    HospitalDescriptor, HospitalFilter, HospitalList, ListItem, NavigationController, SearchOutcome,
    SearchRunner, Section, SessionStateStore, StartupPlan,
};
use std::{io::Write, sync::Arc};
use tracing::debug;

use crate::cli::Commands;

const SEARCH_PROMPT: &str = "Describe your symptoms: care search --symptoms \"fever, headache\" [--city Ahmedabad]";
const EMPTY_INPUT_HINT: &str = "Enter your symptoms to search.";

pub struct App {
    controller: NavigationController,
    plan: StartupPlan,
    runner: SearchRunner,
    loader: DetailViewLoader,
}

impl App {
    /// Restore the saved session and decide the initial view.
    pub fn start(store: SessionStateStore, api: Arc<dyn CareApi>) -> Self {
        let (controller, plan) = NavigationController::start(store);
        debug!(?plan, "startup plan");
        Self {
            controller,
            plan,
            runner: SearchRunner::new(api.clone()),
            loader: DetailViewLoader::new(api),
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    pub async fn handle(&mut self, command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
        match command {
            Commands::Show => self.show(out).await,
            Commands::Search { symptoms, city } => self.search(&symptoms, &city, out).await,
            Commands::List { filter } => self.list(&HospitalFilter::parse(&filter), out),
            Commands::Open { index, filter } => {
                self.open(index, &HospitalFilter::parse(&filter), out).await
            }
            Commands::Back => {
                self.controller.back().context("nothing to go back from")?;
                self.render_results(&HospitalFilter::All, out)
            }
            Commands::New => {
                self.controller.new_search()?;
                writeln!(out, "{SEARCH_PROMPT}")?;
                Ok(())
            }
        }
    }

    async fn show(&mut self, out: &mut impl Write) -> anyhow::Result<()> {
        match self.plan.clone() {
            StartupPlan::Search => {
                writeln!(out, "{SEARCH_PROMPT}")?;
                Ok(())
            }
            StartupPlan::Results => self.render_results(&HospitalFilter::All, out),
            StartupPlan::Detail(hospital) => self.open_hospital(hospital, out).await,
        }
    }

    async fn search(&mut self, symptoms: &str, city: &str, out: &mut impl Write) -> anyhow::Result<()> {
        if symptoms.trim().is_empty() {
            writeln!(out, "{EMPTY_INPUT_HINT}")?;
            return Ok(());
        }
        if self.controller.state().section() != Section::Search {
            self.controller.new_search()?;
        }

        match self.runner.run(&mut self.controller, symptoms, city).await {
            Ok(SearchOutcome::Blocked) => {
                writeln!(out, "{EMPTY_INPUT_HINT}")?;
                Ok(())
            }
            Ok(SearchOutcome::Completed { .. }) => self.render_results(&HospitalFilter::All, out),
            Err(e @ CareError::Upstream { .. }) => {
                writeln!(out, "{e}")?;
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, filter: &HospitalFilter, out: &mut impl Write) -> anyhow::Result<()> {
        if self.controller.state().hospitals().is_empty() {
            writeln!(out, "No results yet. {SEARCH_PROMPT}")?;
            return Ok(());
        }
        self.render_results(filter, out)
    }

    async fn open(
        &mut self,
        index: usize,
        filter: &HospitalFilter,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let list = HospitalList::new(self.controller.state().hospitals(), filter.clone());
        let Some(hospital) = index.checked_sub(1).and_then(|i| list.select(i)).cloned() else {
            bail!("no hospital #{index} in the current list");
        };
        self.open_hospital(hospital, out).await
    }

    async fn open_hospital(
        &mut self,
        hospital: HospitalDescriptor,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let mut pane = DetailPane::new();
        writeln!(out, "{}", hospital.name)?;
        let ticket = self.loader.begin(&mut self.controller, &mut pane, hospital)?;
        if let Some(loading) = pane.view().placeholder() {
            writeln!(out, "  {loading}")?;
            out.flush()?;
        }
        self.loader.complete(&self.controller, &mut pane, &ticket).await;

        match pane.view() {
            DetailView::Loaded(fragment) => {
                for line in fragment.text_lines() {
                    writeln!(out, "  {line}")?;
                }
            }
            view => {
                if let Some(placeholder) = view.placeholder() {
                    writeln!(out, "  {placeholder}")?;
                }
            }
        }
        writeln!(out, "\n(care back) to return to the results")?;
        Ok(())
    }

    fn render_results(&self, filter: &HospitalFilter, out: &mut impl Write) -> anyhow::Result<()> {
        let state = self.controller.state();
        writeln!(out, "{}\n", AnalysisSummary::project(state))?;

        let list = HospitalList::new(state.hospitals(), filter.clone());
        let mut number = 0;
        for item in list.items() {
            match item {
                ListItem::Card(card) => {
                    number += 1;
                    writeln!(out, "#{number} {card}\n")?;
                }
                placeholder => writeln!(out, "{placeholder}")?,
            }
        }
        Ok(())
    }
}
