//! Hospital detail view: fetch the server-rendered fragment, splice the cost summary in, mount.
//!
//! Network I/O (`DetailViewLoader::fetch`) is kept apart from assembly: the fetched markup is
//! parsed into a [`DetailFragment`] and the cost summary goes in through the pure
//! [`inject_cost_summary`].

use scraper::{ElementRef, Html, Selector};
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::{
    client::CareApi,
    error::{CareError, Result},
    models::HospitalDescriptor,
    navigation::NavigationController,
};

pub const CONTENT_REGION: &str = ".detail-page";
pub const INJECTION_CONTAINER: &str = ".dpage-body";
pub const LOADING_PLACEHOLDER: &str = "Loading hospital details…";
pub const FAILURE_PLACEHOLDER: &str = "Failed to load details.";

/// Elements that cannot hold children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// The extracted content region and the byte offset where injected blocks go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFragment {
    markup: String,
    injection_point: usize,
}

impl DetailFragment {
    /// Extract the content region from a full page (or bare fragment).
    pub fn parse(page: &str) -> Result<Self> {
        let document = Html::parse_document(page);
        let region_selector = selector(CONTENT_REGION)?;
        let container_selector = selector(INJECTION_CONTAINER)?;

        let region = document
            .select(&region_selector)
            .next()
            .ok_or_else(|| CareError::Fragment(format!("no {CONTENT_REGION} element")))?;
        let container = region
            .select(&container_selector)
            .next()
            .ok_or_else(|| CareError::Fragment(format!("no {INJECTION_CONTAINER} element")))?;
        let container_tag = container.value().name();
        if VOID_ELEMENTS.contains(&container_tag) {
            return Err(CareError::Fragment(format!(
                "{INJECTION_CONTAINER} is a void <{container_tag}> element"
            )));
        }

        let markup = region.html();
        let container_markup = container.html();
        let container_start = markup
            .find(&container_markup)
            .ok_or_else(|| CareError::Fragment("container not found in region".into()))?;

        Ok(Self {
            injection_point: container_start + open_tag_len(&container, &container_markup),
            markup,
        })
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn injection_point(&self) -> usize {
        self.injection_point
    }

    /// Visible text, one trimmed line per text node.
    pub fn text_lines(&self) -> Vec<String> {
        Html::parse_fragment(&self.markup)
            .root_element()
            .text()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| CareError::Fragment(format!("bad selector {css}: {e:?}")))
}

/// `<tag ...>` length, derived from outer = open + inner + close.
fn open_tag_len(element: &ElementRef<'_>, outer: &str) -> usize {
    let close = format!("</{}>", element.value().name());
    outer.len() - element.inner_html().len() - close.len()
}

/// Condition, price band and calls to action shown on top of the detail page.
#[derive(Debug, Clone, PartialEq)]
pub struct CostSummary {
    pub symptoms: String,
    pub condition: String,
    pub cost_text: String,
    pub contact: Option<String>,
}

impl CostSummary {
    /// `None` when the hospital carries no estimate; nothing is injected then.
    pub fn for_hospital(hospital: &HospitalDescriptor, symptoms: &str) -> Option<Self> {
        let cost_text = hospital.cost_text.clone()?;
        Some(Self {
            symptoms: symptoms.to_string(),
            condition: hospital
                .computed_cost
                .as_ref()
                .map(|cost| cost.condition.clone())
                .unwrap_or_default(),
            cost_text,
            contact: hospital.contact.clone(),
        })
    }

    pub fn to_markup(&self) -> String {
        let call = match &self.contact {
            Some(contact) => format!(
                r#"<a class="cost-call" href="tel:{}">Call Hospital</a>"#,
                escape_html(contact)
            ),
            None => r#"<a class="cost-call">Call Hospital</a>"#.to_string(),
        };
        format!(
            concat!(
                r#"<div class="cost-summary">"#,
                r#"<span class="cost-label">summary of symptoms</span>"#,
                r#"<span class="cost-symptoms">{symptoms}</span>"#,
                r#"<span class="cost-label">Estimated Cost</span>"#,
                r#"<span class="cost-condition">{condition}</span>"#,
                r#"<span class="cost-value">{cost}</span>"#,
                r#"<div class="cost-actions"><a class="cost-book">Book Appointment</a>{call}</div>"#,
                "</div>"
            ),
            symptoms = escape_html(&self.symptoms),
            condition = escape_html(&self.condition),
            cost = escape_html(&self.cost_text),
            call = call,
        )
    }
}

/// Escape text for use in element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Insert the summary as the first child of the injection container.
pub fn inject_cost_summary(fragment: &DetailFragment, summary: &CostSummary) -> DetailFragment {
    let block = summary.to_markup();
    let mut markup = String::with_capacity(fragment.markup.len() + block.len());
    markup.push_str(&fragment.markup[..fragment.injection_point]);
    markup.push_str(&block);
    markup.push_str(&fragment.markup[fragment.injection_point..]);

    DetailFragment {
        markup,
        injection_point: fragment.injection_point + block.len(),
    }
}

/// What the detail area currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    Loading,
    Loaded(DetailFragment),
    /// Terminal for this open; the user retries by opening again.
    Failed,
}

impl DetailView {
    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            DetailView::Loading => Some(LOADING_PLACEHOLDER),
            DetailView::Failed => Some(FAILURE_PLACEHOLDER),
            DetailView::Loaded(_) => None,
        }
    }
}

/// Proof of which detail open a fetch belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailTicket {
    token: u64,
    hospital: HospitalDescriptor,
}

impl DetailTicket {
    pub fn hospital(&self) -> &HospitalDescriptor {
        &self.hospital
    }
}

/// The mounted detail area. Only the response to the latest open may replace its content.
#[derive(Debug, Clone)]
pub struct DetailPane {
    view: DetailView,
    latest: u64,
}

impl Default for DetailPane {
    fn default() -> Self {
        Self {
            view: DetailView::Loading,
            latest: 0,
        }
    }
}

impl DetailPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> &DetailView {
        &self.view
    }

    /// Start a new open: show the loading placeholder and supersede earlier tickets.
    pub fn begin(&mut self, hospital: HospitalDescriptor) -> DetailTicket {
        self.latest += 1;
        self.view = DetailView::Loading;
        DetailTicket {
            token: self.latest,
            hospital,
        }
    }

    /// Returns false, leaving the pane untouched, when `ticket` is no longer the latest.
    pub fn mount(&mut self, ticket: &DetailTicket, view: DetailView) -> bool {
        if ticket.token != self.latest {
            debug!(
                token = ticket.token,
                latest = self.latest,
                hospital = %ticket.hospital.id,
                "discarding stale detail response"
            );
            return false;
        }
        self.view = view;
        true
    }
}

#[derive(Clone)]
pub struct DetailViewLoader {
    api: Arc<dyn CareApi>,
}

impl DetailViewLoader {
    pub fn new(api: Arc<dyn CareApi>) -> Self {
        Self { api }
    }

    /// Fetch and assemble the view for `ticket`. Never fails: errors become [`DetailView::Failed`].
    pub async fn fetch(&self, ticket: &DetailTicket, symptoms: &str) -> DetailView {
        let hospital = ticket.hospital();
        let fragment = self
            .api
            .detail_fragment(&hospital.id)
            .await
            .and_then(|page| DetailFragment::parse(&page));

        match fragment {
            Ok(fragment) => {
                let fragment = match CostSummary::for_hospital(hospital, symptoms) {
                    Some(summary) => inject_cost_summary(&fragment, &summary),
                    None => fragment,
                };
                DetailView::Loaded(fragment)
            }
            Err(e) => {
                error!(hospital = %hospital.id, "failed to load hospital details: {:?}", e);
                DetailView::Failed
            }
        }
    }

    /// Commit and persist the detail transition, show the placeholder, then fetch and mount.
    pub async fn open(
        &self,
        controller: &mut NavigationController,
        pane: &mut DetailPane,
        hospital: HospitalDescriptor,
    ) -> Result<()> {
        let ticket = self.begin(controller, pane, hospital)?;
        self.complete(controller, pane, &ticket).await;
        Ok(())
    }

    /// The synchronous half of [`open`](Self::open): on return the transition is persisted and
    /// the pane shows the loading placeholder.
    pub fn begin(
        &self,
        controller: &mut NavigationController,
        pane: &mut DetailPane,
        hospital: HospitalDescriptor,
    ) -> Result<DetailTicket> {
        controller.open_detail(hospital.clone())?;
        info!(hospital = %hospital.id, "opening hospital details");
        Ok(pane.begin(hospital))
    }

    /// Fetch for `ticket` and mount the result unless a newer open superseded it.
    pub async fn complete(
        &self,
        controller: &NavigationController,
        pane: &mut DetailPane,
        ticket: &DetailTicket,
    ) -> bool {
        let view = self.fetch(ticket, controller.state().symptoms()).await;
        pane.mount(ticket, view)
    }
}
