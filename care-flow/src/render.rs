//! Projection of hospital records and the analysis into display cards.
//!
//! Nothing here holds state between renders: each call walks the current list from scratch.

use std::fmt;

use crate::{
    models::{AnalysisResult, HospitalDescriptor},
    navigation::NavState,
};

pub const NO_RESULTS_PLACEHOLDER: &str = "No hospitals found for this filter.";
const MAX_SPECIALITY_CHIPS: usize = 4;
const MISSING: &str = "—";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HospitalFilter {
    #[default]
    All,
    /// Declared hospital type, lower-cased.
    Type(String),
}

impl HospitalFilter {
    pub fn parse(value: &str) -> Self {
        let value = value.trim().to_ascii_lowercase();
        if value.is_empty() || value == "all" {
            HospitalFilter::All
        } else {
            HospitalFilter::Type(value)
        }
    }

    pub fn matches(&self, hospital: &HospitalDescriptor) -> bool {
        match self {
            HospitalFilter::All => true,
            HospitalFilter::Type(wanted) => hospital
                .hospital_type
                .as_deref()
                .is_some_and(|declared| declared.trim().eq_ignore_ascii_case(wanted)),
        }
    }
}

/// One rendered card. Only presence checks decide what appears.
#[derive(Debug, Clone, PartialEq)]
pub struct HospitalCard<'a> {
    pub hospital: &'a HospitalDescriptor,
    pub badge: &'a str,
    pub rating: Option<f64>,
    pub location: String,
    pub stats: Vec<String>,
    pub specialities: &'a [String],
    pub directions: Option<&'a str>,
}

impl<'a> HospitalCard<'a> {
    pub fn new(hospital: &'a HospitalDescriptor) -> Self {
        let location = if hospital.city.is_empty() {
            hospital.address.clone()
        } else {
            format!("{}, {}", hospital.address, hospital.city)
        };

        let mut stats = Vec::new();
        if let Some(beds) = hospital.total_beds {
            stats.push(format!("{beds} beds"));
        }
        if let Some(doctors) = hospital.doctor_count {
            stats.push(format!("{doctors} doctors"));
        }
        if let Some(cost) = &hospital.cost_text {
            stats.push(cost.clone());
        }

        let chips = hospital.specialities.len().min(MAX_SPECIALITY_CHIPS);

        Self {
            hospital,
            badge: hospital.hospital_type.as_deref().unwrap_or("Hospital"),
            rating: hospital.rating,
            location,
            stats,
            specialities: &hospital.specialities[..chips],
            directions: hospital.map_url.as_deref(),
        }
    }
}

impl fmt::Display for HospitalCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.badge)?;
        if let Some(rating) = self.rating {
            write!(f, " ★ {rating}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.hospital.name)?;
        writeln!(f, "  {}", self.location)?;
        if !self.stats.is_empty() {
            writeln!(f, "  {}", self.stats.join(" · "))?;
        }
        if !self.specialities.is_empty() {
            writeln!(f, "  {}", self.specialities.join(" | "))?;
        }
        match self.directions {
            Some(url) => write!(f, "  Details · Directions: {url}"),
            None => write!(f, "  Details · No Map"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListItem<'a> {
    Card(HospitalCard<'a>),
    Placeholder(&'static str),
}

impl fmt::Display for ListItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListItem::Card(card) => fmt::Display::fmt(card, f),
            ListItem::Placeholder(text) => f.write_str(text),
        }
    }
}

/// The current hospital list seen through a filter.
#[derive(Debug, Clone)]
pub struct HospitalList<'a> {
    hospitals: &'a [HospitalDescriptor],
    filter: HospitalFilter,
}

impl<'a> HospitalList<'a> {
    pub fn new(hospitals: &'a [HospitalDescriptor], filter: HospitalFilter) -> Self {
        Self { hospitals, filter }
    }

    pub fn matching(&self) -> impl Iterator<Item = &'a HospitalDescriptor> + '_ {
        self.hospitals.iter().filter(|h| self.filter.matches(h))
    }

    /// Cards for every match, or exactly one placeholder when nothing matches.
    pub fn items(&self) -> impl Iterator<Item = ListItem<'a>> + '_ {
        let mut cards = self.matching().map(|h| ListItem::Card(HospitalCard::new(h))).peekable();
        let placeholder = cards
            .peek()
            .is_none()
            .then_some(ListItem::Placeholder(NO_RESULTS_PLACEHOLDER));
        cards.chain(placeholder)
    }

    /// The hospital behind the 0-based card `index`, as selecting that card would open it.
    pub fn select(&self, index: usize) -> Option<&'a HospitalDescriptor> {
        self.matching().nth(index)
    }
}

/// The sidebar next to the results: what was asked and what the analysis said.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub symptoms: String,
    pub city: String,
    pub speciality: String,
    pub urgency: &'static str,
    pub diseases: Vec<(String, String)>,
}

impl AnalysisSummary {
    pub fn project(state: &NavState) -> Self {
        let or_missing = |value: &str| {
            if value.trim().is_empty() {
                MISSING.to_string()
            } else {
                value.to_string()
            }
        };
        let analysis = state.analysis();

        Self {
            symptoms: or_missing(state.symptoms()),
            city: or_missing(state.city()),
            speciality: or_missing(
                analysis
                    .and_then(|a| a.speciality.as_deref())
                    .unwrap_or_default(),
            ),
            urgency: analysis.map(|a| a.urgency).unwrap_or_default().label(),
            diseases: analysis.map(disease_lines).unwrap_or_default(),
        }
    }
}

fn disease_lines(analysis: &AnalysisResult) -> Vec<(String, String)> {
    analysis
        .possible_diseases
        .iter()
        .map(|d| (d.name.clone(), format!("{}%", (d.probability * 100.0).round() as i64)))
        .collect()
}

impl fmt::Display for AnalysisSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Symptoms:   {}", self.symptoms)?;
        writeln!(f, "City:       {}", self.city)?;
        writeln!(f, "Speciality: {}", self.speciality)?;
        write!(f, "Urgency:    {}", self.urgency)?;
        for (name, probability) in &self.diseases {
            write!(f, "\n  {name} ({probability})")?;
        }
        Ok(())
    }
}
