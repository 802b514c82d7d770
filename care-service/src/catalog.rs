//! The hospital catalog behind `/api/hospitals` and `/hospitals/{id}/`.

use care_flow::{ConditionQuery, HospitalDescriptor, annotate_hospital};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

use crate::{models::CatalogHospital, speciality::normalize_speciality};

/// Seeded Ahmedabad hospitals.
const BUILTIN_CATALOG: &str = include_str!("../data/hospitals.json");

/// Condition priced when a search names no disease.
pub const DEFAULT_SEARCH_DISEASE: &str = "Dengue";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One search against the catalog. `speciality` is matched after normalization.
#[derive(Debug, Clone)]
pub struct CatalogSearch<'a> {
    pub speciality: &'a str,
    pub city: &'a str,
    pub disease: Option<&'a str>,
    pub budget: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct HospitalCatalog {
    hospitals: Vec<CatalogHospital>,
}

impl HospitalCatalog {
    pub fn new(hospitals: Vec<CatalogHospital>) -> Self {
        Self { hospitals }
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Ok(Self::new(serde_json::from_str(BUILTIN_CATALOG)?))
    }

    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let catalog = Self::new(serde_json::from_str(&raw)?);
        info!(path = %path.display(), hospitals = catalog.len(), "loaded hospital catalog");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.hospitals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hospitals.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&CatalogHospital> {
        let id = id.trim().parse::<u32>().ok()?;
        self.hospitals.iter().find(|h| h.id == id)
    }

    /// Hospitals in the city offering the speciality, each priced for the disease at that
    /// hospital, optionally capped by budget on the low end of the estimate.
    pub fn search(&self, search: &CatalogSearch<'_>) -> Vec<HospitalDescriptor> {
        let speciality = normalize_speciality(search.speciality);
        let disease = search
            .disease
            .filter(|disease| !disease.trim().is_empty())
            .unwrap_or(DEFAULT_SEARCH_DISEASE);
        let query = ConditionQuery::condition(disease);
        debug!(speciality, disease, city = search.city, "catalog search");

        self.hospitals
            .iter()
            .filter(|h| h.city.eq_ignore_ascii_case(search.city.trim()))
            .filter(|h| h.offers(speciality))
            .map(|h| {
                let mut descriptor = h.to_descriptor();
                annotate_hospital(&mut descriptor, &query, Some(search.city));
                descriptor
            })
            .filter(|h| match (search.budget, &h.computed_cost) {
                (Some(budget), Some(cost)) => cost.low as f64 <= budget,
                _ => true,
            })
            .collect()
    }
}
