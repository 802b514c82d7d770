pub mod catalog;
pub mod config;
pub mod fragment;
pub mod models;
pub mod service;
pub mod speciality;
pub mod triage;

pub use catalog::{CatalogError, CatalogSearch, HospitalCatalog};
pub use config::ServiceConfig;
pub use service::{AppState, build_router, create_app};
