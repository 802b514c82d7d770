use care_flow::{AcceptedScheme, HospitalDescriptor};
use serde::{Deserialize, Serialize};

/// A hospital as stored in the catalog, including the fields only the service sees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogHospital {
    pub id: u32,
    pub name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub pincode: String,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub specialities: Vec<String>,
    #[serde(default)]
    pub hospital_type: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "acceptedSchemes", default)]
    pub accepted_schemes: Vec<AcceptedScheme>,
    #[serde(default)]
    pub base_cost_factor: Option<f64>,
    #[serde(default)]
    pub total_beds: Option<u32>,
    #[serde(default)]
    pub doctor_count: Option<u32>,
}

impl CatalogHospital {
    /// Zero coordinates count as unknown.
    pub fn map_url(&self) -> Option<String> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => {
                Some(format!("https://www.google.com/maps?q={lat},{lng}"))
            }
            _ => None,
        }
    }

    pub fn offers(&self, speciality: &str) -> bool {
        self.specialities.iter().any(|s| s == speciality)
    }

    /// The public record, without an estimate attached yet.
    pub fn to_descriptor(&self) -> HospitalDescriptor {
        HospitalDescriptor {
            address: self.address.clone(),
            hospital_type: self.hospital_type.clone(),
            base_cost_factor: self.base_cost_factor,
            rating: self.rating,
            specialities: self.specialities.clone(),
            accepted_schemes: self.accepted_schemes.clone(),
            map_url: self.map_url(),
            contact: self.contact.clone(),
            total_beds: self.total_beds,
            doctor_count: self.doctor_count,
            ..HospitalDescriptor::new(self.id.to_string(), self.name.clone())
                .with_city(self.city.clone())
        }
    }
}

/// Query string of `GET /api/hospitals`. Everything is optional at the type level and validated
/// in the handler.
#[derive(Debug, Default, Deserialize)]
pub struct HospitalSearchParams {
    pub speciality: Option<String>,
    pub city: Option<String>,
    pub disease: Option<String>,
    pub budget: Option<String>,
}
