//! Typed access to the three external collaborators: analysis, hospital search and the detail
//! fragment.

use async_trait::async_trait;
use serde::Deserialize;

use crate::{
    error::{CareError, Result},
    models::{AnalysisResult, AnalyzeRequest, HospitalDescriptor, HospitalQuery},
};

#[async_trait]
pub trait CareApi: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult>;

    async fn search_hospitals(&self, query: &HospitalQuery) -> Result<Vec<HospitalDescriptor>>;

    /// Raw markup of the hospital's detail page.
    async fn detail_fragment(&self, hospital_id: &str) -> Result<String>;
}

/// Either `{ "error": ... }` or the expected payload.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    Failure { error: String },
    Success(T),
}

impl<T> ApiEnvelope<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            ApiEnvelope::Success(payload) => Ok(payload),
            ApiEnvelope::Failure { error } => Err(CareError::upstream(error)),
        }
    }
}

#[cfg(feature = "http")]
pub use http::HttpCareApi;

#[cfg(feature = "http")]
mod http {
    use async_trait::async_trait;
    use tracing::debug;

    use super::{ApiEnvelope, CareApi};
    use crate::{
        error::Result,
        models::{
            AnalysisResult, AnalyzeRequest, AnalyzeResponse, HospitalDescriptor, HospitalQuery,
            HospitalsResponse,
        },
    };

    /// `CareApi` over HTTP against a running care-service (or anything speaking its routes).
    #[derive(Clone)]
    pub struct HttpCareApi {
        client: reqwest::Client,
        base_url: String,
    }

    impl HttpCareApi {
        pub fn new(base_url: impl Into<String>) -> Self {
            Self::with_client(reqwest::Client::new(), base_url)
        }

        pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
            let base_url = base_url.into().trim_end_matches('/').to_string();
            Self { client, base_url }
        }

        pub fn base_url(&self) -> &str {
            &self.base_url
        }

        pub(crate) fn hospitals_url(&self, query: &HospitalQuery) -> String {
            let mut params = Vec::new();
            for (name, value) in [
                ("speciality", &query.speciality),
                ("city", &query.city),
                ("disease", &query.disease),
                ("budget", &query.budget),
            ] {
                if let Some(value) = value {
                    params.push(format!("{}={}", name, urlencoding::encode(value)));
                }
            }
            format!("{}/api/hospitals?{}", self.base_url, params.join("&"))
        }
    }

    #[async_trait]
    impl CareApi for HttpCareApi {
        async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalysisResult> {
            let url = format!("{}/api/analyze", self.base_url);
            debug!(%url, "analyze request");
            let envelope: ApiEnvelope<AnalyzeResponse> = self
                .client
                .post(&url)
                .json(request)
                .send()
                .await?
                .json()
                .await?;
            Ok(envelope.into_result()?.analysis)
        }

        async fn search_hospitals(
            &self,
            query: &HospitalQuery,
        ) -> Result<Vec<HospitalDescriptor>> {
            let url = self.hospitals_url(query);
            debug!(%url, "hospital search request");
            let envelope: ApiEnvelope<HospitalsResponse> =
                self.client.get(&url).send().await?.json().await?;
            Ok(envelope.into_result()?.hospitals)
        }

        async fn detail_fragment(&self, hospital_id: &str) -> Result<String> {
            let url = format!(
                "{}/hospitals/{}/",
                self.base_url,
                urlencoding::encode(hospital_id)
            );
            let markup = self
                .client
                .get(&url)
                .send()
                .await?
                .error_for_status()?
                .text()
                .await?;
            Ok(markup)
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalyzeResponse, HospitalsResponse};
    use serde_json::json;

    #[test]
    fn error_payloads_become_upstream_errors() {
        let envelope: ApiEnvelope<AnalyzeResponse> =
            serde_json::from_value(json!({"error": "model unavailable"})).unwrap();
        let err = envelope.into_result().unwrap_err();
        assert!(matches!(&err, CareError::Upstream { detail } if detail == "model unavailable"));
        assert_eq!(err.to_string(), "Unable to process request. Please try again.");
    }

    #[test]
    fn success_payloads_pass_through() {
        let envelope: ApiEnvelope<HospitalsResponse> = serde_json::from_value(json!({
            "hospitals": [{"id": 1, "name": "Civil Hospital", "hospital_type": "government"}]
        }))
        .unwrap();
        let hospitals = envelope.into_result().unwrap().hospitals;
        assert_eq!(hospitals[0].id, "1");
    }

    #[cfg(feature = "http")]
    #[test]
    fn hospital_query_is_url_encoded() {
        let api = HttpCareApi::new("http://localhost:3000/");
        let url = api.hospitals_url(&HospitalQuery {
            speciality: Some("General Physician".into()),
            city: Some("Ahmedabad".into()),
            disease: Some("Dengue Fever".into()),
            budget: None,
        });
        assert_eq!(
            url,
            "http://localhost:3000/api/hospitals?speciality=General%20Physician&city=Ahmedabad&disease=Dengue%20Fever"
        );
    }
}
