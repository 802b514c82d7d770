use thiserror::Error;

use crate::models::Section;

#[derive(Debug, Error)]
pub enum CareError {
    /// Shown to the user as a single retry message; `detail` is only logged.
    #[error("Unable to process request. Please try again.")]
    Upstream { detail: String },

    #[cfg(feature = "http")]
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("detail fragment error: {0}")]
    Fragment(String),

    #[error("cannot {action} while in the {from} section")]
    InvalidTransition { from: Section, action: &'static str },

    #[error("hospital not found in current results: {0}")]
    UnknownHospital(String),
}

impl CareError {
    pub fn upstream(detail: impl Into<String>) -> Self {
        Self::Upstream {
            detail: detail.into(),
        }
    }

    /// Collapse transport and payload failures into the single user-facing upstream error.
    pub fn into_upstream(self) -> Self {
        match self {
            Self::Upstream { .. } => self,
            other => Self::upstream(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, CareError>;
