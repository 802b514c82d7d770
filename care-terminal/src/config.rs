//! Terminal client configuration, resolved once at startup.

use std::path::{Path, PathBuf};

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_STATE_DIR: &str = ".care-session";

#[derive(Clone, Debug, PartialEq)]
pub struct TerminalConfig {
    api_url: String,
    state_dir: PathBuf,
}

impl TerminalConfig {
    /// Reads `CARE_API_URL` and `CARE_STATE_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_url: non_empty("CARE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            state_dir: non_empty("CARE_STATE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_DIR)),
        }
    }

    /// Command-line flags win over the environment.
    pub fn with_overrides(mut self, api_url: Option<String>, state_dir: Option<PathBuf>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        if let Some(state_dir) = state_dir {
            self.state_dir = state_dir;
        }
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_then_env_then_flags() {
        let config = TerminalConfig::from_lookup(|_| None);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert_eq!(config.state_dir(), Path::new(DEFAULT_STATE_DIR));

        let config = TerminalConfig::from_lookup(|name| match name {
            "CARE_API_URL" => Some("http://care.local".into()),
            "CARE_STATE_DIR" => Some("  ".into()),
            _ => None,
        });
        assert_eq!(config.api_url(), "http://care.local");
        assert_eq!(config.state_dir(), Path::new(DEFAULT_STATE_DIR));

        let config = config.with_overrides(None, Some(PathBuf::from("/tmp/tab")));
        assert_eq!(config.api_url(), "http://care.local");
        assert_eq!(config.state_dir(), Path::new("/tmp/tab"));
    }
}
