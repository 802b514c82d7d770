//! Service configuration, resolved once at startup.

use std::path::{Path, PathBuf};

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Clone, Debug, PartialEq)]
pub struct ServiceConfig {
    port: u16,
    catalog_path: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            catalog_path: None,
        }
    }
}

impl ServiceConfig {
    /// Reads `PORT` and `CARE_CATALOG_PATH`.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|port| port.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);
        let catalog_path = lookup("CARE_CATALOG_PATH")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Self { port, catalog_path }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Replacement hospital catalog; the built-in seed set is used when absent.
    pub fn catalog_path(&self) -> Option<&Path> {
        self.catalog_path.as_deref()
    }
}
