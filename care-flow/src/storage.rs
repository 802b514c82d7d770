use dashmap::DashMap;
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, warn};

use crate::{
    error::{CareError, Result},
    models::{Section, SessionSnapshot},
};

/// Name of the single durable entry holding the UI state.
pub const SNAPSHOT_KEY: &str = "careNavigator_results";

/// A per-tab string slot store, the shape of browser session storage.
///
/// Reads and writes are synchronous: persistence never suspends the flow.
pub trait SnapshotBackend: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: String) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory implementation of SnapshotBackend
#[derive(Clone, Default)]
pub struct InMemorySnapshotBackend {
    entries: Arc<DashMap<String, String>>,
    quota: Option<usize>,
}

impl InMemorySnapshotBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any value larger than `bytes`, like a full browser storage quota.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            quota: Some(bytes),
        }
    }
}

impl SnapshotBackend for InMemorySnapshotBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.clone()))
    }

    fn write(&self, key: &str, value: String) -> Result<()> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(CareError::Storage(format!(
                    "quota exceeded: {} > {quota} bytes",
                    value.len()
                )));
            }
        }
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotBackend {
    dir: PathBuf,
}

impl FileSnapshotBackend {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotBackend for FileSnapshotBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, value: String) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        // Stage then rename; readers never see a partial snapshot.
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A snapshot that is worth resuming, plus the section that was active when it was saved.
#[derive(Debug, Clone, PartialEq)]
pub struct RestoredSession {
    pub section: Section,
    pub snapshot: SessionSnapshot,
}

/// Best-effort persistence of the whole UI state under [`SNAPSHOT_KEY`].
///
/// Failures are logged and swallowed; a broken store behaves like an empty one.
#[derive(Clone)]
pub struct SessionStateStore {
    backend: Arc<dyn SnapshotBackend>,
    key: String,
}

impl SessionStateStore {
    pub fn new(backend: Arc<dyn SnapshotBackend>) -> Self {
        Self {
            backend,
            key: SNAPSHOT_KEY.to_string(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemorySnapshotBackend::new()))
    }

    pub fn save(&self, snapshot: &SessionSnapshot) {
        let result = serde_json::to_string(snapshot)
            .map_err(CareError::from)
            .and_then(|raw| self.backend.write(&self.key, raw));
        if let Err(e) = result {
            warn!(key = %self.key, "failed to persist session snapshot: {}", e);
        }
    }

    pub fn clear(&self) {
        if let Err(e) = self.backend.remove(&self.key) {
            warn!(key = %self.key, "failed to clear session snapshot: {}", e);
        }
    }

    /// Read the stored snapshot. A missing entry, an unreadable or unparsable one, or one without
    /// any hospitals is not resumable and yields `None`.
    pub fn restore(&self) -> Option<RestoredSession> {
        let raw = match self.backend.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, "failed to read session snapshot: {}", e);
                return None;
            }
        };

        let snapshot: SessionSnapshot = match serde_json::from_str(&raw) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(key = %self.key, "discarding unparsable session snapshot: {}", e);
                return None;
            }
        };

        if snapshot.hospitals.is_empty() {
            debug!(key = %self.key, "stored snapshot has no hospitals, not resuming");
            return None;
        }

        Some(RestoredSession {
            section: snapshot.active_section,
            snapshot,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AnalysisResult, HospitalDescriptor, PossibleDisease, Urgency};
    use pretty_assertions::assert_eq;

    fn sample_snapshot() -> SessionSnapshot {
        let mut hospital = HospitalDescriptor::new("4", "Apollo Hospitals")
            .with_type("premium")
            .with_city("Ahmedabad");
        hospital.rating = Some(4.8);
        hospital.base_cost_factor = Some(1.4);
        hospital.specialities = vec!["Cardiology".into(), "Neurology".into()];

        SessionSnapshot {
            hospitals: vec![hospital.clone(), HospitalDescriptor::new("1", "Civil Hospital")],
            analysis: Some(AnalysisResult {
                speciality: Some("Cardiology".into()),
                urgency: Urgency::High,
                possible_diseases: vec![PossibleDisease {
                    name: "Angina".into(),
                    probability: 0.5,
                    notes: None,
                }],
                extra: Default::default(),
            }),
            symptoms: "chest pain".into(),
            city: "Ahmedabad".into(),
            active_section: Section::Detail,
            detail_hospital: Some(hospital),
        }
    }

    #[test]
    fn save_then_restore_round_trips() {
        let store = SessionStateStore::in_memory();
        let snapshot = sample_snapshot();
        store.save(&snapshot);

        let restored = store.restore().expect("snapshot should be resumable");
        assert_eq!(restored.section, Section::Detail);
        assert_eq!(restored.snapshot, snapshot);
    }

    #[test]
    fn restore_after_clear_is_none() {
        let store = SessionStateStore::in_memory();
        store.save(&sample_snapshot());
        store.clear();
        assert!(store.restore().is_none());
        // clearing an empty store is harmless
        store.clear();
    }

    #[test]
    fn snapshot_without_hospitals_is_not_resumable() {
        let store = SessionStateStore::in_memory();
        store.save(&SessionSnapshot {
            symptoms: "fever".into(),
            active_section: Section::Results,
            ..Default::default()
        });
        assert!(store.restore().is_none());
    }

    #[test]
    fn garbage_in_the_slot_is_ignored() {
        let backend = Arc::new(InMemorySnapshotBackend::new());
        backend.write(SNAPSHOT_KEY, "{not json".into()).unwrap();
        let store = SessionStateStore::new(backend);
        assert!(store.restore().is_none());
    }

    #[test]
    fn quota_failures_are_swallowed() {
        let store = SessionStateStore::new(Arc::new(InMemorySnapshotBackend::with_quota(16)));
        store.save(&sample_snapshot());
        assert!(store.restore().is_none());
    }

    #[test]
    fn file_backend_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = sample_snapshot();

        SessionStateStore::new(Arc::new(FileSnapshotBackend::new(dir.path()))).save(&snapshot);

        let reopened = SessionStateStore::new(Arc::new(FileSnapshotBackend::new(dir.path())));
        assert_eq!(reopened.restore().map(|r| r.snapshot), Some(snapshot));

        reopened.clear();
        assert!(reopened.restore().is_none());
        assert!(!dir.path().join(format!("{SNAPSHOT_KEY}.json")).exists());
    }

    #[test]
    fn legacy_browser_payload_restores() {
        let backend = Arc::new(InMemorySnapshotBackend::new());
        let raw = r#"{
            "hospitals": [{"id": 3, "name": "IKDRC", "hospital_type": "government"}],
            "analysis": {"speciality": "Nephrology", "urgency": "Medium", "possible_diseases": []},
            "symptoms": "urine pain",
            "city": "Ahmedabad",
            "activeSection": "details",
            "detailHospital": {"id": 3, "name": "IKDRC", "hospital_type": "government"}
        }"#;
        backend.write(SNAPSHOT_KEY, raw.into()).unwrap();

        let restored = SessionStateStore::new(backend).restore().unwrap();
        assert_eq!(restored.section, Section::Detail);
        assert_eq!(restored.snapshot.hospitals[0].id, "3");
        assert_eq!(
            restored.snapshot.analysis.map(|a| a.urgency),
            Some(Urgency::Medium)
        );
    }
}
