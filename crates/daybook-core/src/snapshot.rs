//! Persisted snapshot
//!
//! The whole state is one JSON blob:
//!
//! ```json
//! { "ui": { "currentType": "journal", "currentId": "2024-01-01", "panelTab": "backlinks" },
//!   "journals": { "2024-01-01": { ... } },
//!   "pages": { "Dashboard": { ... } },
//!   "views": [ { "id": ..., "name": ..., "query": { ... }, "createdAt": ... } ] }
//! ```
//!
//! Keys this version does not know, inside `ui` or at the top level, are
//! carried along and written back, and a views list read from `savedViews`
//! is saved under that key again.
//!
//! Loading never fails hard: a missing or corrupt blob yields `None` and the
//! caller builds a default state. Saving reports errors, but the workspace
//! only logs them.

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{CoreError, CoreResult};
use crate::model::{DocRef, Document, DocumentKind};
use crate::store::DocumentStore;
use crate::views::SavedView;

/// Active side panel tab
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PanelTab {
    #[default]
    Backlinks,
    Tags,
    Views,
}

impl PanelTab {
    pub fn as_str(self) -> &'static str {
        match self {
            PanelTab::Backlinks => "backlinks",
            PanelTab::Tags => "tags",
            PanelTab::Views => "views",
        }
    }
}

impl From<String> for PanelTab {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "tags" => PanelTab::Tags,
            "views" => PanelTab::Views,
            _ => PanelTab::Backlinks,
        }
    }
}

impl From<PanelTab> for String {
    fn from(tab: PanelTab) -> Self {
        tab.as_str().to_string()
    }
}

impl fmt::Display for PanelTab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which document is open and which panel is showing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UiState {
    pub current_type: DocumentKind,
    pub current_id: String,
    pub panel_tab: PanelTab,
    /// Keys this version does not read, written back as found
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UiState {
    pub fn new(current: DocRef) -> Self {
        Self {
            current_type: current.kind,
            current_id: current.id,
            panel_tab: PanelTab::default(),
            extra: Map::new(),
        }
    }

    pub fn current(&self) -> DocRef {
        DocRef::new(self.current_type, self.current_id.clone())
    }

    pub fn set_current(&mut self, doc: DocRef) {
        self.current_type = doc.kind;
        self.current_id = doc.id;
    }
}

impl Default for UiState {
    /// Points at no document; the workspace repairs it on open
    fn default() -> Self {
        Self::new(DocRef::journal(""))
    }
}

/// Key the saved views list was stored under
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewsKey {
    #[default]
    Views,
    SavedViews,
}

impl ViewsKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewsKey::Views => "views",
            ViewsKey::SavedViews => "savedViews",
        }
    }
}

/// Top-level parts of the blob the workspace does not interpret
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Passthrough {
    pub views_key: ViewsKey,
    pub extra: Map<String, Value>,
}

/// Full persisted state
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawSnapshot")]
pub struct Snapshot {
    pub ui: UiState,
    pub journals: IndexMap<String, Document>,
    pub pages: IndexMap<String, Document>,
    pub views: Vec<SavedView>,
    pub passthrough: Passthrough,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct RawSnapshot {
    ui: UiState,
    journals: IndexMap<String, Document>,
    pages: IndexMap<String, Document>,
    views: Option<Vec<SavedView>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<RawSnapshot> for Snapshot {
    type Error = serde_json::Error;

    fn try_from(mut raw: RawSnapshot) -> Result<Self, Self::Error> {
        // `views` wins when both keys are present; the other stays in `extra`
        let (views, views_key) = match raw.views {
            Some(views) => (views, ViewsKey::Views),
            None => match raw.extra.remove(ViewsKey::SavedViews.as_str()) {
                Some(value) => (serde_json::from_value(value)?, ViewsKey::SavedViews),
                None => (Vec::new(), ViewsKey::Views),
            },
        };
        Ok(Self {
            ui: raw.ui,
            journals: raw.journals,
            pages: raw.pages,
            views,
            passthrough: Passthrough {
                views_key,
                extra: raw.extra,
            },
        })
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extra = &self.passthrough.extra;
        let mut map = serializer.serialize_map(Some(4 + extra.len()))?;
        map.serialize_entry("ui", &self.ui)?;
        map.serialize_entry("journals", &self.journals)?;
        map.serialize_entry("pages", &self.pages)?;
        map.serialize_entry(self.passthrough.views_key.as_str(), &self.views)?;
        for (key, value) in extra {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Snapshot {
    /// Copy the live state into a snapshot
    pub fn capture(
        store: &DocumentStore,
        ui: &UiState,
        views: &[SavedView],
        passthrough: &Passthrough,
    ) -> Self {
        Self {
            ui: ui.clone(),
            journals: store.journal_map().clone(),
            pages: store.page_map().clone(),
            views: views.to_vec(),
            passthrough: passthrough.clone(),
        }
    }

    /// Split into the live pieces the workspace owns
    pub fn into_parts(self) -> (DocumentStore, UiState, Vec<SavedView>, Passthrough) {
        (
            DocumentStore::from_parts(self.journals, self.pages),
            self.ui,
            self.views,
            self.passthrough,
        )
    }

    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CoreError::Serialization(e.to_string()))
    }

    pub fn from_json(content: &str) -> CoreResult<Self> {
        serde_json::from_str(content).map_err(|e| CoreError::InvalidSnapshot(e.to_string()))
    }
}

/// Load/save pair for the snapshot blob
pub trait SnapshotStore {
    /// The stored snapshot, or `None` when missing or unreadable
    fn load(&self) -> Option<Snapshot>;

    fn save(&self, snapshot: &Snapshot) -> CoreResult<()>;
}

/// Pretty-printed JSON file, replaced atomically on save
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Option<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No snapshot at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read snapshot {}: {}", self.path.display(), e);
                return None;
            }
        };
        match Snapshot::from_json(&content) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding snapshot {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> CoreResult<()> {
        let json = snapshot.to_json()?;
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(json.as_bytes())?;
        file.write_all(b"\n")?;
        file.persist(&self.path).map_err(|e| CoreError::from(e.error))?;
        debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// In-process store holding the serialized blob
#[derive(Debug, Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a raw blob, which need not be valid
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Mutex::new(Some(blob.into())),
        }
    }

    /// The last saved blob
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Option<Snapshot> {
        let blob = self.blob.lock().clone()?;
        match Snapshot::from_json(&blob) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("Discarding in-memory snapshot: {}", e);
                None
            }
        }
    }

    fn save(&self, snapshot: &Snapshot) -> CoreResult<()> {
        let json = snapshot.to_json()?;
        *self.blob.lock() = Some(json);
        Ok(())
    }
}

impl<T: SnapshotStore + ?Sized> SnapshotStore for &T {
    fn load(&self) -> Option<Snapshot> {
        (**self).load()
    }

    fn save(&self, snapshot: &Snapshot) -> CoreResult<()> {
        (**self).save(snapshot)
    }
}
