//! Default filesystem-backed and in-memory port implementations.

use crate::ports::{DeclarationSource, LoadedScopes, PreferenceStore, StoredPreferences, WritePort};
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use membersort_types::schema::MEMBERSORT_SCOPES_V1;
use membersort_types::scope::{ScopeInput, ScopesDocument};
use std::sync::Mutex;
use toml_edit::{DocumentMut, Item, Table, value};
use tracing::{debug, warn};

/// Loads `membersort.scopes.v1` documents from a file, or from every `*.scopes.json` in a
/// directory.
#[derive(Debug, Clone)]
pub struct JsonDeclarationSource {
    pub path: Utf8PathBuf,
}

impl JsonDeclarationSource {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    fn document_paths(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        if !self.path.is_dir() {
            return Ok(vec![self.path.clone()]);
        }

        let pattern = self.path.join("*.scopes.json");
        debug!(pattern = %pattern, "scanning for scope documents");

        let mut out = Vec::new();
        for entry in glob(pattern.as_str()).context("glob *.scopes.json")? {
            let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
            let path = Utf8PathBuf::from_path_buf(path)
                .map_err(|p| anyhow::anyhow!("non-utf8 path: {}", p.display()))?;
            out.push(path);
        }

        // Deterministic order matters.
        out.sort();
        Ok(out)
    }
}

impl DeclarationSource for JsonDeclarationSource {
    fn load_scopes(&self) -> anyhow::Result<Vec<LoadedScopes>> {
        let mut out = Vec::new();
        for path in self.document_paths()? {
            let contents = fs::read_to_string(&path)?;
            let doc: ScopesDocument =
                serde_json::from_str(&contents).with_context(|| format!("parse {}", path))?;
            if doc.schema != MEMBERSORT_SCOPES_V1 {
                anyhow::bail!(
                    "{}: unsupported schema {:?}, expected {:?}",
                    path,
                    doc.schema,
                    MEMBERSORT_SCOPES_V1
                );
            }
            debug!(path = %path, scopes = doc.scopes.len(), "loaded scope document");
            out.push(LoadedScopes {
                path: path.to_string(),
                schema: Some(doc.schema),
                scopes: doc.scopes,
            });
        }
        Ok(out)
    }
}

/// In-memory declaration source for embedding and testing.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDeclarationSource {
    documents: Vec<LoadedScopes>,
}

impl InMemoryDeclarationSource {
    /// A single anonymous document holding `scopes`.
    pub fn new(scopes: Vec<ScopeInput>) -> Self {
        Self {
            documents: vec![LoadedScopes {
                path: "<memory>".to_string(),
                schema: None,
                scopes,
            }],
        }
    }

    pub fn with_documents(documents: Vec<LoadedScopes>) -> Self {
        Self { documents }
    }
}

impl DeclarationSource for InMemoryDeclarationSource {
    fn load_scopes(&self) -> anyhow::Result<Vec<LoadedScopes>> {
        Ok(self.documents.clone())
    }
}

/// In-memory preference store for embedding and testing.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    prefs: Mutex<StoredPreferences>,
}

impl InMemoryPreferenceStore {
    pub fn new(prefs: StoredPreferences) -> Self {
        Self {
            prefs: Mutex::new(prefs),
        }
    }

    pub fn snapshot(&self) -> StoredPreferences {
        self.prefs.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn load(&self) -> anyhow::Result<StoredPreferences> {
        let prefs = self
            .prefs
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store lock poisoned"))?;
        Ok(prefs.clone())
    }

    fn save(&self, prefs: &StoredPreferences) -> anyhow::Result<()> {
        let mut stored = self
            .prefs
            .lock()
            .map_err(|_| anyhow::anyhow!("preference store lock poisoned"))?;
        *stored = prefs.clone();
        Ok(())
    }
}

/// Preferences kept in the `[preferences]` table of `membersort.toml`.
///
/// Saving edits the document in place, so comments and other tables survive.
#[derive(Debug, Clone)]
pub struct TomlPreferenceStore {
    pub path: Utf8PathBuf,
}

impl TomlPreferenceStore {
    pub const TABLE: &'static str = "preferences";

    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    fn read_document(&self) -> anyhow::Result<DocumentMut> {
        if !self.path.exists() {
            return Ok(DocumentMut::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        contents
            .parse::<DocumentMut>()
            .with_context(|| format!("parse {}", self.path))
    }
}

impl PreferenceStore for TomlPreferenceStore {
    fn load(&self) -> anyhow::Result<StoredPreferences> {
        let doc = self.read_document()?;
        let Some(table) = doc.get(Self::TABLE) else {
            return Ok(StoredPreferences::default());
        };

        let order = match table.get("order") {
            None => None,
            Some(item) => match item.as_str() {
                Some(s) => Some(s.to_string()),
                // Not a string: hand the planner an unparseable value so it falls back and reports.
                None => {
                    warn!(path = %self.path, "preferences.order is not a string");
                    Some(String::new())
                }
            },
        };

        let order_by_name = match table.get("order_by_name") {
            None => None,
            Some(item) => {
                let b = item.as_bool();
                if b.is_none() {
                    warn!(path = %self.path, "preferences.order_by_name is not a boolean, ignoring it");
                }
                b
            }
        };

        Ok(StoredPreferences {
            order,
            order_by_name,
        })
    }

    fn save(&self, prefs: &StoredPreferences) -> anyhow::Result<()> {
        let mut doc = self.read_document()?;

        if !doc.contains_table(Self::TABLE) {
            doc[Self::TABLE] = Item::Table(Table::new());
        }
        let table = doc[Self::TABLE]
            .as_table_mut()
            .with_context(|| format!("{}: [{}] is not a table", self.path, Self::TABLE))?;

        match &prefs.order {
            Some(order) => table["order"] = value(order.as_str()),
            None => {
                table.remove("order");
            }
        }
        match prefs.order_by_name {
            Some(b) => table["order_by_name"] = value(b),
            None => {
                table.remove("order_by_name");
            }
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, doc.to_string())?;
        debug!(path = %self.path, "saved preferences");
        Ok(())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
