//! Port traits abstracting all I/O away from the pipeline.

use camino::Utf8Path;
use membersort_types::scope::ScopeInput;

/// Scopes read from one input document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedScopes {
    pub path: String,
    pub schema: Option<String>,
    pub scopes: Vec<ScopeInput>,
}

/// Source of declaration scopes (the external parser's output).
pub trait DeclarationSource {
    fn load_scopes(&self) -> anyhow::Result<Vec<LoadedScopes>>;
}

/// Raw persisted preference values. `None` means the key is not stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredPreferences {
    pub order: Option<String>,
    pub order_by_name: Option<bool>,
}

/// Persistent key-value store holding the order preference.
pub trait PreferenceStore {
    fn load(&self) -> anyhow::Result<StoredPreferences>;
    fn save(&self, prefs: &StoredPreferences) -> anyhow::Result<()>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
