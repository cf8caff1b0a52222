//! Clap-free settings for the sort pipeline.

use camino::Utf8PathBuf;

/// Run mode controls exit-code semantics.
///
/// In `Check` mode a plan that moves anything is reported as exit 2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    #[default]
    Report,
    Check,
}

/// Settings for the sort pipeline.
#[derive(Debug, Clone)]
pub struct SortSettings {
    /// Where `plan.json`, `plan.md` and `preview.diff` go; `None` writes nothing.
    pub out_dir: Option<Utf8PathBuf>,

    /// Overrides the stored `order_by_name` for this pass only.
    pub order_by_name: Option<bool>,

    pub mode: RunMode,
}

impl Default for SortSettings {
    fn default() -> Self {
        Self {
            out_dir: None,
            order_by_name: None,
            mode: RunMode::default(),
        }
    }
}
