//! Sort pipeline and order-list edit sessions, extracted from the CLI.
//!
//! These entry points are I/O-agnostic: all reads and writes go through the port traits.

use crate::ports::{DeclarationSource, PreferenceStore, StoredPreferences, WritePort};
use crate::settings::SortSettings;
use anyhow::Context;
use camino::Utf8Path;
use chrono::Utc;
use membersort_domain::{LoadedPolicy, OrderPolicy, Planner};
use membersort_edit::OrderListEditor;
use membersort_render::{render_plan_md, render_preview};
use membersort_types::plan::{Diagnostic, PlanInput, SortPlan, ToolInfo, diagnostic_codes};
use membersort_types::scope::ScopeInput;
use tracing::debug;

/// Error type for pipeline results. Exit code 2 = reorder needed (check mode), 1 = tool error.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("members are out of order")]
    ReorderNeeded,
    #[error("{0:#}")]
    Internal(#[from] anyhow::Error),
}

impl ToolError {
    pub fn exit_code(&self) -> u8 {
        match self {
            ToolError::ReorderNeeded => 2,
            ToolError::Internal(_) => 1,
        }
    }
}

/// Outcome of `run_sort`.
pub struct SortOutcome {
    pub plan: SortPlan,
    pub preview: String,
    pub reorder_needed: bool,
}

/// Build the pass policy from the stored preferences.
///
/// `order_by_name` overrides the stored flag when given.
pub fn load_policy(
    store: &dyn PreferenceStore,
    order_by_name: Option<bool>,
) -> anyhow::Result<LoadedPolicy> {
    let prefs = store.load().context("load preferences")?;
    Ok(OrderPolicy::load(
        prefs.order.as_deref(),
        order_by_name.or(prefs.order_by_name),
    ))
}

/// Run the sort pipeline: one policy snapshot, every scope of every input document.
///
/// The caller writes artifacts (via `write_sort_artifacts`) and decides what `reorder_needed`
/// means for its exit code.
pub fn run_sort(
    settings: &SortSettings,
    source: &dyn DeclarationSource,
    store: &dyn PreferenceStore,
    tool: ToolInfo,
) -> Result<SortOutcome, ToolError> {
    let started_at = Utc::now();

    let loaded = load_policy(store, settings.order_by_name)?;
    let documents = source.load_scopes().context("load declaration scopes")?;

    let mut inputs = Vec::with_capacity(documents.len());
    let mut scopes: Vec<ScopeInput> = Vec::new();
    for doc in documents {
        debug!(path = %doc.path, scopes = doc.scopes.len(), "planning document");
        inputs.push(PlanInput {
            path: doc.path,
            schema: doc.schema,
        });
        scopes.extend(doc.scopes);
    }

    let planner = Planner::new(loaded.policy);
    let mut plan = planner.plan(&scopes, inputs, tool);

    // Policy diagnostics describe the whole pass; they come first.
    let mut diagnostics = loaded.diagnostics;
    diagnostics.append(&mut plan.diagnostics);
    plan.diagnostics = diagnostics;

    plan.run.started_at = Some(started_at);
    plan.run.ended_at = Some(Utc::now());

    let preview = render_preview(&plan);
    let reorder_needed = plan.needs_reorder();

    Ok(SortOutcome {
        plan,
        preview,
        reorder_needed,
    })
}

/// Write all sort artifacts to the output directory.
pub fn write_sort_artifacts(
    outcome: &SortOutcome,
    out_dir: &Utf8Path,
    writer: &dyn WritePort,
) -> anyhow::Result<()> {
    writer.create_dir_all(out_dir)?;

    let plan_json = serde_json::to_string_pretty(&outcome.plan).context("serialize plan")?;
    writer.write_file(&out_dir.join("plan.json"), plan_json.as_bytes())?;

    let plan_md = render_plan_md(&outcome.plan);
    writer.write_file(&out_dir.join("plan.md"), plan_md.as_bytes())?;

    writer.write_file(&out_dir.join("preview.diff"), outcome.preview.as_bytes())?;

    Ok(())
}

/// An order list edit session over the stored preference.
#[derive(Debug, Clone)]
pub struct OrderSession {
    pub editor: OrderListEditor,
    pub order_by_name: bool,
    /// Set when the stored list was malformed and the session starts from the built-in order.
    pub diagnostics: Vec<Diagnostic>,
}

pub fn open_order_session(store: &dyn PreferenceStore) -> anyhow::Result<OrderSession> {
    let prefs = store.load().context("load preferences")?;
    let (editor, err) = OrderListEditor::load(prefs.order.as_deref());

    let diagnostics = err
        .map(|e| Diagnostic {
            code: diagnostic_codes::MALFORMED_ORDER.to_string(),
            message: format!("stored order list is malformed: {e}"),
            scope: None,
            signature: None,
        })
        .into_iter()
        .collect();

    Ok(OrderSession {
        editor,
        order_by_name: prefs
            .order_by_name
            .unwrap_or(membersort_domain::DEFAULT_ORDER_BY_NAME),
        diagnostics,
    })
}

/// Persist the session. Returns the committed order string.
pub fn commit_order_session(
    session: &OrderSession,
    store: &dyn PreferenceStore,
) -> anyhow::Result<String> {
    let order = session.editor.commit().context("commit order list")?;
    store
        .save(&StoredPreferences {
            order: Some(order.clone()),
            order_by_name: Some(session.order_by_name),
        })
        .context("save preferences")?;
    debug!(entries = session.editor.len(), "committed order list");
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDeclarationSource, InMemoryPreferenceStore};
    use crate::settings::RunMode;
    use camino::Utf8PathBuf;
    use membersort_edit::EntryDraft;
    use membersort_types::decl::Declaration;
    use membersort_types::plan::OrderSource;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemWritePort {
        files: Mutex<HashMap<String, Vec<u8>>>,
        dirs: Mutex<Vec<String>>,
    }

    impl WritePort for MemWritePort {
        fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
            let key = path.as_str().replace('\\', "/");
            self.files
                .lock()
                .expect("lock files")
                .insert(key, contents.to_vec());
            Ok(())
        }

        fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
            let key = path.as_str().replace('\\', "/");
            self.dirs.lock().expect("lock dirs").push(key);
            Ok(())
        }
    }

    fn tool() -> ToolInfo {
        ToolInfo {
            name: "membersort".into(),
            version: Some("0.0.0-test".into()),
        }
    }

    fn store(order: Option<&str>, order_by_name: Option<bool>) -> InMemoryPreferenceStore {
        InMemoryPreferenceStore::new(StoredPreferences {
            order: order.map(String::from),
            order_by_name,
        })
    }

    fn unsorted_source() -> InMemoryDeclarationSource {
        InMemoryDeclarationSource::new(vec![ScopeInput::new(
            "A",
            vec![
                Declaration::field("x", &["public"]),
                Declaration::method("run", &["public"]),
            ],
        )])
    }

    #[test]
    fn run_sort_plans_with_stored_order() {
        let prefs = store(Some("public method,public variable"), Some(false));
        let outcome = run_sort(&SortSettings::default(), &unsorted_source(), &prefs, tool())
            .expect("run_sort");

        assert!(outcome.reorder_needed);
        assert_eq!(outcome.plan.scopes[0].permutation, vec![1, 0]);
        assert_eq!(outcome.plan.policy.order_source, OrderSource::Stored);
        assert_eq!(outcome.plan.inputs[0].path, "<memory>");
        assert!(outcome.plan.run.started_at.is_some());
        assert!(outcome.plan.run.ended_at.is_some());
        assert!(outcome.preview.contains("--- a/A"));
    }

    #[test]
    fn run_sort_reports_nothing_to_do_for_sorted_input() {
        let prefs = store(Some("public variable,public method"), None);
        let outcome = run_sort(&SortSettings::default(), &unsorted_source(), &prefs, tool())
            .expect("run_sort");

        assert!(!outcome.reorder_needed);
        assert!(outcome.plan.scopes[0].moves.is_empty());
        assert!(outcome.preview.is_empty());
    }

    #[test]
    fn malformed_stored_order_falls_back_and_is_reported_first() {
        let prefs = store(Some("public method,"), None);
        let source = InMemoryDeclarationSource::new(vec![ScopeInput::new(
            "A",
            vec![Declaration::Unknown],
        )]);
        let outcome =
            run_sort(&SortSettings::default(), &source, &prefs, tool()).expect("run_sort");

        assert_eq!(outcome.plan.policy.order_source, OrderSource::Fallback);
        let codes: Vec<&str> = outcome
            .plan
            .diagnostics
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(
            codes,
            vec![
                diagnostic_codes::MALFORMED_ORDER,
                diagnostic_codes::UNKNOWN_DECLARATION
            ]
        );
    }

    #[test]
    fn settings_override_order_by_name() {
        let prefs = store(None, Some(false));
        let settings = SortSettings {
            order_by_name: Some(true),
            mode: RunMode::Check,
            ..SortSettings::default()
        };
        let outcome = run_sort(&settings, &unsorted_source(), &prefs, tool()).expect("run_sort");
        assert!(outcome.plan.policy.order_by_name);
    }

    #[test]
    fn write_sort_artifacts_writes_expected_files() {
        let prefs = store(None, None);
        let outcome = run_sort(&SortSettings::default(), &unsorted_source(), &prefs, tool())
            .expect("run_sort");

        let writer = MemWritePort::default();
        let out_dir = Utf8PathBuf::from("out");
        write_sort_artifacts(&outcome, &out_dir, &writer).expect("write artifacts");

        let files = writer.files.lock().expect("files");
        assert!(files.contains_key("out/plan.json"));
        assert!(files.contains_key("out/plan.md"));
        assert!(files.contains_key("out/preview.diff"));
        assert_eq!(*writer.dirs.lock().expect("dirs"), vec!["out".to_string()]);

        let json: serde_json::Value =
            serde_json::from_slice(files.get("out/plan.json").expect("plan json"))
                .expect("parse plan");
        assert_eq!(json["schema"], membersort_types::schema::MEMBERSORT_PLAN_V1);
    }

    #[test]
    fn order_session_edits_and_commits() {
        let prefs = store(Some("public method,public variable"), None);
        let mut session = open_order_session(&prefs).expect("open");
        assert!(session.diagnostics.is_empty());
        assert!(session.order_by_name);

        session.editor.select(Some(0));
        session.editor.add(&EntryDraft::default()).expect("add");
        session.order_by_name = false;

        let committed = commit_order_session(&session, &prefs).expect("commit");
        assert_eq!(committed, "public method,public constructor,public variable");
        assert_eq!(
            prefs.snapshot(),
            StoredPreferences {
                order: Some(committed),
                order_by_name: Some(false),
            }
        );
    }

    #[test]
    fn order_session_over_malformed_order_starts_from_default() {
        let prefs = store(Some(""), None);
        let session = open_order_session(&prefs).expect("open");
        assert_eq!(session.editor.len(), 39);
        assert_eq!(session.diagnostics[0].code, diagnostic_codes::MALFORMED_ORDER);
    }

    #[test]
    fn committing_an_empty_list_fails_and_keeps_the_store() {
        let prefs = store(Some("public method"), Some(true));
        let mut session = open_order_session(&prefs).expect("open");
        session.editor.remove(0);

        assert!(commit_order_session(&session, &prefs).is_err());
        assert_eq!(prefs.snapshot().order.as_deref(), Some("public method"));
    }

    #[test]
    fn exit_codes() {
        assert_eq!(ToolError::ReorderNeeded.exit_code(), 2);
        assert_eq!(ToolError::from(anyhow::anyhow!("boom")).exit_code(), 1);
    }
}
