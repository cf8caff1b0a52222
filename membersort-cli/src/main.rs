mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{ArgAction, Parser, Subcommand};
use config::{ConfigMerger, OutputFormat};
use explain::KindArg;
use membersort_core::adapters::{FsWritePort, JsonDeclarationSource, TomlPreferenceStore};
use membersort_core::pipeline::{
    OrderSession, ToolError, commit_order_session, load_policy, open_order_session, run_sort,
    write_sort_artifacts,
};
use membersort_core::settings::{RunMode, SortSettings};
use membersort_core::{EntryDraft, EntryPrompt};
use membersort_render::{render_order_list, render_plan_md, render_plan_text};
use membersort_types::decl::Visibility;
use membersort_types::plan::{Diagnostic, ToolInfo};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "membersort",
    version,
    about = "Deterministic, policy-driven ordering of class members."
)]
struct Cli {
    /// Project root holding membersort.toml (default: current directory).
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    /// Config file (default: <root>/membersort.toml).
    #[arg(long, global = true)]
    config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Plan the member order of every scope in a scopes document.
    Sort(SortArgs),
    /// Show the signature and rank of one declaration.
    Explain(ExplainArgs),
    /// View or edit the stored order list.
    Order(OrderArgs),
}

#[derive(Debug, Parser)]
struct SortArgs {
    /// A membersort.scopes.v1 JSON file, or a directory of *.scopes.json files.
    input: Utf8PathBuf,

    /// Output format (default: text, or [output].format from the config).
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Write plan.json, plan.md and preview.diff to this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Exit with code 2 when any scope is out of order.
    #[arg(long, default_value_t = false)]
    check: bool,

    /// Override the stored name tie-break for this run.
    #[arg(long)]
    order_by_name: Option<bool>,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Declaration kind.
    #[arg(value_enum)]
    kind: KindArg,

    /// Modifier keywords as written in source, visibility included (e.g. `public static`).
    modifiers: Vec<String>,

    /// Declaration name.
    #[arg(long, default_value = "")]
    name: String,
}

#[derive(Debug, Parser)]
struct OrderArgs {
    #[command(subcommand)]
    cmd: OrderCommand,
}

#[derive(Debug, Subcommand)]
enum OrderCommand {
    /// Print the order list.
    Show,
    /// Add an entry (default: `public constructor`) at the top, or after `--after`.
    Add {
        /// Insert after this index.
        #[arg(long)]
        after: Option<usize>,

        #[command(flatten)]
        entry: EntryArgs,
    },
    /// Change the entry at INDEX; unspecified fields keep their current value.
    Edit {
        index: usize,

        /// Drop every current modifier before applying `--modifier`.
        #[arg(long, default_value_t = false)]
        clear_modifiers: bool,

        /// Modifier to remove (repeatable).
        #[arg(long = "drop-modifier")]
        drop_modifiers: Vec<String>,

        #[command(flatten)]
        entry: EntryArgs,
    },
    /// Remove the entry at INDEX.
    Remove { index: usize },
    /// Move the entry at INDEX one position up.
    Up { index: usize },
    /// Move the entry at INDEX one position down.
    Down { index: usize },
    /// Restore the built-in order.
    Reset,
    /// Set whether members of equal rank are ordered by name.
    SetOrderByName {
        #[arg(action = ArgAction::Set)]
        value: bool,
    },
}

#[derive(Debug, Clone, clap::Args)]
struct EntryArgs {
    #[arg(long, value_enum)]
    visibility: Option<VisibilityArg>,

    /// Entry without a visibility segment (e.g. `static init`).
    #[arg(long, default_value_t = false, conflicts_with = "visibility")]
    no_visibility: bool,

    /// Modifier to add (repeatable).
    #[arg(long = "modifier")]
    modifiers: Vec<String>,

    /// Kind segment (constructor, method, variable, class, enum, init).
    #[arg(long)]
    kind: Option<String>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum VisibilityArg {
    Public,
    Protected,
    Private,
    Package,
}

impl From<VisibilityArg> for Visibility {
    fn from(v: VisibilityArg) -> Self {
        match v {
            VisibilityArg::Public => Visibility::Public,
            VisibilityArg::Protected => Visibility::Protected,
            VisibilityArg::Private => Visibility::Private,
            VisibilityArg::Package => Visibility::Package,
        }
    }
}

/// The structured entry editor, driven by command-line flags instead of a dialog.
struct FlagPrompt<'a> {
    entry: &'a EntryArgs,
    clear_modifiers: bool,
    drop_modifiers: &'a [String],
}

impl EntryPrompt for FlagPrompt<'_> {
    fn prompt(&mut self, mut seed: EntryDraft) -> Option<EntryDraft> {
        if self.entry.no_visibility {
            seed.visibility = None;
        } else if let Some(v) = self.entry.visibility {
            seed.visibility = Some(v.into());
        }
        if self.clear_modifiers {
            seed.modifiers.clear();
        }
        for m in self.drop_modifiers {
            seed.set_modifier(m, false);
        }
        for m in &self.entry.modifiers {
            seed.set_modifier(m, true);
        }
        if let Some(kind) = &self.entry.kind {
            seed.kind = kind.clone();
        }
        Some(seed)
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(()) => ExitCode::from(0),
        Err(ToolError::ReorderNeeded) => {
            info!("members are out of order");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn real_main() -> Result<(), ToolError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_path = config::config_path(&cli.root, cli.config.as_deref());
    match cli.cmd {
        Command::Sort(args) => cmd_sort(&cli.root, &config_path, args),
        Command::Explain(args) => Ok(cmd_explain(&config_path, args)?),
        Command::Order(args) => Ok(cmd_order(&config_path, args.cmd)?),
    }
}

fn cmd_sort(root: &Utf8Path, config_path: &Utf8Path, args: SortArgs) -> Result<(), ToolError> {
    let file_config =
        config::load_or_default(config_path).context("load membersort.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_sort_args(root, args.format, args.out_dir);

    let settings = SortSettings {
        out_dir: merged.out_dir.clone(),
        order_by_name: args.order_by_name,
        mode: if args.check {
            RunMode::Check
        } else {
            RunMode::Report
        },
    };

    let source = JsonDeclarationSource::new(args.input);
    let store = TomlPreferenceStore::new(config_path.to_path_buf());
    let outcome = run_sort(&settings, &source, &store, tool_info())?;

    if let Some(out_dir) = &settings.out_dir {
        write_sort_artifacts(&outcome, out_dir, &FsWritePort)?;
        info!("wrote plan to {}", out_dir);
    }

    match merged.format {
        OutputFormat::Text => print!("{}", render_plan_text(&outcome.plan)),
        OutputFormat::Md => print!("{}", render_plan_md(&outcome.plan)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&outcome.plan).context("serialize plan")?;
            println!("{}", json);
        }
    }

    if settings.mode == RunMode::Check && outcome.reorder_needed {
        return Err(ToolError::ReorderNeeded);
    }
    Ok(())
}

fn cmd_explain(config_path: &Utf8Path, args: ExplainArgs) -> anyhow::Result<()> {
    let store = TomlPreferenceStore::new(config_path.to_path_buf());
    let loaded = load_policy(&store, None)?;
    report_diagnostics(&loaded.diagnostics);

    let decl = explain::declaration(args.kind, &args.name, &args.modifiers);
    print!("{}", explain::render(&explain::explain(&decl, &loaded.policy)));
    Ok(())
}

fn cmd_order(config_path: &Utf8Path, cmd: OrderCommand) -> anyhow::Result<()> {
    let store = TomlPreferenceStore::new(config_path.to_path_buf());
    let mut session = open_order_session(&store)?;
    report_diagnostics(&session.diagnostics);

    let changed = match cmd {
        OrderCommand::Show => {
            print!(
                "{}",
                render_order_list(session.editor.entries(), None, session.order_by_name)
            );
            false
        }
        OrderCommand::Add { after, entry } => {
            select(&mut session, after)?;
            let mut prompt = FlagPrompt {
                entry: &entry,
                clear_modifiers: false,
                drop_modifiers: &[],
            };
            match session.editor.add_with(&mut prompt)? {
                Some(index) => {
                    println!("added {} at {}", session.editor.entries()[index], index);
                    true
                }
                None => false,
            }
        }
        OrderCommand::Edit {
            index,
            clear_modifiers,
            drop_modifiers,
            entry,
        } => {
            select(&mut session, Some(index))?;
            let mut prompt = FlagPrompt {
                entry: &entry,
                clear_modifiers,
                drop_modifiers: &drop_modifiers,
            };
            let edited = session.editor.edit_selected_with(&mut prompt)?;
            if edited {
                println!("entry {} is now {}", index, session.editor.entries()[index]);
            }
            edited
        }
        OrderCommand::Remove { index } => {
            select(&mut session, Some(index))?;
            let removed = session.editor.entries()[index].clone();
            let done = session.editor.remove_selected();
            if done {
                println!("removed {}", removed);
            }
            done
        }
        OrderCommand::Up { index } => {
            select(&mut session, Some(index))?;
            let moved = session.editor.move_selected_up();
            if !moved {
                warn!("entry {} is already at the top", index);
            }
            moved
        }
        OrderCommand::Down { index } => {
            select(&mut session, Some(index))?;
            let moved = session.editor.move_selected_down();
            if !moved {
                warn!("entry {} is already at the bottom", index);
            }
            moved
        }
        OrderCommand::Reset => {
            session.editor.reset_to_default();
            true
        }
        OrderCommand::SetOrderByName { value } => {
            session.order_by_name = value;
            true
        }
    };

    if changed {
        commit_order_session(&session, &store)?;
        info!("saved order list to {}", config_path);
    }
    Ok(())
}

fn select(session: &mut OrderSession, index: Option<usize>) -> anyhow::Result<()> {
    if !session.editor.select(index) {
        anyhow::bail!(
            "no entry at index {} (the list has {} entries)",
            index.unwrap_or_default(),
            session.editor.len()
        );
    }
    Ok(())
}

fn report_diagnostics(diagnostics: &[Diagnostic]) {
    for d in diagnostics {
        warn!("{}", d.message);
    }
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "membersort".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}
