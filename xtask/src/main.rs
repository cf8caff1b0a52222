use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use membersort_core::adapters::TomlPreferenceStore;
use membersort_core::ports::{PreferenceStore, StoredPreferences};
use membersort_domain::{DEFAULT_ORDER, DEFAULT_ORDER_BY_NAME, default_order, join_order_list};
use std::process::Command as ProcessCommand;
use toml_edit::{DocumentMut, Item, Table, value};

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by membersort.
    PrintSchemas,
    /// Print the built-in order list, one signature per line.
    PrintDefaultOrder,
    /// Write a membersort.toml holding the built-in preferences.
    InitConfig {
        #[arg(long, default_value = "membersort.toml")]
        path: Utf8PathBuf,

        /// Overwrite an existing file.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
    /// Bless golden fixtures (overwrite expected outputs).
    BlessFixtures,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", membersort_types::schema::MEMBERSORT_SCOPES_V1);
            println!("{}", membersort_types::schema::MEMBERSORT_PLAN_V1);
        }
        Command::PrintDefaultOrder => {
            for (i, entry) in DEFAULT_ORDER.iter().enumerate() {
                println!("{i:>3}  {entry}");
            }
        }
        Command::InitConfig { path, force } => {
            if path.exists() && !force {
                anyhow::bail!("{} exists; pass --force to overwrite", path);
            }
            init_config(&path)?;
            println!("wrote {}", path);
        }
        Command::BlessFixtures => {
            let status = ProcessCommand::new("cargo")
                .args(["test", "-p", "membersort-domain", "--test", "golden_fixtures"])
                .env("MEMBERSORT_BLESS", "1")
                .status()
                .context("run golden fixture blessing")?;
            if !status.success() {
                anyhow::bail!("bless-fixtures failed");
            }
        }
    }
    Ok(())
}

/// Write a fresh config: the `[output]` table, then the built-in `[preferences]` saved through
/// the same store the CLI uses.
fn init_config(path: &Utf8Path) -> anyhow::Result<()> {
    let mut output = Table::new();
    output["format"] = value("text");
    let mut doc = DocumentMut::new();
    doc["output"] = Item::Table(output);
    fs::write(path, doc.to_string())?;

    let order = join_order_list(&default_order()).context("join default order")?;
    TomlPreferenceStore::new(path.to_path_buf())
        .save(&StoredPreferences {
            order: Some(order),
            order_by_name: Some(DEFAULT_ORDER_BY_NAME),
        })
        .with_context(|| format!("write preferences to {path}"))
}
