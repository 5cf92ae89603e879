//! Terminal front end for famlist lists.
//!
//! # Responsibility
//! - Act as a presentation layer: parse intents, confirm destructive
//!   actions, call the core, print the derived view.
//! - Persist each list in the local snapshot store between runs.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use famlist_core::db::open_db;
use famlist_core::{
    clear_completed_with, default_log_level, delete_category_with, init_logging, AlwaysConfirm,
    ConfirmGate, ConfirmPrompt, ItemId, ListKind, ListManager, ListRepository, Section,
    SqliteListRepository, StoredList, DEFAULT_CATEGORY,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

const DB_PATH_ENV: &str = "FAMLIST_DB_PATH";
const DEFAULT_DB_FILE: &str = "famlist.sqlite3";

#[derive(Parser, Debug)]
#[command(name = "famlist", version, about = "Shared household todo and grocery lists")]
struct Cli {
    /// List store file (falls back to $FAMLIST_DB_PATH, then ./famlist.sqlite3)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// List key inside the store
    #[arg(long, short, global = true, default_value = "groceries")]
    list: String,

    /// Kind used when the list does not exist yet (grocery|todo)
    #[arg(long, global = true, default_value = "grocery")]
    kind: String,

    /// Family that owns a newly created list
    #[arg(long, global = true)]
    family: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true)]
    log_dir: Option<String>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Print the view as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the list grouped by category
    View,
    /// Add an item
    Add {
        label: String,
        #[arg(long, short, default_value = DEFAULT_CATEGORY)]
        category: String,
    },
    /// Check or uncheck an item (full id or unique prefix)
    Toggle { item: String },
    /// Change an item's label
    Rename { item: String, label: String },
    /// Remove all checked items
    Clear {
        #[arg(long, short)]
        yes: bool,
    },
    /// Add a category
    AddCategory { label: String },
    /// Delete a category and every item in it
    DeleteCategory {
        label: String,
        #[arg(long, short)]
        yes: bool,
    },
    /// List stored list keys
    Lists,
}

/// Asks on the terminal and accepts `y`/`yes`.
struct StdinConfirm;

impl ConfirmGate for StdinConfirm {
    fn confirm(&mut self, prompt: &ConfirmPrompt) -> bool {
        print!("{}: {} [y/N] ", prompt.title, prompt.message);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(|err| anyhow!(err))?;
    }

    let db_path = resolve_db_path(cli.db.clone());
    let conn = open_db(&db_path)
        .with_context(|| format!("failed to open list store `{}`", db_path.display()))?;
    let repo = SqliteListRepository::new(&conn);

    if let Command::Lists = cli.command {
        for key in repo.list_keys(cli.family.as_deref())? {
            println!("{key}");
        }
        return Ok(());
    }

    let mut stored = match repo.load_list(&cli.list)? {
        Some(stored) => stored,
        None => StoredList {
            list_key: cli.list.clone(),
            kind: ListKind::parse(&cli.kind)
                .ok_or_else(|| anyhow!("unknown list kind `{}`", cli.kind))?,
            family_id: cli.family.clone(),
            snapshot: ListManager::new().to_snapshot(),
        },
    };
    let mut manager = ListManager::from_snapshot(stored.snapshot.clone());

    let changed = run_command(&cli.command, &mut manager)?;
    if changed {
        stored.snapshot = manager.to_snapshot();
        repo.save_list(&stored)?;
    }

    print_view(&manager.derived_view(), cli.json)
}

fn run_command(command: &Command, manager: &mut ListManager) -> Result<bool> {
    let changed = match command {
        Command::View | Command::Lists => false,
        Command::Add { label, category } => match manager.add_item(category, label) {
            Some(_) => true,
            None => bail!("item label and category must not be blank"),
        },
        Command::Toggle { item } => {
            let id = resolve_item(manager, item)?;
            manager.toggle_item(id)
        }
        Command::Rename { item, label } => {
            let id = resolve_item(manager, item)?;
            manager.start_edit(id);
            if !manager.commit_edit(label) {
                bail!("item label must not be blank");
            }
            true
        }
        Command::Clear { yes } => {
            let before = manager.len();
            clear_completed_with(manager, gate_for(*yes).as_mut());
            manager.len() != before
        }
        Command::AddCategory { label } => manager.add_category(label),
        Command::DeleteCategory { label, yes } => {
            let before = manager.to_snapshot();
            delete_category_with(manager, gate_for(*yes).as_mut(), label);
            manager.to_snapshot() != before
        }
    };
    Ok(changed)
}

fn gate_for(yes: bool) -> Box<dyn ConfirmGate> {
    if yes {
        Box::new(AlwaysConfirm)
    } else {
        Box::new(StdinConfirm)
    }
}

// Accepts a full id or a unique prefix of the printed short id.
fn resolve_item(manager: &ListManager, text: &str) -> Result<ItemId> {
    let needle = text.trim().to_ascii_lowercase();
    if needle.is_empty() {
        bail!("item id must not be blank");
    }
    let matches: Vec<ItemId> = manager
        .items()
        .iter()
        .map(|item| item.id)
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => bail!("no item matches `{text}`"),
        _ => bail!("`{text}` matches {} items; use a longer prefix", matches.len()),
    }
}

fn resolve_db_path(flag: Option<PathBuf>) -> PathBuf {
    flag.or_else(|| {
        std::env::var(DB_PATH_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE))
}

fn print_view(sections: &[Section], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(sections)?);
        return Ok(());
    }
    for section in sections {
        println!("{}", section.title);
        if section.items.is_empty() {
            println!("  (empty)");
        }
        for item in &section.items {
            let mark = if item.completed { "x" } else { " " };
            let id = item.id.to_string();
            println!("  [{mark}] {}  ({})", item.label, &id[..8]);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{resolve_item, run_command, Cli, Command};
    use clap::Parser;
    use famlist_core::ListManager;

    #[test]
    fn parses_add_with_category() {
        let cli = Cli::parse_from(["famlist", "--list", "home", "add", "Apples", "-c", "Produce"]);
        assert_eq!(cli.list, "home");
        match cli.command {
            Command::Add { label, category } => {
                assert_eq!(label, "Apples");
                assert_eq!(category, "Produce");
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn resolve_item_accepts_unique_prefix() {
        let mut manager = ListManager::new();
        let id = manager.add_item("General", "Milk").unwrap();
        let prefix = id.to_string()[..8].to_string();
        assert_eq!(resolve_item(&manager, &prefix).unwrap(), id);
        assert!(resolve_item(&manager, "zzzz").is_err());
    }

    #[test]
    fn clear_with_yes_skips_prompt() {
        let mut manager = ListManager::new();
        let id = manager.add_item("General", "Milk").unwrap();
        manager.toggle_item(id);

        let changed = run_command(&Command::Clear { yes: true }, &mut manager).unwrap();
        assert!(changed);
        assert!(manager.is_empty());
    }

    #[test]
    fn blank_add_is_reported() {
        let mut manager = ListManager::new();
        let command = Command::Add {
            label: "  ".to_string(),
            category: "General".to_string(),
        };
        assert!(run_command(&command, &mut manager).is_err());
        assert!(manager.is_empty());
    }

    #[test]
    fn blank_category_add_is_reported() {
        let mut manager = ListManager::new();
        let command = Command::Add {
            label: "Milk".to_string(),
            category: "   ".to_string(),
        };
        assert!(run_command(&command, &mut manager).is_err());
        assert!(manager.is_empty());
    }
}
