//! Interactive review REPL (Read-Eval-Print Loop).

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use std::path::PathBuf;
use stockscribe_domain::traits::InventorySink;
use stockscribe_domain::{InventoryUpdateBatch, SessionId, Unit};
use stockscribe_reconciler::Reconciler;
use stockscribe_review::{ItemPatch, SessionStore};

/// A parsed REPL line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewCommand {
    /// Show all items
    List,
    /// Confirm item N
    Confirm(usize),
    /// Apply corrections to item N
    Edit(usize, ItemPatch),
    /// Remove item N
    Remove(usize),
    /// Finalize the session and save
    Finalize,
    /// Show help
    Help,
    /// Leave without saving
    Exit,
}

/// What the loop should do after a command.
#[derive(Debug)]
pub enum Step {
    /// Print and keep reading
    Continue(String),
    /// Session finalized and reconciled
    Finalized(InventoryUpdateBatch),
    /// Leave the loop
    Exit,
}

/// Run the review REPL over one session until it is finalized or abandoned.
pub fn run_review<K>(
    sessions: &mut SessionStore,
    id: SessionId,
    reconciler: &Reconciler,
    sink: &mut K,
    config: &Config,
    formatter: &Formatter,
) -> Result<()>
where
    K: InventorySink,
    K::Error: std::fmt::Display,
{
    println!(
        "{}",
        formatter.info("Stockscribe review - Type 'help' for commands, 'exit' to quit")
    );
    println!("{}", formatter.format_session(sessions.get(id)?)?);

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(readline_error)?
        .build();
    let mut editor: Editor<(), DefaultHistory> = Editor::with_config(editor_config).map_err(readline_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        match editor.readline("review> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                let step = parse_review_command(line)
                    .and_then(|cmd| apply_command(cmd, sessions, id, reconciler, sink, formatter));

                match step {
                    Ok(Step::Continue(output)) => println!("{}", output),
                    Ok(Step::Finalized(batch)) => {
                        println!("{}", formatter.format_batch(&batch)?);
                        break;
                    }
                    Ok(Step::Exit) => {
                        sessions.discard(id)?;
                        println!("{}", formatter.warning("Session discarded, nothing saved"));
                        break;
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                sessions.discard(id)?;
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// Apply one command to the session.
pub fn apply_command<K>(
    cmd: ReviewCommand,
    sessions: &mut SessionStore,
    id: SessionId,
    reconciler: &Reconciler,
    sink: &mut K,
    formatter: &Formatter,
) -> Result<Step>
where
    K: InventorySink,
    K::Error: std::fmt::Display,
{
    let step = match cmd {
        ReviewCommand::List => Step::Continue(formatter.format_session(sessions.get(id)?)?),
        ReviewCommand::Confirm(index) => {
            let item = sessions.get_mut(id)?.confirm_item(index)?;
            Step::Continue(formatter.success(&format!("Confirmed #{} {}", index, item.product_name)))
        }
        ReviewCommand::Edit(index, patch) => {
            let session = sessions.get_mut(id)?;
            session.edit_item(index, patch)?;
            let status = session.get(index)?.status;
            Step::Continue(formatter.success(&format!("Edited #{} ({})", index, status)))
        }
        ReviewCommand::Remove(index) => {
            sessions.get_mut(id)?.remove_item(index)?;
            Step::Continue(formatter.success(&format!("Removed #{}", index)))
        }
        ReviewCommand::Finalize => {
            let location = sessions.get(id)?.location().to_string();
            let items = sessions.finalize(id)?;
            Step::Finalized(reconciler.reconcile_into(&items, &location, sink))
        }
        ReviewCommand::Help => Step::Continue(help_text(formatter)),
        ReviewCommand::Exit => Step::Exit,
    };
    Ok(step)
}

/// Parse a REPL command line.
pub fn parse_review_command(line: &str) -> Result<ReviewCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReviewCommand::Exit),
        "help" | "?" => Ok(ReviewCommand::Help),
        "list" | "ls" => Ok(ReviewCommand::List),
        "finalize" => Ok(ReviewCommand::Finalize),
        "confirm" => Ok(ReviewCommand::Confirm(parse_index(&parts, "confirm <N>")?)),
        "remove" | "rm" => Ok(ReviewCommand::Remove(parse_index(&parts, "remove <N>")?)),
        "edit" => {
            let index = parse_index(&parts, "edit <N> field=value ...")?;
            let patch = parse_patch(&parts[2..])?;
            if patch.is_empty() {
                return Err(CliError::InvalidInput(
                    "Usage: edit <N> field=value ...".to_string(),
                ));
            }
            Ok(ReviewCommand::Edit(index, patch))
        }
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

fn parse_index(parts: &[&str], usage: &str) -> Result<usize> {
    parts
        .get(1)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CliError::InvalidInput(format!("Usage: {}", usage)))
}

/// Parse `field=value` pairs; bare words extend the previous value.
fn parse_patch(args: &[&str]) -> Result<ItemPatch> {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for arg in args {
        match arg.split_once('=') {
            Some((field, value)) => pairs.push((field.to_lowercase(), value.to_string())),
            None => match pairs.last_mut() {
                Some((_, value)) => {
                    value.push(' ');
                    value.push_str(arg);
                }
                None => {
                    return Err(CliError::InvalidInput(format!(
                        "Expected field=value, got '{}'",
                        arg
                    )))
                }
            },
        }
    }

    let mut patch = ItemPatch::default();
    for (field, value) in pairs {
        match field.as_str() {
            "id" | "product_id" => patch.product_id = Some(value),
            "name" | "product" => patch.product_name = Some(value),
            "qty" | "quantity" => patch.quantity = Some(parse_number(&field, &value)?),
            "price" => patch.price = Some(parse_number(&field, &value)?),
            "location" | "loc" => patch.location = Some(value),
            "unit" => {
                let unit = Unit::parse(&value)
                    .ok_or_else(|| CliError::InvalidInput(format!("Unknown unit: {}", value)))?;
                patch.unit = Some(unit);
            }
            _ => return Err(CliError::InvalidInput(format!("Unknown field: {}", field))),
        }
    }
    Ok(patch)
}

fn parse_number(field: &str, value: &str) -> Result<f64> {
    value
        .replace(',', ".")
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("{} must be a number, got '{}'", field, value)))
}

fn readline_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::new(
        std::io::ErrorKind::Other,
        format!("Failed to initialize editor: {}", e),
    ))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn help_text(formatter: &Formatter) -> String {
    [
        formatter.info("Available commands:"),
        String::new(),
        "  list                        - Show all items with their index".to_string(),
        "  confirm <N>                 - Mark item N as reviewed (needs a product id)".to_string(),
        "  edit <N> field=value ...    - Correct item N".to_string(),
        "    fields: id, name, qty, unit, price, location".to_string(),
        "  remove <N>                  - Drop item N from the count".to_string(),
        "  finalize                    - Close the session and save".to_string(),
        "  help, ?                     - Show this help".to_string(),
        "  exit, quit, q               - Leave without saving".to_string(),
    ]
    .join("\n")
}
