//! Review command implementation.

use super::{open_store, run_extraction};
use crate::cli::ReviewArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::repl;
use stockscribe_reconciler::Reconciler;
use stockscribe_review::SessionStore;

/// Execute the review command: extract, then review interactively.
pub fn execute_review(args: ReviewArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = run_extraction(&args.input, config)?;
    for skipped in &report.skipped {
        println!(
            "{}",
            formatter.warning(&format!("Skipped \"{}\": {}", skipped.fragment, skipped.reason))
        );
    }

    let mut sessions = SessionStore::new();
    let id = sessions.open(args.location, args.period, config.extractor.threshold());
    sessions.get_mut(id)?.add_items(report.items)?;

    let reconciler = Reconciler::new(config.reconciler.clone());
    let mut store = open_store(config)?;
    repl::run_review(&mut sessions, id, &reconciler, &mut store, config, formatter)
}
