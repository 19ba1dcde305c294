//! Reconcile command implementation.

use super::{open_store, run_extraction};
use crate::cli::ReconcileArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use stockscribe_domain::InventoryUpdateBatch;
use stockscribe_reconciler::Reconciler;

/// Execute the reconcile command.
pub fn execute_reconcile(args: ReconcileArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let batch = reconcile_file(&args, config)?;
    println!("{}", formatter.format_batch(&batch)?);
    Ok(())
}

/// Extract the file and save the confident items in one batch.
///
/// Items still flagged for review are left out unless
/// `--include-unconfirmed` is given.
pub fn reconcile_file(args: &ReconcileArgs, config: &Config) -> Result<InventoryUpdateBatch> {
    let report = run_extraction(&args.input, config)?;

    let mut reconciler_config = config.reconciler.clone();
    reconciler_config.include_unconfirmed |= args.include_unconfirmed;
    let reconciler = Reconciler::new(reconciler_config);

    let mut store = open_store(config)?;
    Ok(reconciler.reconcile_into(&report.items, &args.location, &mut store))
}
