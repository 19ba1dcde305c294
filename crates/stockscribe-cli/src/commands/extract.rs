//! Extract command implementation.

use super::run_extraction;
use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;

/// Execute the extract command.
pub fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let report = run_extraction(&args.input, config)?;
    println!("{}", formatter.format_report(&report)?);
    Ok(())
}
