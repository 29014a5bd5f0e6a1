use anyhow::{Context as _, Result};
use std::io;
use std::path::Path;

use anchorcheck::batch::{self, BatchOptions};
use anchorcheck::output::{OutputFormat, write_batch, write_json};

use super::{Context, report};

pub fn batch_command(ctx: &Context, dir: &Path, recursive: bool) -> Result<bool> {
    let report_data = match batch::run(dir, BatchOptions { recursive }, &ctx.validator) {
        Ok(report_data) => report_data,
        Err(err) => {
            report(err);
            return Ok(false);
        }
    };

    let mut stdout = io::stdout().lock();
    match ctx.format {
        OutputFormat::Json => write_json(&mut stdout, &report_data),
        OutputFormat::Human => write_batch(&mut stdout, &report_data),
    }
    .context("failed to write report")?;

    tracing::info!(
        files = report_data.files.len(),
        errors = report_data.total_errors(),
        warnings = report_data.total_warnings(),
        "Batch finished"
    );
    Ok(report_data.passed())
}
