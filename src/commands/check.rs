use anyhow::{Context as _, Result};
use std::io;
use std::path::Path;

use anchorcheck::batch::{FileOutcome, check_file};
use anchorcheck::output::{OutputFormat, write_json, write_result};

use super::{Context, report};

/// Validate a single configuration file. Returns whether it passed.
pub fn check_command(ctx: &Context, path: &Path) -> Result<bool> {
    let file = check_file(path, &ctx.validator);
    let passed = file.passed();
    let mut stdout = io::stdout().lock();

    match ctx.format {
        OutputFormat::Json => {
            write_json(&mut stdout, &file).context("failed to write report")?;
        }
        OutputFormat::Human => match file.outcome {
            FileOutcome::Checked(result) => {
                write_result(&mut stdout, &path.display().to_string(), &result)
                    .context("failed to write report")?;
            }
            FileOutcome::Unreadable(err) => report(err),
        },
    }

    Ok(passed)
}
