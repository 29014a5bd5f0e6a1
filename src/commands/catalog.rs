use anyhow::{Context as _, Result};
use std::io;

use anchorcheck::output::{OutputFormat, write_catalog, write_json};

use super::Context;

pub fn catalog_command(ctx: &Context) -> Result<bool> {
    let catalog = ctx.validator.catalog();
    let mut stdout = io::stdout().lock();

    match ctx.format {
        OutputFormat::Json => write_json(&mut stdout, catalog),
        OutputFormat::Human => write_catalog(&mut stdout, catalog),
    }
    .context("failed to write catalog")?;

    Ok(true)
}
