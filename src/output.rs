//! Rendering of validation results for people and for machines

use colored::Colorize;
use serde::Serialize;
use std::io::{self, Write};

use crate::batch::{BatchReport, FileOutcome};
use crate::defaults::Catalog;
use crate::models::{Severity, ValidationResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Human-readable report for one validated file
pub fn write_result<W: Write>(out: &mut W, label: &str, result: &ValidationResult) -> io::Result<()> {
    writeln!(out, "Validating {label}")?;

    for diagnostic in result.diagnostics() {
        let marker = match diagnostic.severity {
            Severity::Error => "•".red(),
            Severity::Warning => "⚠".yellow(),
        };
        writeln!(out, "  {marker} {}", diagnostic.message)?;
    }

    if result.is_valid() {
        let suffix = match result.warning_count() {
            0 => String::new(),
            n => format!(" ({})", plural(n, "warning")),
        };
        writeln!(out, "{} {label} is valid{suffix}", "✅".green())
    } else {
        writeln!(
            out,
            "{} {label} is invalid: {}, {}",
            "❌".red(),
            plural(result.error_count(), "error"),
            plural(result.warning_count(), "warning")
        )
    }
}

/// Human-readable report for a whole directory
pub fn write_batch<W: Write>(out: &mut W, report: &BatchReport) -> io::Result<()> {
    writeln!(
        out,
        "Validating {} in {}",
        plural(report.files.len(), "configuration file"),
        report.directory.display()
    )?;
    writeln!(out, "{}", "=".repeat(60))?;

    for file in &report.files {
        let label = file.path.display().to_string();
        match &file.outcome {
            FileOutcome::Checked(result) => write_result(out, &label, result)?,
            FileOutcome::Unreadable(error) => {
                writeln!(out, "Validating {label}")?;
                writeln!(out, "{} {error}", "❌".red())?;
            }
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", "=".repeat(60))?;
    if report.passed() {
        writeln!(
            out,
            "{} All {} configuration files are valid",
            "✅".green(),
            report.files.len()
        )
    } else {
        let failed: Vec<String> = report
            .failed_files()
            .map(|f| {
                f.path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| f.path.display().to_string())
            })
            .collect();
        writeln!(
            out,
            "{} Validation failed for: {}",
            "❌".red(),
            failed.join(", ")
        )
    }
}

/// The effective enumerations, one line per list
pub fn write_catalog<W: Write>(out: &mut W, catalog: &Catalog) -> io::Result<()> {
    for (title, values) in [
        ("Networks", &catalog.networks),
        ("Roles", &catalog.roles),
        ("Assets", &catalog.assets),
        ("Currencies", &catalog.currencies),
    ] {
        writeln!(out, "{} ({}): {}", title.bold(), values.len(), values.join(", "))?;
    }
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Diagnostic;

    fn render(result: &ValidationResult) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_result(&mut buf, "anchor.toml", result).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_valid_with_warning() {
        let result = ValidationResult::new(vec![Diagnostic::warning(
            "sessions",
            "optional section not provided, using defaults",
        )]);

        assert_eq!(
            render(&result),
            "Validating anchor.toml\n\
             \x20 ⚠ sessions: optional section not provided, using defaults\n\
             ✅ anchor.toml is valid (1 warning)\n"
        );
    }

    #[test]
    fn test_diagnostics_keep_the_order_they_were_found() {
        let result = ValidationResult::new(vec![
            Diagnostic::error("contract", "missing required section"),
            Diagnostic::warning("sessions", "optional section not provided, using defaults"),
            Diagnostic::error("attestors", "missing required section"),
        ]);

        let text = render(&result);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "  • contract: missing required section");
        assert_eq!(lines[2], "  ⚠ sessions: optional section not provided, using defaults");
        assert_eq!(lines[3], "  • attestors: missing required section");
        assert_eq!(lines[4], "❌ anchor.toml is invalid: 2 errors, 1 warning");
    }

    #[test]
    fn test_catalog_lines() {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        write_catalog(&mut buf, &Catalog::default()).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.starts_with(
            "Networks (4): stellar-testnet, stellar-mainnet, stellar-futurenet, stellar-public\n"
        ));
        assert!(text.contains("Currencies (7): USD, EUR, GBP, JPY, MXN, NGN, PKR\n"));
    }

    #[test]
    fn test_json_output() {
        let result = ValidationResult::new(vec![Diagnostic::error("contract", "missing required section")]);
        let mut buf = Vec::new();
        write_json(&mut buf, &result).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["errors"][0]["message"], "contract: missing required section");
    }
}
