use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use anchorcheck::defaults::Catalog;
use anchorcheck::output::OutputFormat;
use anchorcheck::validation::Validator;

mod commands;

use commands::{Context, batch_command, catalog_command, check_command, report};

#[derive(Parser)]
#[command(
    name = "anchorcheck",
    about = "Validates anchor service configuration files before deployment",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Human, global = true, env = "ANCHORCHECK_FORMAT")]
    format: OutputFormat,

    /// Extra networks, roles, assets or currencies to accept (YAML or JSON)
    #[arg(long, global = true, env = "ANCHORCHECK_CATALOG")]
    catalog: Option<PathBuf>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single configuration file
    Check {
        /// Path to a .toml or .json file
        file: PathBuf,
    },

    /// Validate every configuration file in a directory
    Batch {
        /// Directory to scan
        #[arg(default_value = "configs")]
        dir: PathBuf,

        /// Also scan subdirectories
        #[arg(short, long)]
        recursive: bool,
    },

    /// Print the accepted networks, roles, assets and currencies
    Catalog,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let catalog = match &cli.catalog {
        Some(path) => match Catalog::from_path(path) {
            Ok(catalog) => catalog,
            Err(err) => {
                report(err);
                return ExitCode::FAILURE;
            }
        },
        None => Catalog::default(),
    };

    let ctx = Context {
        format: cli.format,
        validator: Validator::with_catalog(catalog),
    };

    let outcome = match &cli.command {
        Commands::Check { file } => check_command(&ctx, file),
        Commands::Batch { dir, recursive } => batch_command(&ctx, dir, *recursive),
        Commands::Catalog => catalog_command(&ctx),
    };

    match outcome {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("anchorcheck=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("anchorcheck=info"), // -v: info messages
        _ => EnvFilter::new("anchorcheck=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
