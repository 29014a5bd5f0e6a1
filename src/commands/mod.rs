mod batch;
mod catalog;
mod check;

pub use batch::batch_command;
pub use catalog::catalog_command;
pub use check::check_command;

use anchorcheck::output::OutputFormat;
use anchorcheck::validation::Validator;

/// Settings shared by every subcommand
pub struct Context {
    pub format: OutputFormat,
    pub validator: Validator,
}

/// Print a structural failure with its source snippet and help text
pub fn report<E>(err: E)
where
    E: miette::Diagnostic + Send + Sync + 'static,
{
    eprintln!("{:?}", miette::Report::new(err));
}
