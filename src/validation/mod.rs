mod assets;
mod attestors;
mod collector;
mod contract;
pub mod rules;
mod sessions;
mod validator;


// Re-export the main Validator
pub use validator::{Validator, validate};
