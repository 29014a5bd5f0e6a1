pub mod batch;
pub mod defaults;
pub mod loader;
pub mod models;
pub mod output;
pub mod validation;
