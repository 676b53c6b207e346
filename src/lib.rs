pub use crate::errors::ParikshaError;

pub mod assert;
pub mod cli;
pub mod discovery;
pub mod errors;
pub mod execution;
pub mod loader;
pub mod model;
pub mod registry;
pub mod report;
