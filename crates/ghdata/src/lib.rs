#![forbid(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod query;
pub mod search;
pub mod sqlite;
pub mod utils;

pub use catalog::GhData;
pub use cli::app::{Cli, Command};
pub use error::{GhDataError, Result};
