//! Command line front end for the scaffolder engine

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Commands};
