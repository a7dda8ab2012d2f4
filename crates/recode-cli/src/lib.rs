//! recode-cli library
//!
//! Exposes the argument parser, logging setup and commands of the `recode`
//! binary so they can be exercised from tests.

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::Cli;
