//! CLI commands

pub mod convert;
