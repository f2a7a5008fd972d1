//! CLI subcommand implementations

pub mod new;
pub mod recipes;
