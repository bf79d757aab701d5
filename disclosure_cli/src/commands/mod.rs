//! CLI subcommand implementations.

pub mod browse;
pub mod categories;
pub mod list;
pub mod serve;
