//! CLI command implementations

pub mod columns;
pub mod generate;
pub mod show;
