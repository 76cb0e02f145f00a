//! Command implementations for the refimage CLI.

pub mod columns;
pub mod migrate;
pub mod run;
