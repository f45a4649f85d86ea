//! CLI command implementations.

pub mod common;
pub mod example;
pub mod examples;
pub mod run;
pub mod shell;
pub mod version;
