//! CLI module for testdoc
//!
//! - Argument parsing (`args`)
//! - The run handler (`commands`)

pub mod args;
pub mod commands;

pub use args::{parse_args, Cli};
pub use commands::{build_report, handle_run};
