//! Configuration loaded from `.testdoc.toml`.
//!
//! Every field has a default, so an absent or partial file is fine.

mod core;
mod loader;

pub use self::core::{
    default_max_message_lines, ExtractionConfig, GroupingConfig, ResultsConfig, SynthesisConfig,
    TestdocConfig,
};
pub use loader::{directory_ancestors, load_config, parse_and_validate_config, CONFIG_FILE_NAME};
