use std::fs;
use std::path::{Path, PathBuf};

use super::core::TestdocConfig;
use crate::errors::{Error, Result};

/// Name of the configuration file searched for in the working tree
pub const CONFIG_FILE_NAME: &str = ".testdoc.toml";

const MAX_TRAVERSAL_DEPTH: usize = 6;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<TestdocConfig> {
    let config = toml::from_str::<TestdocConfig>(contents)
        .map_err(|e| Error::Config(format!("Failed to parse {CONFIG_FILE_NAME}: {e}")))?;
    config.validate().map_err(Error::Config)?;
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the current directory
/// and its ancestors are searched for `.testdoc.toml`; a discovered file that
/// fails to parse is reported and defaults are used.
pub fn load_config(explicit: Option<&Path>) -> Result<TestdocConfig> {
    if let Some(path) = explicit {
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = parse_and_validate_config(&contents)?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {e}. Using default config.");
            return Ok(TestdocConfig::default());
        }
    };

    Ok(directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!("No {CONFIG_FILE_NAME} found. Using default config.");
            TestdocConfig::default()
        }))
}

fn try_load_config_from_path(path: &Path) -> Option<TestdocConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            // Only log actual errors, not "file not found"
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("Failed to read config file {}: {e}", path.display());
            }
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{e}. Using defaults.");
            Some(TestdocConfig::default())
        }
    }
}

/// Directory and its ancestors, nearest first, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}
