// Author: Dustin Pilgrim
// License: MIT

pub mod model;
pub mod parser;

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, eyre};
use rune_cfg::RuneConfig;

use crate::{sdebug, sinfo};

pub use model::TallyConfig;

/// Candidate config paths in lookup order.
fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Some(mut path) = dirs::config_dir() {
        path.push("tally/tally.rune");
        paths.push(path);
    }

    paths.push(PathBuf::from("/etc/tally/tally.rune"));
    paths
}

/// Explicit path wins; otherwise the first existing default path.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(p) = explicit {
        return Some(p.to_path_buf());
    }

    default_config_paths().into_iter().find(|p| p.exists())
}

/// Loads the configuration. With no file anywhere, built-in defaults are used.
pub fn load(explicit: Option<&Path>) -> Result<TallyConfig> {
    let Some(path) = resolve_config_path(explicit) else {
        sdebug!("Tally", "No config file found, using built-in defaults");
        return Ok(TallyConfig::default());
    };

    if !path.exists() {
        return Err(eyre!("config file {} does not exist", path.display()));
    }

    let rune = RuneConfig::from_file(&path)
        .map_err(|e| eyre!("{e}"))
        .wrap_err_with(|| format!("failed to load config from {}", path.display()))?;

    let cfg = parser::parse_tally_config(&rune)
        .wrap_err_with(|| format!("invalid config in {}", path.display()))?;

    sinfo!("Tally", "Loaded config from: {}", path.display());
    Ok(cfg)
}
