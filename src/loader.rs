//! World-file loading.
//!
//! Worlds are authored as TOML: an ordered list of `[[locations]]` tables,
//! each with an ordered list of `[[locations.exits]]`. The order exits
//! appear in the file is the order move actions are offered in, so exits
//! are arrays of tables rather than a keyed map.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use crate::world::{LocationRecord, World};

/// Top-level shape of a world file.
#[derive(Debug, Deserialize)]
struct WorldFile {
    /// Optional override; the first location listed is the default start.
    start: Option<String>,
    locations: Vec<LocationRecord>,
}

/// Load and build a [`World`] from a TOML world file.
///
/// # Errors
/// - if the file cannot be read or parsed
/// - if the described graph fails validation (duplicate names, dangling
///   exits, missing start)
pub fn load_world(path: &Path) -> Result<World> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading world data from '{}'", path.display()))?;
    let file: WorldFile = toml::from_str(&text)
        .with_context(|| format!("parsing world data from '{}'", path.display()))?;
    info!(
        "{} location records loaded from '{}'",
        file.locations.len(),
        path.display()
    );
    let world = World::build_with_start(&file.locations, file.start.as_deref())?;
    Ok(world)
}
