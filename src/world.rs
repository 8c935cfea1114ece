//! The location graph.
//!
//! A [`World`] owns every [`Location`] in play. Locations are joined by
//! direction-labeled exits that name their destination rather than own it,
//! so the graph may freely contain cycles and records may reference each
//! other in any order.

use std::collections::HashMap;

use log::info;
use serde::Deserialize;
use thiserror::Error;

/// Raw description of one location, as found in a world file or supplied
/// directly by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub exits: Vec<ExitRecord>,
}

/// Raw description of one exit. Declaration order is preserved all the way
/// into the built graph.
#[derive(Debug, Clone, Deserialize)]
pub struct ExitRecord {
    pub direction: String,
    pub to: String,
}

/// A directed, direction-labeled edge to another location.
///
/// The destination is held by name; the owning [`World`] verifies at build
/// time that every name resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    direction: String,
    to: String,
}

impl Exit {
    pub fn direction(&self) -> &str {
        &self.direction
    }

    /// Name of the destination location.
    pub fn to(&self) -> &str {
        &self.to
    }
}

/// Any place a pawn can stand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    name: String,
    description: String,
    exits: Vec<Exit>,
}

impl Location {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Outgoing exits, in the order the world definition declared them.
    pub fn exits(&self) -> &[Exit] {
        &self.exits
    }
}

/// Problems that can arise while assembling a [`World`] from records.
/// All of them abort construction.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldBuildError {
    #[error("duplicate location name '{0}' in world definition")]
    DuplicateLocationName(String),
    #[error("exit '{direction}' from '{from}' leads to undefined location '{to}'")]
    UnknownLocationReference {
        from: String,
        direction: String,
        to: String,
    },
    #[error("starting location '{0}' is not defined in this world")]
    UnknownInitialLocation(String),
    #[error("world definition contains no locations")]
    EmptyWorld,
}

/// Failed attempt to follow an exit a location does not have.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("no exit '{direction}' leads out of '{from}'")]
pub struct NoSuchDirection {
    pub from: String,
    pub direction: String,
}

/// The complete location graph.
///
/// Built once from an ordered sequence of [`LocationRecord`]s and never
/// mutated afterward, so references into it can be handed around freely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct World {
    locations: HashMap<String, Location>,
    start: String,
}

impl World {
    /// Assemble a world from location records. The first record names the
    /// starting location.
    ///
    /// Construction happens in two passes: every location is registered
    /// before any exit is resolved, so exits may point forward or form
    /// cycles without restriction.
    ///
    /// # Errors
    /// - [`WorldBuildError::EmptyWorld`] if `records` is empty
    /// - [`WorldBuildError::DuplicateLocationName`] if two records share a name
    /// - [`WorldBuildError::UnknownLocationReference`] if an exit names a
    ///   location no record defines
    pub fn build(records: &[LocationRecord]) -> Result<World, WorldBuildError> {
        Self::build_with_start(records, None)
    }

    /// Like [`World::build`], but with an explicit starting location.
    ///
    /// # Errors
    /// As [`World::build`], plus [`WorldBuildError::UnknownInitialLocation`]
    /// if `start` names a location no record defines.
    pub fn build_with_start(
        records: &[LocationRecord],
        start: Option<&str>,
    ) -> Result<World, WorldBuildError> {
        let mut locations: HashMap<String, Location> = HashMap::with_capacity(records.len());

        // pass 1: register every location, with no exits yet
        for record in records {
            if locations.contains_key(&record.name) {
                return Err(WorldBuildError::DuplicateLocationName(record.name.clone()));
            }
            locations.insert(
                record.name.clone(),
                Location {
                    name: record.name.clone(),
                    description: record.description.clone(),
                    exits: Vec::with_capacity(record.exits.len()),
                },
            );
        }

        // pass 2: every name is now resolvable, so wire the exits
        for record in records {
            for exit in &record.exits {
                if !locations.contains_key(&exit.to) {
                    return Err(WorldBuildError::UnknownLocationReference {
                        from: record.name.clone(),
                        direction: exit.direction.clone(),
                        to: exit.to.clone(),
                    });
                }
                let Some(source) = locations.get_mut(&record.name) else {
                    // unreachable after pass 1, but symmetrical with the check above
                    return Err(WorldBuildError::UnknownLocationReference {
                        from: record.name.clone(),
                        direction: exit.direction.clone(),
                        to: record.name.clone(),
                    });
                };
                source.exits.push(Exit {
                    direction: exit.direction.clone(),
                    to: exit.to.clone(),
                });
            }
        }

        let start = match start {
            Some(name) => {
                if !locations.contains_key(name) {
                    return Err(WorldBuildError::UnknownInitialLocation(name.to_string()));
                }
                name.to_string()
            },
            None => match records.first() {
                Some(record) => record.name.clone(),
                None => return Err(WorldBuildError::EmptyWorld),
            },
        };

        info!("world built: {} locations, starting at '{start}'", locations.len());
        Ok(World { locations, start })
    }

    /// Look a location up by its unique name.
    pub fn lookup_by_name(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    /// Name of the location new pawns spawn into.
    pub fn start_name(&self) -> &str {
        &self.start
    }

    /// The location new pawns spawn into.
    pub fn start(&self) -> &Location {
        // the name was validated at build time
        &self.locations[&self.start]
    }

    /// Follow the exit labeled `direction` out of `from`.
    ///
    /// # Errors
    /// [`NoSuchDirection`] if `from` has no exit with that label.
    pub fn resolve_edge<'w>(
        &'w self,
        from: &Location,
        direction: &str,
    ) -> Result<&'w Location, NoSuchDirection> {
        from.exits
            .iter()
            .find(|exit| exit.direction == direction)
            .and_then(|exit| self.locations.get(&exit.to))
            .ok_or_else(|| NoSuchDirection {
                from: from.name.clone(),
                direction: direction.to_string(),
            })
    }

    /// Number of locations in the graph.
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, exits: &[(&str, &str)]) -> LocationRecord {
        LocationRecord {
            name: name.into(),
            description: format!("You are in {name}."),
            exits: exits
                .iter()
                .map(|(direction, to)| ExitRecord {
                    direction: (*direction).to_string(),
                    to: (*to).to_string(),
                })
                .collect(),
        }
    }

    fn two_rooms() -> Vec<LocationRecord> {
        vec![
            record("Room 1", &[("north", "Room 2")]),
            record("Room 2", &[("south", "Room 1")]),
        ]
    }

    #[test]
    fn build_resolves_cyclic_references() {
        let world = World::build(&two_rooms()).unwrap();
        let room1 = world.lookup_by_name("Room 1").unwrap();
        let room2 = world.resolve_edge(room1, "north").unwrap();
        assert_eq!(room2.name(), "Room 2");
        let back = world.resolve_edge(room2, "south").unwrap();
        assert_eq!(back.name(), "Room 1");
    }

    #[test]
    fn build_resolves_forward_references() {
        // "Hall" is declared before its destination exists
        let records = vec![
            record("Hall", &[("down", "Cellar")]),
            record("Cellar", &[]),
        ];
        let world = World::build(&records).unwrap();
        let hall = world.lookup_by_name("Hall").unwrap();
        assert_eq!(world.resolve_edge(hall, "down").unwrap().name(), "Cellar");
    }

    #[test]
    fn build_rejects_duplicate_names() {
        let records = vec![record("Room 1", &[]), record("Room 1", &[])];
        assert_eq!(
            World::build(&records),
            Err(WorldBuildError::DuplicateLocationName("Room 1".into()))
        );
    }

    #[test]
    fn build_rejects_dangling_exit() {
        let records = vec![record("Room 1", &[("north", "Nowhere Land")])];
        let err = World::build(&records).unwrap_err();
        assert!(matches!(
            err,
            WorldBuildError::UnknownLocationReference { ref to, .. } if to == "Nowhere Land"
        ));
    }

    #[test]
    fn build_rejects_empty_record_set() {
        assert_eq!(World::build(&[]), Err(WorldBuildError::EmptyWorld));
    }

    #[test]
    fn build_rejects_unknown_start() {
        let err = World::build_with_start(&two_rooms(), Some("Room 3")).unwrap_err();
        assert_eq!(err, WorldBuildError::UnknownInitialLocation("Room 3".into()));
    }

    #[test]
    fn first_record_is_default_start() {
        let world = World::build(&two_rooms()).unwrap();
        assert_eq!(world.start_name(), "Room 1");
        assert_eq!(world.start().name(), "Room 1");
    }

    #[test]
    fn explicit_start_overrides_first_record() {
        let world = World::build_with_start(&two_rooms(), Some("Room 2")).unwrap();
        assert_eq!(world.start().name(), "Room 2");
    }

    #[test]
    fn exits_keep_declaration_order() {
        let records = vec![
            record(
                "Hub",
                &[("west", "Hub"), ("east", "Hub"), ("south", "Hub")],
            ),
        ];
        let world = World::build(&records).unwrap();
        let hub = world.lookup_by_name("Hub").unwrap();
        let directions: Vec<&str> = hub.exits().iter().map(Exit::direction).collect();
        assert_eq!(directions, vec!["west", "east", "south"]);
    }

    #[test]
    fn resolve_edge_fails_on_missing_label() {
        let world = World::build(&two_rooms()).unwrap();
        let room1 = world.lookup_by_name("Room 1").unwrap();
        let err = world.resolve_edge(room1, "up").unwrap_err();
        assert_eq!(err.from, "Room 1");
        assert_eq!(err.direction, "up");
    }

    #[test]
    fn lookup_by_name_misses_cleanly() {
        let world = World::build(&two_rooms()).unwrap();
        assert!(world.lookup_by_name("Room 9").is_none());
    }

    #[test]
    fn description_defaults_to_empty_in_records() {
        let toml_record: LocationRecord =
            toml::from_str("name = \"Bare\"").unwrap();
        assert_eq!(toml_record.name, "Bare");
        assert!(toml_record.description.is_empty());
        assert!(toml_record.exits.is_empty());
    }
}
