//! Pawns -- the actors that wander a world.
//!
//! A pawn binds a position in the graph to a decision policy. Each call to
//! [`Pawn::take_turn`] runs one enumerate -> select -> resolve cycle: list
//! the legal actions, let the bound strategy pick one, attempt it.

use std::fmt;

use log::info;

use crate::action::{Action, ActionError};
use crate::strategy::SelectActionStrategy;
use crate::world::{Location, World};

/// An actor with a name, a place in the world, and a way of deciding what
/// to do next.
pub struct Pawn {
    name: String,
    location: String,
    strategy: Box<dyn SelectActionStrategy>,
    debug_mode: bool,
    quit_requested: bool,
}

impl Pawn {
    /// Create a pawn standing at `start`, deciding its turns with `strategy`.
    pub fn new(
        name: impl Into<String>,
        start: &Location,
        strategy: Box<dyn SelectActionStrategy>,
    ) -> Pawn {
        let name = name.into();
        info!("pawn '{}' enters the world at '{}'", name, start.name());
        Pawn {
            name,
            location: start.name().to_string(),
            strategy,
            debug_mode: false,
            quit_requested: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the location the pawn currently occupies.
    pub fn location_name(&self) -> &str {
        &self.location
    }

    /// The location the pawn currently occupies.
    ///
    /// # Panics
    /// If `world` is not the world the pawn plays in. The stored name is
    /// validated on every change, so it always resolves against the right
    /// world.
    pub fn current_location<'w>(&self, world: &'w World) -> &'w Location {
        world.lookup_by_name(&self.location).unwrap_or_else(|| {
            panic!(
                "pawn '{}' is at '{}', which is not in this world",
                self.name, self.location
            )
        })
    }

    /// Swap in a new decision policy. Takes effect on the next turn.
    pub fn set_strategy(&mut self, strategy: Box<dyn SelectActionStrategy>) {
        info!("pawn '{}' changes strategy", self.name);
        self.strategy = strategy;
    }

    /// Enable or disable the diagnostic malfunction action. It is still
    /// only offered while the pawn is interactively driven.
    pub fn set_debug_mode(&mut self, on: bool) {
        self.debug_mode = on;
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// True once the pawn has chosen to stop playing.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub(crate) fn relocate(&mut self, destination: String) {
        self.location = destination;
    }

    pub(crate) fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Every action the pawn could legally attempt right now: one move per
    /// exit of the current location (in declared order), then the fixed
    /// investigate and rest actions. Interactively driven pawns may also
    /// quit, and may malfunction when debug mode is on.
    ///
    /// The list is never empty -- rest is always available.
    pub fn possible_actions(&self, world: &World) -> Vec<Action> {
        let here = self.current_location(world);
        let mut actions: Vec<Action> = here
            .exits()
            .iter()
            .map(|exit| Action::Move {
                direction: exit.direction().to_string(),
            })
            .collect();
        actions.push(Action::Investigate);
        actions.push(Action::Rest);
        if self.strategy.is_interactive() {
            actions.push(Action::Quit);
            if self.debug_mode {
                actions.push(Action::Malfunction);
            }
        }
        actions
    }

    /// Run one full turn: enumerate the legal actions, have the bound
    /// strategy pick one, and attempt it. Picks that turn out to be illegal
    /// are absorbed; at most one observable state change happens per call.
    ///
    /// # Errors
    /// A fatal [`ActionError`] from the performed action -- in this core,
    /// only the simulated malfunction produces one.
    pub fn take_turn(&mut self, world: &World) -> Result<(), ActionError> {
        let actions = self.possible_actions(world);
        let chosen = self.strategy.select(&self.name, &actions);
        info!("{} chose: {}", self.name, chosen.description());
        chosen.perform_if_possible(world, self)
    }
}

impl fmt::Debug for Pawn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pawn")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("debug_mode", &self.debug_mode)
            .field("quit_requested", &self.quit_requested)
            .finish_non_exhaustive()
    }
}
