//! Actions a pawn can attempt on its turn.
//!
//! Actions are transient command values: enumerated fresh each turn,
//! selected by a strategy, performed once, discarded. Each variant carries
//! only the parameters it needs and maps to a fixed set of [`ActionTag`]s
//! so selection policies can pick by category without matching variants.

use std::fmt;

use log::info;
use thiserror::Error;
use variantly::Variantly;

use crate::pawn::Pawn;
use crate::world::{NoSuchDirection, World};

/// Classification labels attached to every action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionTag {
    Movement,
    Rest,
    Investigate,
    Aggressive,
    Helpful,
    Quit,
    DebugOnly,
    Error,
    ObjectHandling,
}

/// One thing a pawn can attempt to do on its turn.
#[derive(Debug, Clone, PartialEq, Eq, Variantly)]
pub enum Action {
    /// Follow the exit with the given direction label.
    Move { direction: String },
    /// Look around without going anywhere.
    Investigate,
    /// Do nothing this turn.
    Rest,
    /// Stop playing. Only offered to interactively driven pawns.
    Quit,
    /// Fail on purpose. Only offered in debug mode; proves that unexpected
    /// failures are never absorbed.
    Malfunction,
}

/// Ways an action can go wrong when performed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// A move named an exit the pawn's location doesn't have.
    #[error("you can't go {direction} from {from}")]
    InvalidDirection { from: String, direction: String },
    /// A direct edge query used a label the location doesn't have.
    #[error(transparent)]
    NoSuchDirection(#[from] NoSuchDirection),
    /// The deliberate failure raised by [`Action::Malfunction`].
    #[error("simulated malfunction")]
    Simulated,
}

impl ActionError {
    /// True for the failure kinds that merely mean "you can't do that here"
    /// rather than something actually being broken. Only these may be
    /// absorbed by [`Action::perform_if_possible`].
    pub fn is_precondition_violation(&self) -> bool {
        matches!(
            self,
            ActionError::InvalidDirection { .. } | ActionError::NoSuchDirection(_)
        )
    }
}

impl Action {
    /// Human-readable description, suitable for a menu line.
    pub fn description(&self) -> String {
        match self {
            Action::Move { direction } => format!("Go {direction}"),
            Action::Investigate => "Investigate your surroundings".to_string(),
            Action::Rest => "Rest for a while".to_string(),
            Action::Quit => "Give up and quit".to_string(),
            Action::Malfunction => "Trigger a simulated malfunction".to_string(),
        }
    }

    /// The fixed classification tags for this variant. Never empty.
    pub fn tags(&self) -> &'static [ActionTag] {
        match self {
            Action::Move { .. } => &[ActionTag::Movement],
            Action::Investigate => &[ActionTag::Investigate, ActionTag::Helpful],
            Action::Rest => &[ActionTag::Rest, ActionTag::Helpful],
            Action::Quit => &[ActionTag::Quit],
            Action::Malfunction => &[ActionTag::DebugOnly, ActionTag::Error],
        }
    }

    pub fn has_tag(&self, tag: ActionTag) -> bool {
        self.tags().contains(&tag)
    }

    /// Apply this action's effect to `pawn`.
    ///
    /// Moves are all-or-nothing: the pawn's location changes only after the
    /// destination has resolved, so a failed move leaves it exactly where it
    /// was. Investigate is a hook for richer senses later; today it and rest
    /// both succeed without touching the pawn.
    ///
    /// # Errors
    /// - [`ActionError::InvalidDirection`] if a move names an exit the
    ///   pawn's location doesn't have
    /// - [`ActionError::Simulated`] from [`Action::Malfunction`], always
    pub fn perform(&self, world: &World, pawn: &mut Pawn) -> Result<(), ActionError> {
        match self {
            Action::Move { direction } => {
                let from = pawn.current_location(world);
                match world.resolve_edge(from, direction) {
                    Ok(destination) => {
                        let destination = destination.name().to_string();
                        info!("{} moved {} to '{}'", pawn.name(), direction, destination);
                        pawn.relocate(destination);
                        Ok(())
                    },
                    Err(_) => Err(ActionError::InvalidDirection {
                        from: from.name().to_string(),
                        direction: direction.clone(),
                    }),
                }
            },
            Action::Investigate | Action::Rest => Ok(()),
            Action::Quit => {
                info!("{} is quitting", pawn.name());
                pawn.request_quit();
                Ok(())
            },
            Action::Malfunction => Err(ActionError::Simulated),
        }
    }

    /// Perform the action, absorbing failures that only reflect a bad pick
    /// (a direction that isn't there). Anything else is a real problem and
    /// propagates untouched.
    ///
    /// # Errors
    /// Whatever [`Action::perform`] raised, minus the absorbed
    /// precondition-violation kinds.
    pub fn perform_if_possible(&self, world: &World, pawn: &mut Pawn) -> Result<(), ActionError> {
        match self.perform(world, pawn) {
            Ok(()) => Ok(()),
            Err(absorbed) if absorbed.is_precondition_violation() => {
                info!("{} couldn't '{}': {absorbed}", pawn.name(), self.description());
                Ok(())
            },
            Err(fatal) => Err(fatal),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
