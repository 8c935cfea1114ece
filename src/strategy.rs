//! Decision policies that pick one action per turn.
//!
//! Every pawn is bound to exactly one [`SelectActionStrategy`]. The
//! non-interactive policies decide from the action list alone (plus an
//! injected random source); only [`Interactive`] suspends to ask a human.

pub mod interactive;

pub use interactive::Interactive;

use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

use crate::action::{Action, ActionTag};

/// A policy that chooses which of a pawn's legal actions to attempt.
pub trait SelectActionStrategy {
    /// Pick exactly one action from `actions`.
    ///
    /// `actions` is never empty during normal play; implementations fall
    /// back to [`Action::Rest`] rather than panic if it somehow is.
    fn select(&mut self, actor: &str, actions: &[Action]) -> Action;

    /// Whether this policy suspends to ask a human for input.
    fn is_interactive(&self) -> bool {
        false
    }
}

/// Always picks the first legal action.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstAvailable;

impl SelectActionStrategy for FirstAvailable {
    fn select(&mut self, _actor: &str, actions: &[Action]) -> Action {
        actions.first().cloned().unwrap_or(Action::Rest)
    }
}

/// Picks uniformly at random among the legal actions.
///
/// The policy owns its random source instead of reaching for a process-wide
/// one, so a simulation can be replayed from a seed.
#[derive(Debug, Clone)]
pub struct UniformRandom {
    rng: StdRng,
}

impl UniformRandom {
    /// Seeded generator, for reproducible runs.
    pub fn seeded(seed: u64) -> UniformRandom {
        UniformRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from operating-system entropy.
    pub fn from_entropy() -> UniformRandom {
        UniformRandom {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl SelectActionStrategy for UniformRandom {
    fn select(&mut self, _actor: &str, actions: &[Action]) -> Action {
        actions.choose(&mut self.rng).cloned().unwrap_or(Action::Rest)
    }
}

/// Prefers the first action carrying a target tag, in list order.
///
/// Falls back to the first action when nothing matches, so an aggressive
/// pawn with nothing to fight still does something.
#[derive(Debug, Clone, Copy)]
pub struct TagPriority {
    target: ActionTag,
}

impl TagPriority {
    pub fn new(target: ActionTag) -> TagPriority {
        TagPriority { target }
    }

    pub fn target(&self) -> ActionTag {
        self.target
    }
}

impl SelectActionStrategy for TagPriority {
    fn select(&mut self, _actor: &str, actions: &[Action]) -> Action {
        actions
            .iter()
            .find(|action| action.has_tag(self.target))
            .or_else(|| actions.first())
            .cloned()
            .unwrap_or(Action::Rest)
    }
}
