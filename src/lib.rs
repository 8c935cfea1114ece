#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]

pub const TRAIPSE_VERSION: &str = env!("CARGO_PKG_VERSION");

// Core modules
pub mod action;
pub mod console;
pub mod loader;
pub mod pawn;
pub mod repl;
pub mod strategy;
pub mod style;
pub mod world;

// Re-exports for convenience
pub use action::{Action, ActionError, ActionTag};
pub use console::{Console, InputEvent};
pub use loader::load_world;
pub use pawn::Pawn;
pub use strategy::SelectActionStrategy;
pub use world::{ExitRecord, Location, LocationRecord, World, WorldBuildError};
