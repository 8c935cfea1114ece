//! The play loop.
//!
//! Turn after turn: describe where the pawn stands, let its strategy pick
//! an action, resolve it. [`run`] drives an interactively strategized pawn
//! until it quits; [`simulate`] drives any pawn for a fixed number of
//! turns.

use anyhow::{Context, Result};
use colored::Colorize;
use log::info;

use crate::pawn::Pawn;
use crate::style::GameStyle;
use crate::world::World;

/// Drive `pawn` through the world until it quits.
///
/// # Errors
/// Propagates any fatal action failure out of a turn.
pub fn run(world: &World, pawn: &mut Pawn) -> Result<()> {
    let mut turn = 0usize;
    describe(world, pawn);
    while !pawn.quit_requested() {
        turn += 1;
        info!("================> BEGIN TURN {turn} <================");
        let before = pawn.location_name().to_string();
        pawn.take_turn(world)
            .with_context(|| format!("resolving turn {turn}"))?;
        if pawn.location_name() != before {
            describe(world, pawn);
        }
    }
    println!("\n{}", "Thanks for playing!".description_style());
    Ok(())
}

/// Drive `pawn` for a fixed number of turns, reporting where it ends up
/// after each. Meant for non-interactive strategies; stops early if the
/// pawn somehow quits.
///
/// # Errors
/// Propagates any fatal action failure out of a turn.
pub fn simulate(world: &World, pawn: &mut Pawn, turns: usize) -> Result<()> {
    for turn in 1..=turns {
        info!("================> BEGIN TURN {turn} <================");
        pawn.take_turn(world)
            .with_context(|| format!("resolving turn {turn}"))?;
        println!(
            "[{turn:>3}] {} is at {}",
            pawn.name().actor_style(),
            pawn.location_name().location_style()
        );
        if pawn.quit_requested() {
            break;
        }
    }
    Ok(())
}

/// Print the pawn's current location: name, description, and exits.
pub fn describe(world: &World, pawn: &Pawn) {
    let here = pawn.current_location(world);
    println!("\n{}", here.name().location_style().underline());
    if !here.description().is_empty() {
        println!("{}", here.description().description_style());
    }
    for exit in here.exits() {
        println!("  {} {}", "->".dimmed(), exit.direction().exit_style());
    }
}
