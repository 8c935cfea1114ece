#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
//! ** Traipse **
//! Strategy-driven text-adventure walker

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::info;

use traipse::strategy::{Interactive, UniformRandom};
use traipse::{Pawn, load_world, repl};

const DEFAULT_WORLD: &str = "worlds/dungeon.toml";

fn main() -> Result<()> {
    env_logger::init();
    let options = Options::parse(env::args().skip(1))?;

    info!("Start: loading world from '{}'...", options.world.display());
    let world = load_world(&options.world).context("while loading the world")?;
    info!("world loaded successfully");

    println!("{:^60}", "TRAIPSE".bright_yellow().underline());

    if let Some(turns) = options.auto {
        let mut pawn = Pawn::new(
            "The Wanderer",
            world.start(),
            Box::new(UniformRandom::from_entropy()),
        );
        repl::simulate(&world, &mut pawn, turns)
    } else {
        let mut pawn = Pawn::new("You", world.start(), Box::new(Interactive::new()));
        pawn.set_debug_mode(options.debug);
        repl::run(&world, &mut pawn)
    }
}

/// Runtime options: `traipse [WORLD_FILE] [--debug] [--auto TURNS]`
struct Options {
    world: PathBuf,
    debug: bool,
    auto: Option<usize>,
}

impl Options {
    fn parse(args: impl Iterator<Item = String>) -> Result<Options> {
        let mut options = Options {
            world: PathBuf::from(DEFAULT_WORLD),
            debug: false,
            auto: None,
        };
        let mut args = args;
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--debug" => options.debug = true,
                "--auto" => {
                    let turns = args.next().context("--auto needs a turn count")?;
                    options.auto =
                        Some(turns.parse().context("--auto turn count must be a number")?);
                },
                other if !other.starts_with('-') => options.world = PathBuf::from(other),
                other => bail!("unrecognized option '{other}'"),
            }
        }
        Ok(options)
    }
}
