//! Egg Run entry point
//!
//! Headless runner: loads a level, plays an input tape one frame per
//! character and prints the outcome as JSON.
//!
//! ```text
//! egg-run <level-file> [tape] [--settings <settings.json>]
//! ```
//!
//! Tape characters: `L` `R` walk, `U` `D` climb, `J` jump, `S` stop,
//! `.` no input.

use std::process::ExitCode;

use serde::Serialize;
use thiserror::Error;

use egg_run::sim::{Action, Cell, Game, GameState, tick};
use egg_run::{LevelError, Settings, SettingsError, load_level};

#[derive(Debug, Error)]
enum RunError {
    #[error("usage: egg-run <level-file> [tape] [--settings <settings.json>]")]
    Usage,
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Level(#[from] LevelError),
    #[error("unknown tape input '{0}'")]
    Tape(char),
    #[error("failed to write summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Final report printed to stdout
#[derive(Debug, Serialize)]
struct Summary {
    state: GameState,
    banner: Option<&'static str>,
    score: u32,
    time: i32,
    eggs_left: usize,
    food_left: usize,
    man: Cell,
    frames: u64,
}

struct Args {
    level: String,
    tape: String,
    settings: Option<String>,
}

fn parse_args() -> Result<Args, RunError> {
    let mut positional = Vec::new();
    let mut settings = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--settings" {
            settings = Some(args.next().ok_or(RunError::Usage)?);
        } else {
            positional.push(arg);
        }
    }

    let mut positional = positional.into_iter();
    let level = positional.next().ok_or(RunError::Usage)?;
    let tape = positional.next().unwrap_or_default();
    if positional.next().is_some() {
        return Err(RunError::Usage);
    }
    Ok(Args {
        level,
        tape,
        settings,
    })
}

fn tape_input(c: char) -> Result<Option<Action>, RunError> {
    match c.to_ascii_uppercase() {
        'L' => Ok(Some(Action::WalkLeft)),
        'R' => Ok(Some(Action::WalkRight)),
        'U' => Ok(Some(Action::ClimbUp)),
        'D' => Ok(Some(Action::ClimbDown)),
        'J' => Ok(Some(Action::Jump)),
        'S' => Ok(Some(Action::Stop)),
        '.' => Ok(None),
        _ => Err(RunError::Tape(c)),
    }
}

fn run() -> Result<(), RunError> {
    let args = parse_args()?;

    let settings = match &args.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let cells = load_level(&args.level, &settings)?;
    let mut game = Game::from_level(&cells, &settings)?;

    let inputs = args
        .tape
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(tape_input)
        .collect::<Result<Vec<_>, _>>()?;

    let mut frames: u64 = 0;
    for input in inputs {
        game = tick(&game, input, &settings);
        frames += 1;
    }

    // Let the clock run out the rest of the level
    let cap = frames + settings.initial_time as u64 + 1;
    while !game.state.is_terminal() && frames < cap {
        game = tick(&game, None, &settings);
        frames += 1;
    }
    log::info!("Finished after {frames} frames: {:?}", game.state);

    let summary = Summary {
        state: game.state,
        banner: game.state.banner(),
        score: game.score,
        time: game.time,
        eggs_left: game.eggs.len(),
        food_left: game.food.len(),
        man: game.man.cell(&settings),
        frames,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Egg Run starting...");
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
