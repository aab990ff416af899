//! Game state and core simulation types
//!
//! A `Game` is an immutable snapshot: the engine builds a fresh one every
//! frame and the previous one stays readable for rendering.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::geometry::{Cell, Direction, Point, Velocity};
use crate::level::{CellContent, CellType, LevelError};
use crate::settings::Settings;

/// A discrete player command for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    WalkLeft,
    WalkRight,
    ClimbUp,
    ClimbDown,
    Jump,
    /// Any other key: halts the man in place
    Stop,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::WalkLeft,
        Action::WalkRight,
        Action::ClimbUp,
        Action::ClimbDown,
        Action::Jump,
        Action::Stop,
    ];
}

/// Outcome of the run so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Playing,
    /// All eggs collected
    Winner,
    /// Countdown ran out
    Timeout,
    /// Caught by a hen
    Loser,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Playing
    }

    /// End-of-game message shown over the arena
    pub fn banner(self) -> Option<&'static str> {
        match self {
            GameState::Playing => None,
            GameState::Winner => Some("YOU WON"),
            GameState::Timeout | GameState::Loser => Some("YOU LOSE"),
        }
    }
}

/// Walk/climb sprite frame (cosmetic)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AnimationPhase {
    #[default]
    Phase1,
    Phase2,
    Phase3,
}

/// What the last accepted action started. Set by `apply_action`,
/// consumed and cleared by the next `step_frame`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pending {
    #[default]
    Idle,
    Moving,
    Jumping,
    Climbing,
}

/// The player character
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Man {
    /// Top-left pixel of the man's base cell
    pub pos: Point,
    pub facing: Direction,
    pub velocity: Velocity,
    /// On a stair, moving along it
    pub climbing: bool,
    pub pending: Pending,
    pub animation: AnimationPhase,
}

impl Man {
    /// A man standing still in `cell`, facing left
    pub fn new(cell: Cell, settings: &Settings) -> Self {
        Self {
            pos: cell.to_point(settings),
            facing: Direction::Left,
            velocity: Velocity::ZERO,
            climbing: false,
            pending: Pending::Idle,
            animation: AnimationPhase::Phase1,
        }
    }

    pub fn cell(&self, settings: &Settings) -> Cell {
        self.pos.to_cell(settings)
    }
}

/// A hen. Touching one ends the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hen {
    pub cell: Cell,
    pub facing: Direction,
    pub velocity: Velocity,
}

impl Hen {
    pub fn new(cell: Cell) -> Self {
        Self {
            cell,
            facing: Direction::Left,
            velocity: Velocity::ZERO,
        }
    }

    /// Hen for the next frame. Hens hold their cell for now.
    pub fn advance(&self) -> Hen {
        self.clone()
    }
}

/// Complete world state for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub man: Man,
    pub floor: BTreeSet<Cell>,
    pub stairs: BTreeSet<Cell>,
    pub food: BTreeSet<Cell>,
    pub eggs: BTreeSet<Cell>,
    pub hens: Vec<Hen>,
    pub score: u32,
    /// Frames left on the countdown
    pub time: i32,
    pub state: GameState,
}

impl Game {
    /// Build the world from loaded level cells.
    ///
    /// Exactly one man is required and every cell must lie inside the grid.
    pub fn from_level(cells: &[CellContent], settings: &Settings) -> Result<Self, LevelError> {
        if let Some(out) = cells.iter().find(|c| !c.cell.in_grid(settings)) {
            return Err(LevelError::InvalidLevelData(format!(
                "{:?} at column {}, row {} is outside the {}x{} grid",
                out.kind, out.cell.col, out.cell.row, settings.grid_width, settings.grid_height
            )));
        }

        let mut men = cells.iter().filter(|c| c.kind == CellType::Man);
        let man_cell = match (men.next(), men.next()) {
            (Some(m), None) => m.cell,
            (None, _) => {
                return Err(LevelError::InvalidLevelData("no man in level".into()));
            }
            (Some(_), Some(_)) => {
                return Err(LevelError::InvalidLevelData(
                    "more than one man in level".into(),
                ));
            }
        };

        let of_type = |kind: CellType| -> BTreeSet<Cell> {
            cells.iter().filter(|c| c.kind == kind).map(|c| c.cell).collect()
        };

        let game = Self {
            man: Man::new(man_cell, settings),
            floor: of_type(CellType::Floor),
            stairs: of_type(CellType::Stair),
            food: of_type(CellType::Food),
            eggs: of_type(CellType::Egg),
            hens: of_type(CellType::Hen).into_iter().map(Hen::new).collect(),
            score: settings.initial_score,
            time: settings.initial_time,
            state: GameState::Playing,
        };
        log::info!(
            "Level built: {} floor, {} stairs, {} food, {} eggs, {} hens",
            game.floor.len(),
            game.stairs.len(),
            game.food.len(),
            game.eggs.len(),
            game.hens.len()
        );
        Ok(game)
    }

    /// Man shares a cell with a hen
    pub fn hen_collision(&self, settings: &Settings) -> bool {
        let cell = self.man.cell(settings);
        self.hens.iter().any(|h| h.cell == cell)
    }

    /// Won, timed out or caught: the man no longer takes commands and the
    /// clock stops
    pub fn is_frozen(&self, settings: &Settings) -> bool {
        self.eggs.is_empty() || self.time == 0 || self.hen_collision(settings)
    }

    /// Game state implied by eggs, clock and hens
    pub fn evaluate_state(&self, settings: &Settings) -> GameState {
        if self.eggs.is_empty() {
            GameState::Winner
        } else if self.time <= 0 {
            GameState::Timeout
        } else if self.hen_collision(settings) {
            GameState::Loser
        } else {
            GameState::Playing
        }
    }
}
