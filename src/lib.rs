//! Egg Run - A grid-based platform arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement physics, collection, game state)
//! - `level`: Level loading from ASCII grids
//! - `settings`: Data-driven game constants

pub mod level;
pub mod settings;
pub mod sim;

pub use level::{CellContent, CellType, LevelError, load_level, parse_level};
pub use settings::{Settings, SettingsError};

/// Sprite and arena defaults
pub mod consts {
    /// Dimensions of the sprites in the image files [pixels in image file]
    pub const SPRITE_WIDTH: i32 = 24;
    pub const SPRITE_HEIGHT: i32 = 16;

    /// Each cell is VIEW_FACTOR x sprite
    pub const VIEW_FACTOR: i32 = 2;
    pub const CELL_WIDTH: i32 = VIEW_FACTOR * SPRITE_WIDTH;
    pub const CELL_HEIGHT: i32 = VIEW_FACTOR * SPRITE_HEIGHT;

    /// Arena grid dimensions (in cells)
    pub const GRID_WIDTH: i32 = 20;
    pub const GRID_HEIGHT: i32 = 24;

    /// Countdown at the start of a level (in frames)
    pub const INITIAL_TIME: i32 = 2666;

    /// Points per collectible
    pub const FOOD_POINTS: u32 = 50;
    pub const EGG_POINTS: u32 = 100;
}
