//! Level loading
//!
//! Levels are ASCII grids, one character per cell, row 0 at the top:
//!
//! ```text
//! M   man        #   floor      H   stair
//! *   food       o   egg        h   hen
//! .   empty (a space also works)
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::Settings;
use crate::sim::Cell;

/// Errors while loading a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid level data: {0}")]
    InvalidLevelData(String),
}

/// What occupies a level cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellType {
    Man,
    Floor,
    Stair,
    Food,
    Egg,
    Hen,
}

impl CellType {
    /// Map a level character; `None` for empty cells
    pub fn from_char(c: char) -> Result<Option<Self>, char> {
        match c {
            'M' => Ok(Some(CellType::Man)),
            '#' => Ok(Some(CellType::Floor)),
            'H' => Ok(Some(CellType::Stair)),
            '*' => Ok(Some(CellType::Food)),
            'o' => Ok(Some(CellType::Egg)),
            'h' => Ok(Some(CellType::Hen)),
            '.' | ' ' => Ok(None),
            other => Err(other),
        }
    }
}

/// One occupied cell of a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellContent {
    pub kind: CellType,
    pub cell: Cell,
}

/// Parse an ASCII level into its occupied cells
pub fn parse_level(text: &str, settings: &Settings) -> Result<Vec<CellContent>, LevelError> {
    let mut cells = Vec::new();

    for (row, line) in text.lines().enumerate() {
        for (col, c) in line.trim_end().chars().enumerate() {
            let kind = CellType::from_char(c).map_err(|bad| {
                LevelError::InvalidLevelData(format!(
                    "unknown cell '{bad}' at column {col}, row {row}"
                ))
            })?;
            let Some(kind) = kind else { continue };

            let cell = Cell::new(col as i32, row as i32);
            if !cell.in_grid(settings) {
                return Err(LevelError::InvalidLevelData(format!(
                    "{kind:?} at column {col}, row {row} is outside the {}x{} grid",
                    settings.grid_width, settings.grid_height
                )));
            }
            cells.push(CellContent { kind, cell });
        }
    }

    Ok(cells)
}

/// Read and parse a level file
pub fn load_level(path: impl AsRef<Path>, settings: &Settings) -> Result<Vec<CellContent>, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let cells = parse_level(&text, settings)?;
    log::info!("Loaded level {} ({} cells)", path.display(), cells.len());
    Ok(cells)
}
