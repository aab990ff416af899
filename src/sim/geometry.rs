//! Grid and pixel geometry
//!
//! The arena is a grid of cells; the man moves in pixels. Conversions go
//! through the cell size in [`Settings`], never through globals.

use std::ops::Add;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// A grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub const fn new(col: i32, row: i32) -> Self {
        Self { row, col }
    }

    /// Top-left pixel of the cell
    pub fn to_point(self, settings: &Settings) -> Point {
        Point::new(self.col * settings.cell_width, self.row * settings.cell_height)
    }

    /// Neighbouring cell, offset by whole cells
    pub fn offset(self, d_col: i32, d_row: i32) -> Self {
        Self::new(self.col + d_col, self.row + d_row)
    }

    /// The cell directly underneath
    pub fn below(self) -> Self {
        self.offset(0, 1)
    }

    pub fn in_grid(self, settings: &Settings) -> bool {
        (0..settings.grid_width).contains(&self.col) && (0..settings.grid_height).contains(&self.row)
    }
}

/// A pixel position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point(pub IVec2);

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self(IVec2::new(x, y))
    }

    #[inline]
    pub fn x(self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn y(self) -> i32 {
        self.0.y
    }

    /// The cell containing this point (integer division toward zero)
    pub fn to_cell(self, settings: &Settings) -> Cell {
        Cell::new(self.x() / settings.cell_width, self.y() / settings.cell_height)
    }

    /// Clamp into `[0, max_x] x [0, max_y]`
    pub fn limit_to_area(self, max_x: i32, max_y: i32) -> Self {
        Self(self.0.clamp(IVec2::ZERO, IVec2::new(max_x, max_y)))
    }

    /// Sitting exactly on a column boundary
    pub fn column_aligned(self, settings: &Settings) -> bool {
        self.x() % settings.cell_width == 0
    }

    /// Sitting exactly on a row boundary
    pub fn row_aligned(self, settings: &Settings) -> bool {
        self.y() % settings.cell_height == 0
    }
}

impl Add<Velocity> for Point {
    type Output = Point;

    fn add(self, v: Velocity) -> Point {
        Point(self.0 + v.0)
    }
}

/// Pixels per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Velocity(pub IVec2);

impl Velocity {
    pub const ZERO: Velocity = Velocity(IVec2::ZERO);

    pub const fn new(dx: i32, dy: i32) -> Self {
        Self(IVec2::new(dx, dy))
    }

    #[inline]
    pub fn dx(self) -> i32 {
        self.0.x
    }

    #[inline]
    pub fn dy(self) -> i32 {
        self.0.y
    }

    pub fn with_dx(self, dx: i32) -> Self {
        Self::new(dx, self.dy())
    }

    pub fn with_dy(self, dy: i32) -> Self {
        Self::new(self.dx(), dy)
    }

    pub fn is_zero(self) -> bool {
        self.0 == IVec2::ZERO
    }

    /// Zero each component whose axis is already cell-aligned at `pos`
    pub fn stop_if_in_cell(self, pos: Point, settings: &Settings) -> Self {
        Self::new(
            if pos.column_aligned(settings) { 0 } else { self.dx() },
            if pos.row_aligned(settings) { 0 } else { self.dy() },
        )
    }
}

/// Facing / travel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Column step in this direction
    pub fn d_col(self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
            Direction::Up | Direction::Down => 0,
        }
    }

    /// Row step in this direction (rows grow downward)
    pub fn d_row(self) -> i32 {
        match self {
            Direction::Up => -1,
            Direction::Down => 1,
            Direction::Left | Direction::Right => 0,
        }
    }
}
