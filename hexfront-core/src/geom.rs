//! Directional geometry for the wrapped hex grid
//!
//! Offset coordinates with shifted rows: odd rows sit half a hex to the
//! right, so the displacement table differs between even and odd `y`.
//! The grid is toroidal; every offset wraps modulo the board size.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced at the direction-label boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("must specify a valid direction, got {0:?}")]
    InvalidDirection(String),
}

/// The six hex directions, clockwise from north-east
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    NE,
    E,
    SE,
    SW,
    W,
    NW,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// Stable edge-slot index (0-5)
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn label(self) -> &'static str {
        match self {
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
        }
    }

    /// Parse a direction label, rejecting anything outside the 6-label domain
    pub fn from_label(label: &str) -> Result<Self, BoardError> {
        match label {
            "NE" => Ok(Direction::NE),
            "E" => Ok(Direction::E),
            "SE" => Ok(Direction::SE),
            "SW" => Ok(Direction::SW),
            "W" => Ok(Direction::W),
            "NW" => Ok(Direction::NW),
            other => Err(BoardError::InvalidDirection(other.to_string())),
        }
    }

    /// Involutive pairing: NE-SW, E-W, SE-NW
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }
}

/// Grid coordinate, always in [0, width) x [0, height)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// The neighboring coordinate one step in `dir`, wrapping modulo the
/// board size.
///
/// rem_euclid is required here: a truncating `%` would hand back negative
/// values at the top and left edges and break the wraparound.
pub fn offset(coord: Coord, dir: Direction, width: u16, height: u16) -> Coord {
    let even_row = coord.y % 2 == 0;
    let (dx, dy): (i32, i32) = match (dir, even_row) {
        (Direction::NE, true) => (0, -1),
        (Direction::NE, false) => (1, -1),
        (Direction::E, _) => (1, 0),
        (Direction::SE, true) => (0, 1),
        (Direction::SE, false) => (1, 1),
        (Direction::SW, true) => (-1, 1),
        (Direction::SW, false) => (0, 1),
        (Direction::W, _) => (-1, 0),
        (Direction::NW, true) => (-1, -1),
        (Direction::NW, false) => (0, -1),
    };
    Coord::new(
        (coord.x as i32 + dx).rem_euclid(width as i32) as u16,
        (coord.y as i32 + dy).rem_euclid(height as i32) as u16,
    )
}
