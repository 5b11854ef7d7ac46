//! Grid coordinates and facing directions.

use serde::{Deserialize, Serialize};

/// A cell on the farm grid, addressed as (row, col).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Position {
    /// Row index, counted from the top
    pub row: usize,
    /// Column index, counted from the left
    pub col: usize,
}

impl Position {
    /// Creates a new position.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Checks whether this position lies inside a grid of the given dimensions.
    #[must_use]
    pub const fn within(self, dimensions: (usize, usize)) -> bool {
        self.row < dimensions.0 && self.col < dimensions.1
    }

    /// Returns the neighbouring position one step in `direction`.
    ///
    /// Returns `None` when the step would leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction, dimensions: (usize, usize)) -> Option<Self> {
        let (dr, dc) = direction.offset();
        let row = self.row.checked_add_signed(dr)?;
        let col = self.col.checked_add_signed(dc)?;
        let next = Self::new(row, col);
        next.within(dimensions).then_some(next)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction the player is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    /// Facing up
    Up,
    /// Facing down (default)
    #[default]
    Down,
    /// Facing left
    Left,
    /// Facing right
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Row/column offset of one step in this direction.
    #[must_use]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Get the display name of this direction.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}
