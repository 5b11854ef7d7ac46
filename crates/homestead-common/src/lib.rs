//! # Homestead Common
//!
//! Common types shared by the Homestead crates:
//! - Grid coordinates and facing directions
//! - Error types for map loading and position checks
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_inside_grid() {
        let pos = Position::new(1, 1);
        assert_eq!(pos.step(Direction::Up, (3, 3)), Some(Position::new(0, 1)));
        assert_eq!(pos.step(Direction::Down, (3, 3)), Some(Position::new(2, 1)));
        assert_eq!(pos.step(Direction::Left, (3, 3)), Some(Position::new(1, 0)));
        assert_eq!(pos.step(Direction::Right, (3, 3)), Some(Position::new(1, 2)));
    }

    #[test]
    fn test_step_off_grid() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::Up, (3, 3)), None);
        assert_eq!(origin.step(Direction::Left, (3, 3)), None);

        let corner = Position::new(2, 2);
        assert_eq!(corner.step(Direction::Down, (3, 3)), None);
        assert_eq!(corner.step(Direction::Right, (3, 3)), None);
    }

    #[test]
    fn test_within() {
        assert!(Position::new(0, 0).within((1, 1)));
        assert!(!Position::new(1, 0).within((1, 1)));
        assert!(!Position::new(0, 0).within((0, 0)));
    }

    #[test]
    fn test_error_display() {
        let err = MapError::OutOfBounds {
            position: Position::new(5, 7),
            rows: 3,
            cols: 4,
        };
        assert_eq!(err.to_string(), "Position (5, 7) is outside the 3x4 map");

        let err: HomesteadError = MapError::format(2, "unknown tile 'X'").into();
        assert_eq!(
            err.to_string(),
            "Map error: Malformed map at line 2: unknown tile 'X'"
        );
    }
}
