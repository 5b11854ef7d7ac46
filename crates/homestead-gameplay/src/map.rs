//! Farm map: a rectangular grid of tile kinds.
//!
//! The map is parsed once from a plain-text description, one character per
//! tile and one line per row. After loading only tilling changes it.

use homestead_common::{MapError, MapResult, Position};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Terrain kind of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Grass, never changes
    Grass,
    /// Untilled ground that can be tilled
    Untilled,
    /// Tilled soil, ready for planting
    Soil,
}

impl Tile {
    /// Parses a map character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'G' => Some(Self::Grass),
            'U' => Some(Self::Untilled),
            'S' => Some(Self::Soil),
            _ => None,
        }
    }

    /// Returns the map character for this tile.
    #[must_use]
    pub const fn to_char(self) -> char {
        match self {
            Self::Grass => 'G',
            Self::Untilled => 'U',
            Self::Soil => 'S',
        }
    }
}

/// The farm grid.
///
/// Serialized as its text form and rebuilt through [`Map::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Map {
    /// Tiles in row-major order
    tiles: Vec<Tile>,
    /// Number of rows
    rows: usize,
    /// Number of columns
    cols: usize,
}

impl Map {
    /// Parses a map from its text description.
    ///
    /// Trailing carriage returns and a final newline are tolerated. Empty
    /// input, unknown characters and rows of differing length are rejected.
    pub fn parse(text: &str) -> MapResult<Self> {
        let mut tiles = Vec::new();
        let mut cols = None;
        let mut rows = 0;

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                return Err(MapError::format(line_no, "empty row"));
            }

            let mut width = 0;
            for c in line.chars() {
                let tile = Tile::from_char(c)
                    .ok_or_else(|| MapError::format(line_no, format!("unknown tile '{c}'")))?;
                tiles.push(tile);
                width += 1;
            }

            match cols {
                None => cols = Some(width),
                Some(expected) if expected != width => {
                    return Err(MapError::format(
                        line_no,
                        format!("row has {width} tiles, expected {expected}"),
                    ));
                },
                Some(_) => {},
            }
            rows += 1;
        }

        let cols = cols.ok_or_else(|| MapError::format(0, "map is empty"))?;
        Ok(Self { tiles, rows, cols })
    }

    /// Reads and parses a map file.
    pub fn load<P: AsRef<Path>>(path: P) -> homestead_common::HomesteadResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::parse(&text)?)
    }

    /// Returns (rows, cols).
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the tile at a position.
    pub fn tile_at(&self, position: Position) -> MapResult<Tile> {
        self.index(position).map(|i| self.tiles[i])
    }

    /// Tills an untilled tile into soil.
    ///
    /// Returns whether the tile changed. Grass and soil are left alone.
    pub fn till(&mut self, position: Position) -> MapResult<bool> {
        self.replace(position, Tile::Untilled, Tile::Soil)
    }

    /// Turns soil back into untilled ground.
    ///
    /// Returns whether the tile changed.
    pub fn untill(&mut self, position: Position) -> MapResult<bool> {
        self.replace(position, Tile::Soil, Tile::Untilled)
    }

    /// Checks that a position lies on the map.
    pub fn check_bounds(&self, position: Position) -> MapResult<()> {
        self.index(position).map(|_| ())
    }

    /// Returns the map as text rows, in the same format it was parsed from.
    #[must_use]
    pub fn rows(&self) -> Vec<String> {
        self.tiles
            .chunks(self.cols)
            .map(|row| row.iter().map(|t| t.to_char()).collect())
            .collect()
    }

    fn replace(&mut self, position: Position, from: Tile, to: Tile) -> MapResult<bool> {
        let i = self.index(position)?;
        if self.tiles[i] != from {
            return Ok(false);
        }
        self.tiles[i] = to;
        Ok(true)
    }

    fn index(&self, position: Position) -> MapResult<usize> {
        if !position.within(self.dimensions()) {
            return Err(MapError::OutOfBounds {
                position,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(position.row * self.cols + position.col)
    }
}

impl TryFrom<String> for Map {
    type Error = MapError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Self::parse(&text)
    }
}

impl From<Map> for String {
    fn from(map: Map) -> Self {
        map.rows().join("\n")
    }
}
