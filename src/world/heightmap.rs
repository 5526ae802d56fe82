//! Terrain Heightmap
//!
//! Rectangular grid of per-tile height and walkability for one room.
//! Grid indices coincide with world tile coordinates; `left_offset` and
//! `top_offset` are translation constants the rendering layer applies when
//! projecting tiles to the screen, carried here because the room data owns
//! them.
//!
//! Out-of-range queries never fail: callers either get `None`, a blocked
//! sentinel cell, or an index clamped to the grid edge, depending on which
//! accessor they use.

use std::fmt;

/// Walkable grades below this value are passable; 4 and up are blocked.
pub const BLOCKED_GRADE: u8 = 4;

/// One terrain tile: integer height in tile units plus a walkable grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightCell {
    /// Terrain height in tile units.
    pub height: u8,
    /// Walkability grade; `0..=3` walkable, `>= 4` blocked.
    pub grade: u8,
}

impl HeightCell {
    /// Sentinel returned for cells outside the grid: fully blocked, height 0.
    pub const BLOCKED: HeightCell = HeightCell {
        height: 0,
        grade: BLOCKED_GRADE,
    };

    /// Returns true if actors may stand on or cross this tile.
    pub fn is_walkable(&self) -> bool {
        self.grade < BLOCKED_GRADE
    }
}

/// Per-room terrain grid.
///
/// Loaded once per room and read-only during simulation; a room transition
/// replaces the whole map atomically.
#[derive(Debug, Clone, Default)]
pub struct Heightmap {
    width: usize,
    height: usize,
    /// Tile-space X translation applied by the projection layer.
    pub left_offset: i32,
    /// Tile-space Y translation applied by the projection layer.
    pub top_offset: i32,
    cells: Vec<HeightCell>,
}

impl Heightmap {
    /// Builds a heightmap from an already-parsed cell grid (row-major).
    ///
    /// Returns an error when the dimensions are zero or do not match the
    /// cell count.
    pub fn from_cells(
        width: usize,
        height: usize,
        left_offset: i32,
        top_offset: i32,
        cells: Vec<HeightCell>,
    ) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::EmptyGrid { width, height });
        }
        if cells.len() != width * height {
            return Err(HeightmapError::CellCountMismatch {
                expected: width * height,
                actual: cells.len(),
            });
        }
        Ok(Self {
            width,
            height,
            left_offset,
            top_offset,
            cells,
        })
    }

    /// Parses the room-property heightmap text: rows of comma-separated
    /// hex words, one word per tile.
    ///
    /// Each word is at least two hex digits (an optional `0x` prefix is
    /// accepted): digit 0 is the walkable grade, digit 1 is the height.
    /// Trailing digits are status bits this crate ignores. Missing trailing
    /// cells default to blocked, matching the room data the format comes
    /// from; a malformed word is a load error.
    pub fn from_hex_rows(
        width: usize,
        height: usize,
        left_offset: i32,
        top_offset: i32,
        text: &str,
    ) -> Result<Self, HeightmapError> {
        if width == 0 || height == 0 {
            return Err(HeightmapError::EmptyGrid { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for word in text
            .lines()
            .flat_map(|line| line.split(','))
            .map(str::trim)
            .filter(|w| !w.is_empty())
        {
            if cells.len() == width * height {
                break;
            }
            cells.push(parse_cell_word(word, cells.len())?);
        }
        // Short data: pad with blocked cells rather than failing the load.
        cells.resize(width * height, HeightCell::BLOCKED);

        Self::from_cells(width, height, left_offset, top_offset, cells)
    }

    /// Grid width in tiles.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in tiles.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns true if the tile coordinate lies inside the grid.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Cell at a tile coordinate, or `None` outside the grid.
    pub fn cell(&self, x: i32, y: i32) -> Option<&HeightCell> {
        if self.contains(x, y) {
            Some(&self.cells[y as usize * self.width + x as usize])
        } else {
            None
        }
    }

    /// Cell at a tile coordinate, with out-of-range coordinates reported as
    /// the blocked sentinel.
    pub fn cell_or_blocked(&self, x: i32, y: i32) -> HeightCell {
        self.cell(x, y).copied().unwrap_or(HeightCell::BLOCKED)
    }

    /// Cell at a tile coordinate clamped to the valid index range.
    ///
    /// Used by corner sampling: a footprint corner hanging off the map edge
    /// reads the nearest edge cell instead of failing.
    pub fn cell_clamped(&self, x: i32, y: i32) -> HeightCell {
        if self.cells.is_empty() {
            return HeightCell::BLOCKED;
        }
        let cx = (x.max(0) as usize).min(self.width - 1);
        let cy = (y.max(0) as usize).min(self.height - 1);
        self.cells[cy * self.width + cx]
    }

    /// Terrain height in tile units at a clamped tile coordinate.
    pub fn height_at_clamped(&self, x: i32, y: i32) -> f32 {
        self.cell_clamped(x, y).height as f32
    }
}

/// Parses one heightmap word ("0x4000" or "4000" style).
fn parse_cell_word(word: &str, index: usize) -> Result<HeightCell, HeightmapError> {
    let digits = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word);

    let bad = || HeightmapError::BadWord {
        index,
        word: word.to_string(),
    };

    let mut chars = digits.chars();
    let grade_digit = chars.next().ok_or_else(bad)?;
    let height_digit = chars.next().ok_or_else(bad)?;

    let grade = grade_digit.to_digit(16).ok_or_else(bad)? as u8;
    let height = height_digit.to_digit(16).ok_or_else(bad)? as u8;
    // Remaining digits are status bits; validate they are hex, then ignore.
    for c in chars {
        c.to_digit(16).ok_or_else(bad)?;
    }

    Ok(HeightCell { height, grade })
}

/// Errors while building a heightmap from room data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeightmapError {
    /// Width or height was zero.
    EmptyGrid { width: usize, height: usize },
    /// Cell vector does not match the declared dimensions.
    CellCountMismatch { expected: usize, actual: usize },
    /// A heightmap word was not a valid hex cell.
    BadWord { index: usize, word: String },
}

impl fmt::Display for HeightmapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeightmapError::EmptyGrid { width, height } => {
                write!(f, "heightmap dimensions {width}x{height} are empty")
            }
            HeightmapError::CellCountMismatch { expected, actual } => {
                write!(f, "expected {expected} heightmap cells, got {actual}")
            }
            HeightmapError::BadWord { index, word } => {
                write!(f, "malformed heightmap word `{word}` at cell {index}")
            }
        }
    }
}

impl std::error::Error for HeightmapError {}
