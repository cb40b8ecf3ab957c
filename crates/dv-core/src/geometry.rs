use std::fmt;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle on the dungeon grid.
///
/// Coordinates are cell units; `y` grows southward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in cells.
    pub w: i32,
    /// Height in cells.
    pub h: i32,
    /// Marks the dungeon's final chamber.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub ending: bool,
    /// Marks a round room.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub rotunda: bool,
}

impl Rect {
    /// Create a plain rectangle with no flags.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            x,
            y,
            w,
            h,
            ending: false,
            rotunda: false,
        }
    }

    /// Returns `true` for a single-cell rectangle.
    pub fn is_unit(&self) -> bool {
        self.w == 1 && self.h == 1
    }

    /// Number of cells covered.
    pub fn area(&self) -> i32 {
        self.w * self.h
    }

    /// Returns `true` if the cell at `(cx, cy)` lies inside the rectangle.
    pub fn contains_cell(&self, cx: i32, cy: i32) -> bool {
        cx >= self.x && cx < self.x + self.w && cy >= self.y && cy < self.y + self.h
    }

    /// Returns `true` if a fractional point lies inside the rectangle.
    pub fn contains_point(&self, p: Point) -> bool {
        p.x >= f64::from(self.x)
            && p.x < f64::from(self.x + self.w)
            && p.y >= f64::from(self.y)
            && p.y < f64::from(self.y + self.h)
    }

    /// The side on which the cell `(cx, cy)` touches this rectangle.
    ///
    /// The cell must sit one step outside an edge and within that edge's
    /// cell range; corners never touch.
    pub fn side_of(&self, cx: i32, cy: i32) -> Option<Direction> {
        let within_x = cx >= self.x && cx < self.x + self.w;
        let within_y = cy >= self.y && cy < self.y + self.h;
        if within_y && cx == self.x - 1 {
            Some(Direction::West)
        } else if within_y && cx == self.x + self.w {
            Some(Direction::East)
        } else if within_x && cy == self.y - 1 {
            Some(Direction::North)
        } else if within_x && cy == self.y + self.h {
            Some(Direction::South)
        } else {
            None
        }
    }
}

/// A fractional position on the grid (note anchors, columns, water cells).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing southward.
    pub y: f64,
}

impl Point {
    /// Create a point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Compass direction of an exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Toward decreasing `y`.
    North,
    /// Toward increasing `x`.
    East,
    /// Toward increasing `y`.
    South,
    /// Toward decreasing `x`.
    West,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Parse a direction from a name or single-letter abbreviation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" | "north" => Some(Self::North),
            "e" | "east" => Some(Self::East),
            "s" | "south" => Some(Self::South),
            "w" | "west" => Some(Self::West),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    /// Unit grid offset `(dx, dy)`.
    pub fn offset(&self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Direction matching a unit offset, if any.
    pub fn from_offset(dx: i32, dy: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == (dx, dy))
    }

    /// The reverse direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
