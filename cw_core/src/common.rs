use getset::CopyGetters;
use serde::{Deserialize, Serialize};

/// Logical board position. Columns grow to the east, rows to the south.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct Coord {
    pub col: u32,
    pub row: u32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { col: 0, row: 0 };

    pub const fn new(col: u32, row: u32) -> Self {
        Coord { col, row }
    }
}

impl From<(u32, u32)> for Coord {
    fn from((col, row): (u32, u32)) -> Self {
        Coord { col, row }
    }
}

/// Size of the logical board, in cells.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BoardDimension {
    pub cols: u32,
    pub rows: u32,
}

impl BoardDimension {
    pub const fn new(cols: u32, rows: u32) -> Self {
        BoardDimension { cols, rows }
    }

    pub fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.col < self.cols && coord.row < self.rows
    }

    pub fn is_degenerate(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Every coordinate on the board, row-major.
    ///
    /// Row-major keeps neighbouring cells adjacent in traversal order, which
    /// is what lets the field batcher merge them.
    pub fn all_coords(&self) -> Vec<Coord> {
        let cols = self.cols;
        (0..self.rows)
            .flat_map(|row| (0..cols).map(move |col| Coord { col, row }))
            .collect()
    }
}

/// Size of the drawing surface, in pixels.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct RasterSize {
    pub width: u32,
    pub height: u32,
}

impl RasterSize {
    pub const fn new(width: u32, height: u32) -> Self {
        RasterSize { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }
}

/// Pixel rectangle on the raster.
#[derive(Clone, Copy, CopyGetters, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[getset(get_copy = "pub")]
pub struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Rect { x, y, w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }
}

/// Palette slot held by a grid cell. Slot 0 is reserved for unclaimed cells,
/// every player is assigned one of the others as their color.
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct OwnerId(pub u8);

impl OwnerId {
    pub const UNCLAIMED: OwnerId = OwnerId(0);

    pub fn is_unclaimed(&self) -> bool {
        *self == Self::UNCLAIMED
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct PlayerId(pub usize);

/// Movement intent for a player.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    None,
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL_DIRECTIONS: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    /// Quarter turn counter-clockwise. A player standing still counts as
    /// facing up.
    pub fn rotate_left(self) -> Direction {
        match self {
            Direction::None | Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    /// Quarter turn clockwise, over `up -> right -> down -> left -> up`.
    pub fn rotate_right(self) -> Direction {
        match self {
            Direction::None | Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn is_horizontal(&self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}
