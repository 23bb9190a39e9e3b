//! Board geometry: the edges of the 8x8 box grid

use serde::{Deserialize, Serialize};

/// Boxes per board side (9x9 lattice of dots)
pub const GRID_SIZE: u8 = 8;

/// Distinct edges on an empty board
pub const EDGE_COUNT: usize = 144;

/// One side of a box
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// The same physical edge as seen from the neighboring box
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Scan order when picking the free side of a 3-sided box
pub const SIDE_PRIORITY: [Side; 4] = [Side::Top, Side::Bottom, Side::Left, Side::Right];

/// An edge addressed through one of the boxes it borders.
///
/// Two adjacent boxes share a physical edge: `(r,c,Bottom)` and
/// `(r+1,c,Top)` are the same line, as are `(r,c,Right)` and
/// `(r,c+1,Left)`. [`Edge::canonical`] picks one representative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub row: u8,
    pub col: u8,
    pub side: Side,
}

impl Edge {
    pub fn new(row: u8, col: u8, side: Side) -> Self {
        debug_assert!(row < GRID_SIZE && col < GRID_SIZE);
        Self { row, col, side }
    }

    /// The representative form: Top/Left where a neighbor exists, so each
    /// physical edge has exactly one canonical address. Bottom survives only
    /// on the last row, Right only on the last column.
    pub fn canonical(self) -> Edge {
        match self.side {
            Side::Bottom if self.row + 1 < GRID_SIZE => {
                Edge::new(self.row + 1, self.col, Side::Top)
            }
            Side::Right if self.col + 1 < GRID_SIZE => {
                Edge::new(self.row, self.col + 1, Side::Left)
            }
            _ => self,
        }
    }

    /// The same physical edge addressed through the adjacent box, or `None`
    /// on the board boundary.
    pub fn mirror(self) -> Option<Edge> {
        match self.side {
            Side::Top if self.row > 0 => Some(Edge::new(self.row - 1, self.col, Side::Bottom)),
            Side::Bottom if self.row + 1 < GRID_SIZE => {
                Some(Edge::new(self.row + 1, self.col, Side::Top))
            }
            Side::Left if self.col > 0 => Some(Edge::new(self.row, self.col - 1, Side::Right)),
            Side::Right if self.col + 1 < GRID_SIZE => {
                Some(Edge::new(self.row, self.col + 1, Side::Left))
            }
            _ => None,
        }
    }
}

/// Every edge of an empty board in canonical form, row-major: each box
/// contributes its Top and Left, the last column its Right, the last row
/// its Bottom.
pub fn all_edges() -> Vec<Edge> {
    let mut edges = Vec::with_capacity(EDGE_COUNT);
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            edges.push(Edge::new(row, col, Side::Top));
            edges.push(Edge::new(row, col, Side::Left));
            if col + 1 == GRID_SIZE {
                edges.push(Edge::new(row, col, Side::Right));
            }
            if row + 1 == GRID_SIZE {
                edges.push(Edge::new(row, col, Side::Bottom));
            }
        }
    }
    edges
}
