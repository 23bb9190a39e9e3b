//! Grid state and the single edge-application operation

use crate::board::{all_edges, Edge, GRID_SIZE};
use crate::boxcell::BoxCell;
use crate::player::Player;
use serde::{Deserialize, Serialize};

const SIZE: usize = GRID_SIZE as usize;

/// Total boxes on the board; the game ends when all are filled
pub const TOTAL_BOXES: u32 = (GRID_SIZE as u32) * (GRID_SIZE as u32);

/// What applying one edge did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was drawn before; nothing changed, not even the remaining list
    AlreadyDrawn,
    /// The edge was drawn. An edge borders at most two boxes, so
    /// `boxes_completed` is 0, 1 or 2.
    Applied { boxes_completed: u8 },
}

impl EdgeOutcome {
    pub fn boxes_completed(self) -> u8 {
        match self {
            EdgeOutcome::Applied { boxes_completed } => boxes_completed,
            EdgeOutcome::AlreadyDrawn => 0,
        }
    }
}

/// The rules authority: the 8x8 array of boxes plus the list of edges not
/// yet drawn, kept in canonical form with one entry per physical edge.
///
/// Mutation happens only through [`Grid::apply_edge`]; `Clone` is a deep
/// value copy, independent of the original, which is what the AI's
/// speculative lookahead relies on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SavedGrid", into = "SavedGrid")]
pub struct Grid {
    boxes: [[BoxCell; SIZE]; SIZE],
    remaining: Vec<Edge>,
}

impl Grid {
    /// Empty board: no sides drawn, all 144 edges available
    pub fn new() -> Self {
        Self {
            boxes: [[BoxCell::new(); SIZE]; SIZE],
            remaining: all_edges(),
        }
    }

    pub fn box_at(&self, row: u8, col: u8) -> &BoxCell {
        &self.boxes[row as usize][col as usize]
    }

    /// Apply one edge for `player`: the sole mutation entry point, used for
    /// human and computer moves alike.
    ///
    /// Marks the side on the primary box, then the same physical edge on the
    /// in-grid neighbor (if any), crediting `player` with every box this
    /// fills, and retires the edge from the remaining list.
    pub fn apply_edge(&mut self, edge: Edge, player: Player) -> EdgeOutcome {
        let mut boxes_completed = 0;

        let primary = &mut self.boxes[edge.row as usize][edge.col as usize];
        match primary.draw_side(edge.side, player) {
            Err(_) => return EdgeOutcome::AlreadyDrawn,
            Ok(outcome) => {
                if outcome.completed {
                    boxes_completed += 1;
                }
            }
        }

        // The neighbor sees the same line from its other side. This is always
        // a fresh mark: shared-edge state never diverges between the two
        // boxes that reference it.
        if let Some(mirror) = edge.mirror() {
            let neighbor = &mut self.boxes[mirror.row as usize][mirror.col as usize];
            let outcome = neighbor
                .draw_side(mirror.side, player)
                .expect("shared edge drawn on one box but not its neighbor");
            if outcome.completed {
                boxes_completed += 1;
            }
        }

        let canonical = edge.canonical();
        let index = self
            .remaining
            .iter()
            .position(|&e| e == canonical)
            .expect("undrawn edge missing from the remaining list");
        self.remaining.remove(index);

        EdgeOutcome::Applied { boxes_completed }
    }

    /// Edges not yet drawn, canonical form, stable enumeration order
    pub fn remaining_edges(&self) -> &[Edge] {
        &self.remaining
    }

    /// Boxes owned by `player`. Recomputed from box owners on demand so the
    /// score has no second source of truth.
    pub fn score(&self, player: Player) -> u32 {
        self.boxes
            .iter()
            .flatten()
            .filter(|cell| cell.owner() == Some(player))
            .count() as u32
    }

    pub fn total_filled(&self) -> u32 {
        self.boxes.iter().flatten().filter(|c| c.is_filled()).count() as u32
    }

    pub fn is_game_over(&self) -> bool {
        self.total_filled() == TOTAL_BOXES
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_remaining(boxes: &[[BoxCell; SIZE]; SIZE]) -> Vec<Edge> {
    all_edges()
        .into_iter()
        .filter(|e| !boxes[e.row as usize][e.col as usize].has_side(e.side))
        .collect()
}

// ============================================================================
// PERSISTENCE
// ============================================================================

/// Wire form of one box: edge flags in Top, Bottom, Left, Right order plus
/// the owner mark.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
struct SavedBox {
    sides: [bool; 4],
    owner: Option<Player>,
}

/// Wire form of the grid. Only box state is persisted; the remaining-edges
/// list is derived state and is rebuilt on restore, never trusted from the
/// wire (a persisted copy could drift out of sync with the flags).
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SavedGrid {
    boxes: [[SavedBox; SIZE]; SIZE],
}

impl From<Grid> for SavedGrid {
    fn from(grid: Grid) -> Self {
        Self {
            boxes: grid.boxes.map(|row| {
                row.map(|cell| SavedBox {
                    sides: cell.side_flags(),
                    owner: cell.owner(),
                })
            }),
        }
    }
}

impl From<SavedGrid> for Grid {
    fn from(saved: SavedGrid) -> Self {
        let boxes = saved
            .boxes
            .map(|row| row.map(|b| BoxCell::from_flags(b.sides, b.owner)));
        let remaining = derive_remaining(&boxes);
        Self { boxes, remaining }
    }
}

// ============================================================================
// TESTS
// ============================================================================
