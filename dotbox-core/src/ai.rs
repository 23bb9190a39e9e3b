//! Computer opponent: forced completions, then a random safe move, then the
//! least damaging sacrifice

use crate::board::{Edge, GRID_SIZE};
use crate::grid::{EdgeOutcome, Grid};
use crate::player::Player;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;

/// Seed for the default selector
const DEFAULT_SEED: u64 = 42;

// ============================================================================
// MOVE SELECTOR
// ============================================================================

/// Chooses the computer's next edge. Randomness is injected through a
/// seedable RNG so games can be replayed deterministically.
///
/// `choose_move` is read-only and returns exactly one edge per call; the
/// caller applies it through [`Grid::apply_edge`] like any human move, and,
/// because a scoring move keeps the turn, simply asks again while the
/// computer keeps completing boxes.
pub struct MoveSelector {
    rng: ChaCha8Rng,
}

impl MoveSelector {
    pub fn new() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Pick the next edge for `player`. Must not be called once the board
    /// is full; while any edge remains this always returns a legal one.
    ///
    /// Policy, in order:
    /// 1. finish the first box that already has 3 sides drawn;
    /// 2. otherwise draw a random edge that raises no box to 3 sides;
    /// 3. otherwise every edge opens a chain: simulate each one and give
    ///    away the shortest.
    pub fn choose_move(&mut self, grid: &Grid, player: Player) -> Edge {
        debug_assert!(
            !grid.remaining_edges().is_empty(),
            "selector called on a finished game"
        );

        if let Some(edge) = forced_completion(grid) {
            return edge;
        }

        let safe = safe_edges(grid);
        if let Some(&edge) = safe.choose(&mut self.rng) {
            return edge;
        }

        least_damaging_edge(grid, player)
    }
}

impl Default for MoveSelector {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// PHASE 1 - FORCED COMPLETIONS
// ============================================================================

/// First box in row-major order with exactly 3 sides drawn, addressed
/// through its free side. Completing it keeps the turn, so repeated calls
/// harvest a whole chain one box at a time.
fn forced_completion(grid: &Grid) -> Option<Edge> {
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let cell = grid.box_at(row, col);
            if cell.drawn_count() == 3 {
                let side = cell.available_side().expect("3-sided box has a free side");
                return Some(Edge::new(row, col, side));
            }
        }
    }
    None
}

// ============================================================================
// PHASE 2 - SAFE MOVES
// ============================================================================

/// Remaining edges that hand the opponent nothing: every box the edge
/// borders still has fewer than 2 sides drawn. Deliberately one-ply myopic,
/// it does not see chains, only the immediate next box.
fn safe_edges(grid: &Grid) -> Vec<Edge> {
    grid.remaining_edges()
        .iter()
        .copied()
        .filter(|&edge| opens_no_box(grid, edge))
        .collect()
}

fn opens_no_box(grid: &Grid, edge: Edge) -> bool {
    if grid.box_at(edge.row, edge.col).drawn_count() >= 2 {
        return false;
    }
    match edge.mirror() {
        Some(mirror) => grid.box_at(mirror.row, mirror.col).drawn_count() < 2,
        None => true,
    }
}

// ============================================================================
// PHASE 3 - FORCED SACRIFICE
// ============================================================================

/// Every remaining edge opens some box. Simulate each candidate on a deep
/// copy, let the opponent run the resulting chain to exhaustion, and keep
/// the edge that gives away the fewest boxes. Ties go to the first
/// candidate in enumeration order.
fn least_damaging_edge(grid: &Grid, player: Player) -> Edge {
    let mut best: Option<(Edge, u32)> = None;

    for &edge in grid.remaining_edges() {
        let mut lookahead = grid.clone();
        lookahead.apply_edge(edge, player);
        let opponent_gain = run_cascade(&mut lookahead, player.opponent());

        match best {
            Some((_, fewest)) if opponent_gain >= fewest => {}
            _ => best = Some((edge, opponent_gain)),
        }
    }

    best.expect("no remaining edges to evaluate").0
}

/// Greedily complete 3-sided boxes for `player` until none remain,
/// returning how many boxes were taken. Completing a box can raise its
/// neighbor to 3 sides, so newly reachable boxes join a work-list and the
/// chain is followed to exhaustion rather than for a fixed pass count.
fn run_cascade(grid: &mut Grid, player: Player) -> u32 {
    let mut pending = VecDeque::new();
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            if grid.box_at(row, col).drawn_count() == 3 {
                pending.push_back((row, col));
            }
        }
    }

    let mut taken = 0;
    while let Some((row, col)) = pending.pop_front() {
        // A shared edge may have filled this box in the meantime
        if grid.box_at(row, col).drawn_count() != 3 {
            continue;
        }
        let side = grid
            .box_at(row, col)
            .available_side()
            .expect("3-sided box has a free side");
        let edge = Edge::new(row, col, side);

        if let EdgeOutcome::Applied { boxes_completed } = grid.apply_edge(edge, player) {
            taken += boxes_completed as u32;
        }

        if let Some(mirror) = edge.mirror() {
            if grid.box_at(mirror.row, mirror.col).drawn_count() == 3 {
                pending.push_back((mirror.row, mirror.col));
            }
        }
    }

    taken
}

// ============================================================================
// TESTS
// ============================================================================
