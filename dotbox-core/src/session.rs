//! Turn orchestration and game snapshots
//!
//! The grid knows the rules of a single edge; whose turn it is, when the
//! computer moves, and how a game is saved all live here.

use crate::ai::MoveSelector;
use crate::board::Edge;
use crate::grid::{EdgeOutcome, Grid};
use crate::player::Player;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One game in progress: the live grid, the player to move, which side (if
/// any) the computer controls, and each player's last move for highlighting.
///
/// Turn rule: a move that completes no box passes the turn; a scoring move
/// keeps it, and the same player moves again.
pub struct GameSession {
    grid: Grid,
    current: Player,
    computer: Option<Player>,
    selector: MoveSelector,
    last_moves: [Option<Edge>; 2],
}

impl GameSession {
    /// Two-human game, Red begins
    pub fn new() -> Self {
        Self {
            grid: Grid::new(),
            current: Player::Red,
            computer: None,
            selector: MoveSelector::new(),
            last_moves: [None; 2],
        }
    }

    /// One-human game. The human takes the other side and moves first.
    pub fn with_computer(computer: Player, seed: u64) -> Self {
        Self {
            grid: Grid::new(),
            current: computer.opponent(),
            computer: Some(computer),
            selector: MoveSelector::with_seed(seed),
            last_moves: [None; 2],
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn computer_side(&self) -> Option<Player> {
        self.computer
    }

    pub fn score(&self, player: Player) -> u32 {
        self.grid.score(player)
    }

    pub fn is_over(&self) -> bool {
        self.grid.is_game_over()
    }

    pub fn last_move(&self, player: Player) -> Option<Edge> {
        self.last_moves[player.index()]
    }

    /// Apply one edge for the player to move. `AlreadyDrawn` changes
    /// nothing, not even whose turn it is.
    pub fn play_edge(&mut self, edge: Edge) -> EdgeOutcome {
        let outcome = self.grid.apply_edge(edge, self.current);
        if let EdgeOutcome::Applied { boxes_completed } = outcome {
            self.last_moves[self.current.index()] = Some(edge);
            if boxes_completed == 0 {
                self.current = self.current.opponent();
            }
        }
        outcome
    }

    /// Drive the computer through one logical turn: it keeps moving while
    /// its edges complete boxes, and a non-scoring edge passes the turn and
    /// ends the loop. Returns the moves made, in order.
    pub fn play_computer_turn(&mut self) -> Vec<(Edge, EdgeOutcome)> {
        let computer = self.computer.expect("no computer side configured");
        debug_assert_eq!(self.current, computer, "not the computer's turn");

        let mut moves = Vec::new();
        while self.current == computer && !self.is_over() {
            let edge = self.selector.choose_move(&self.grid, computer);
            let outcome = self.play_edge(edge);
            moves.push((edge, outcome));
        }
        moves
    }

    /// Snapshot for persistence. The grid serializes box state only; its
    /// remaining-edges list is re-derived on restore.
    pub fn snapshot(&self) -> SavedGame {
        SavedGame {
            grid: self.grid.clone(),
            current: self.current,
            computer: self.computer,
            last_moves: self.last_moves,
        }
    }

    /// Rebuild a session from a snapshot. The selector is recreated from
    /// `seed`; its stream is not part of the persisted state.
    pub fn restore(saved: SavedGame, seed: u64) -> Self {
        Self {
            grid: saved.grid,
            current: saved.current,
            computer: saved.computer,
            selector: MoveSelector::with_seed(seed),
            last_moves: saved.last_moves,
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything needed to resume a game: box flags and owners, whose turn it
/// is, which side the computer controls, and the last move per player.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedGame {
    pub grid: Grid,
    pub current: Player,
    pub computer: Option<Player>,
    pub last_moves: [Option<Edge>; 2],
}

impl SavedGame {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read save file {}", path.display()))?;
        let saved = serde_json::from_str(&content)
            .with_context(|| format!("malformed save file {}", path.display()))?;
        Ok(saved)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write save file {}", path.display()))?;
        Ok(())
    }
}
