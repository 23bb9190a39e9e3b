//! dotbox-core - Rules and computer opponent for dots and boxes
//!
//! This crate provides the core game logic for an 8x8 dots-and-boxes board:
//! - Edge geometry and shared-edge identity
//! - Box state and the single edge-application operation
//! - Scoring and game-over detection
//! - The computer opponent's move selection heuristic
//! - Turn orchestration and save-game snapshots

pub mod ai;
pub mod board;
pub mod boxcell;
pub mod grid;
pub mod player;
pub mod session;

// Re-exports for convenient access
pub use ai::MoveSelector;
pub use board::{all_edges, Edge, Side, EDGE_COUNT, GRID_SIZE};
pub use boxcell::{AlreadyDrawn, BoxCell, SideOutcome};
pub use grid::{EdgeOutcome, Grid, TOTAL_BOXES};
pub use player::Player;
pub use session::{GameSession, SavedGame};
