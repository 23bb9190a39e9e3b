//! Selfplay command - seeded computer-vs-computer matches
//!
//! ## Architecture
//!
//! - run() - orchestration
//! - play_match(), report_results() - phases
//! - play_single_game(), compute_match_statistics() - steps
//! - formatting utilities

use anyhow::Result;
use clap::Args;

use dotbox_core::{Grid, MoveSelector, Player, TOTAL_BOXES};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Base RNG seed; omit for a random one
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    red_score: u32,
    blue_score: u32,
    moves: u32,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    red_wins: usize,
    blue_wins: usize,
    draws: usize,
    avg_margin: f32,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run selfplay: play every game, then report
pub fn run(args: SelfplayArgs) -> Result<()> {
    let base_seed = args.seed.unwrap_or_else(rand::random);

    tracing::info!(
        "Starting selfplay: {} games, base seed {}",
        args.games,
        base_seed
    );

    let results = play_match(&args, base_seed);
    report_results(&results, &args);

    Ok(())
}

// ============================================================================
// PHASES
// ============================================================================

fn play_match(args: &SelfplayArgs, base_seed: u64) -> MatchResults {
    let mut games = Vec::with_capacity(args.games);

    for game_num in 0..args.games {
        let offset = 2 * game_num as u64;
        let record = play_single_game(
            game_num + 1,
            base_seed.wrapping_add(offset),
            base_seed.wrapping_add(offset + 1),
        );

        tracing::info!(
            "Game {}: Red {} - Blue {} ({} moves)",
            record.game_number,
            record.red_score,
            record.blue_score,
            record.moves
        );

        games.push(record);
    }

    compute_match_statistics(games)
}

fn report_results(results: &MatchResults, args: &SelfplayArgs) {
    if args.json {
        print_json_results(results);
    } else {
        print_text_results(results);
    }
}

// ============================================================================
// STEPS
// ============================================================================

/// Play one game to the last box, alternating turns under the rule that a
/// scoring move keeps the turn.
fn play_single_game(game_number: usize, red_seed: u64, blue_seed: u64) -> GameRecord {
    let mut grid = Grid::new();
    let mut red = MoveSelector::with_seed(red_seed);
    let mut blue = MoveSelector::with_seed(blue_seed);
    let mut current = Player::Red;
    let mut moves = 0u32;

    while !grid.is_game_over() {
        let selector = match current {
            Player::Red => &mut red,
            Player::Blue => &mut blue,
        };
        let edge = selector.choose_move(&grid, current);
        let outcome = grid.apply_edge(edge, current);
        moves += 1;

        if outcome.boxes_completed() == 0 {
            current = current.opponent();
        }
    }

    GameRecord {
        game_number,
        red_score: grid.score(Player::Red),
        blue_score: grid.score(Player::Blue),
        moves,
    }
}

fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let red_wins = games.iter().filter(|g| g.red_score > g.blue_score).count();
    let blue_wins = games.iter().filter(|g| g.blue_score > g.red_score).count();
    let draws = games.iter().filter(|g| g.red_score == g.blue_score).count();

    let total_margin: u32 = games
        .iter()
        .map(|g| g.red_score.abs_diff(g.blue_score))
        .sum();
    let avg_margin = if games.is_empty() {
        0.0
    } else {
        total_margin as f32 / games.len() as f32
    };

    MatchResults {
        games,
        red_wins,
        blue_wins,
        draws,
        avg_margin,
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Print results as JSON
fn print_json_results(results: &MatchResults) {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        red_score: u32,
        blue_score: u32,
        moves: u32,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        red_wins: usize,
        blue_wins: usize,
        draws: usize,
        avg_margin: f32,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        red_wins: results.red_wins,
        blue_wins: results.blue_wins,
        draws: results.draws,
        avg_margin: results.avg_margin,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                red_score: g.red_score,
                blue_score: g.blue_score,
                moves: g.moves,
            })
            .collect(),
    };

    if let Ok(json) = serde_json::to_string_pretty(&output) {
        println!("{}", json);
    }
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Selfplay Results ===");
    println!("Total games: {}", total);
    println!("Red wins:    {}", results.red_wins);
    println!("Blue wins:   {}", results.blue_wins);
    println!("Draws:       {}", results.draws);
    println!("Avg margin:  {:.1}", results.avg_margin);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: Red {} - Blue {} in {} moves",
            game.game_number, game.red_score, game.blue_score, game.moves
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
