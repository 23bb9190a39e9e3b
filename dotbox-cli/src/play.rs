//! Play command - interactive game at the terminal
//!
//! The terminal front end stands in for a windowed UI: it renders the board
//! as text, parses typed moves, and drives the session's turn rule. All
//! rules live in dotbox-core.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use dotbox_core::{Edge, EdgeOutcome, GameSession, Grid, Player, SavedGame, Side, GRID_SIZE};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Two humans at one terminal, no computer opponent
    #[arg(long)]
    pub two_player: bool,

    /// Side the computer controls
    #[arg(long, value_enum, default_value = "blue")]
    pub computer: SideArg,

    /// Selector seed, for replayable games
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Resume from a save file
    #[arg(long, value_name = "FILE")]
    pub load: Option<PathBuf>,

    /// Where `save` and `quit` write the game
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum SideArg {
    Red,
    Blue,
}

impl From<SideArg> for Player {
    fn from(side: SideArg) -> Player {
        match side {
            SideArg::Red => Player::Red,
            SideArg::Blue => Player::Blue,
        }
    }
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run an interactive game to completion (or until the player quits)
pub fn run(args: PlayArgs) -> Result<()> {
    let mut session = create_session(&args)?;

    println!("{}", render(session.grid()));
    println!("Moves are `<row> <col> <t|b|l|r>`; `save` and `quit` also work.");

    while !session.is_over() {
        if session.computer_side() == Some(session.current_player()) {
            take_computer_turn(&mut session);
        } else if !take_human_turn(&mut session, &args)? {
            return Ok(());
        }
        println!("{}", render(session.grid()));
        print_scores(&session);
    }

    print_winner(&session);
    Ok(())
}

fn create_session(args: &PlayArgs) -> Result<GameSession> {
    if let Some(path) = &args.load {
        let saved = SavedGame::load(path)?;
        tracing::info!("resumed game from {}", path.display());
        return Ok(GameSession::restore(saved, args.seed));
    }
    if args.two_player {
        Ok(GameSession::new())
    } else {
        Ok(GameSession::with_computer(args.computer.into(), args.seed))
    }
}

// ============================================================================
// TURNS
// ============================================================================

fn take_computer_turn(session: &mut GameSession) {
    for (edge, outcome) in session.play_computer_turn() {
        tracing::info!(
            "computer drew ({}, {}, {:?}), completing {}",
            edge.row,
            edge.col,
            edge.side,
            outcome.boxes_completed()
        );
    }
}

/// One human move. Returns false when the player quit.
fn take_human_turn(session: &mut GameSession, args: &PlayArgs) -> Result<bool> {
    loop {
        print!("{:?} to move> ", session.current_player());
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(false); // EOF
        }

        match line.trim() {
            "" => continue,
            "quit" => {
                save_if_configured(session, args)?;
                return Ok(false);
            }
            "save" => {
                save_if_configured(session, args)?;
                continue;
            }
            input => match parse_move(input) {
                Ok(edge) => {
                    if session.play_edge(edge) == EdgeOutcome::AlreadyDrawn {
                        println!("That edge is already drawn, pick another.");
                        continue;
                    }
                    return Ok(true);
                }
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            },
        }
    }
}

fn save_if_configured(session: &GameSession, args: &PlayArgs) -> Result<()> {
    match &args.save {
        Some(path) => {
            session.snapshot().save(path)?;
            println!("Saved to {}.", path.display());
            Ok(())
        }
        None => {
            println!("No save file configured; pass --save <FILE>.");
            Ok(())
        }
    }
}

// ============================================================================
// INPUT AND RENDERING
// ============================================================================

fn parse_move(input: &str) -> Result<Edge> {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.len() != 3 {
        bail!("expected `<row> <col> <t|b|l|r>`");
    }

    let row: u8 = parts[0].parse().context("row must be a number")?;
    let col: u8 = parts[1].parse().context("column must be a number")?;
    if row >= GRID_SIZE || col >= GRID_SIZE {
        bail!("row and column must be 0..{}", GRID_SIZE - 1);
    }

    let side = match parts[2] {
        "t" | "top" => Side::Top,
        "b" | "bottom" => Side::Bottom,
        "l" | "left" => Side::Left,
        "r" | "right" => Side::Right,
        other => bail!("unknown side `{other}`, use t, b, l or r"),
    };

    Ok(Edge::new(row, col, side))
}

fn owner_char(grid: &Grid, row: u8, col: u8) -> char {
    match grid.box_at(row, col).owner() {
        Some(Player::Red) => 'R',
        Some(Player::Blue) => 'B',
        None => ' ',
    }
}

fn render(grid: &Grid) -> String {
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..GRID_SIZE {
        out.push_str(&format!(" {}  ", col));
    }
    out.push('\n');

    for row in 0..GRID_SIZE {
        // Dots and horizontal edges above this row of boxes
        out.push_str("    ");
        for col in 0..GRID_SIZE {
            out.push('+');
            out.push_str(if grid.box_at(row, col).has_side(Side::Top) {
                "---"
            } else {
                "   "
            });
        }
        out.push_str("+\n");

        // Vertical edges and box owners
        out.push_str(&format!("  {} ", row));
        for col in 0..GRID_SIZE {
            out.push(if grid.box_at(row, col).has_side(Side::Left) {
                '|'
            } else {
                ' '
            });
            out.push(' ');
            out.push(owner_char(grid, row, col));
            out.push(' ');
        }
        out.push(if grid.box_at(row, GRID_SIZE - 1).has_side(Side::Right) {
            '|'
        } else {
            ' '
        });
        out.push('\n');
    }

    // Bottom boundary
    out.push_str("    ");
    for col in 0..GRID_SIZE {
        out.push('+');
        out.push_str(if grid.box_at(GRID_SIZE - 1, col).has_side(Side::Bottom) {
            "---"
        } else {
            "   "
        });
    }
    out.push_str("+\n");

    out
}

fn print_scores(session: &GameSession) {
    println!(
        "Red {} - Blue {}",
        session.score(Player::Red),
        session.score(Player::Blue)
    );
}

fn print_winner(session: &GameSession) {
    let red = session.score(Player::Red);
    let blue = session.score(Player::Blue);
    println!("Final score: Red {} - Blue {}", red, blue);
    if red > blue {
        println!("Red wins!");
    } else if blue > red {
        println!("Blue wins!");
    } else {
        println!("A draw.");
    }
}

// ============================================================================
// TESTS
// ============================================================================
