//! dotbox CLI - dots and boxes at the terminal
//!
//! Commands:
//! - play: interactive game against the computer (or another human)
//! - selfplay: seeded computer-vs-computer matches

mod play;
mod selfplay;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dotbox")]
#[command(about = "Dots and boxes on an 8x8 grid")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game
    Play(play::PlayArgs),
    /// Pit two computer players against each other
    Selfplay(selfplay::SelfplayArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play::run(args),
        Commands::Selfplay(args) => selfplay::run(args),
    }
}
