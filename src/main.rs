mod tui;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tile-games", version, about = "Two small tile games for the terminal")]
struct Cli {
    #[command(subcommand)]
    game: Game,
}

#[derive(Subcommand)]
enum Game {
    /// Sliding picture puzzle
    Slide {
        /// Board rows
        #[arg(long, default_value_t = 5)]
        rows: usize,
        /// Board columns
        #[arg(long, default_value_t = 4)]
        cols: usize,
        /// Scramble difficulty; each level adds ten random moves
        #[arg(long, default_value_t = 3)]
        difficulty: u32,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Character pair-matching memory game
    Memory {
        /// Pairs dealt from the 30-character roster
        #[arg(long, default_value_t = tile_games::memory::DEFAULT_PAIRS)]
        pairs: usize,
        /// Seed for a reproducible deal
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    pretty_env_logger::init();

    match Cli::parse().game {
        Game::Slide {
            rows,
            cols,
            difficulty,
            seed,
        } => tui::run_slide(rows, cols, difficulty, seed),
        Game::Memory { pairs, seed } => tui::run_memory(pairs, seed),
    }
}
