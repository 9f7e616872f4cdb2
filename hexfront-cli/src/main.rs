//! HEXFRONT CLI - Generate and inspect wrapped hex boards
//!
//! Commands:
//! - generate: Build a board and print it
//! - demo: Scripted two-player walkthrough on a seeded board

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hexfront_core::{Game, NodeId};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

#[derive(Parser)]
#[command(name = "hexfront")]
#[command(about = "Wrapped hex board generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a board and print it
    Generate {
        #[arg(long, default_value = "12")]
        width: u16,
        #[arg(long, default_value = "12")]
        height: u16,
        /// Seed for deterministic generation; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Dump node snapshots as JSON instead of the ASCII render
        #[arg(long)]
        json: bool,
    },
    /// Scripted two-player walkthrough on a seeded board
    Demo {
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            width,
            height,
            seed,
            json,
        } => generate(width, height, seed, json),
        Commands::Demo { seed } => demo(seed),
    }
}

fn rng_for(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn generate(width: u16, height: u16, seed: Option<u64>, json: bool) -> Result<()> {
    let mut rng = rng_for(seed);
    let game = Game::new(width, height, &mut rng);
    info!(
        width,
        height,
        nodes = game.board.node_count(),
        "board generated"
    );

    if json {
        let views: Vec<_> = game.board.nodes().map(|(_, node)| node.snapshot()).collect();
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print!("{}", game.board.render());
    }
    Ok(())
}

/// Some empty hex adjacent to `node`
fn free_neighbor(game: &Game, node: NodeId) -> Option<NodeId> {
    game.board
        .node(node)
        .neighbors()
        .find(|&id| game.board.node(id).occupant().is_none())
}

fn demo(seed: u64) -> Result<()> {
    let mut rng = rng_for(Some(seed));
    let mut game = Game::new(10, 10, &mut rng);

    let a = game.add_player("A");
    let b = game.add_player("B");
    game.claim_home(0, a);
    game.claim_home(1, b);

    let [home_a, home_b] = game.board.homes();
    let spot_a = free_neighbor(&game, home_a).context("no free hex beside home A")?;
    let spot_b = free_neighbor(&game, home_b).context("no free hex beside home B")?;
    let scout = game.spawn_piece(a, "a1", 2, spot_a);
    game.spawn_piece(b, "b1", 2, spot_b);

    println!("-- initial board --");
    print!("{}", game.board.render());

    let piece = game.piece(scout).context("scout vanished")?;
    let seen = piece.vision(&game.board);
    info!(piece = %piece.label, visible = seen.len(), "scout vision");

    let target = seen
        .iter()
        .copied()
        .find(|&id| id != spot_a && game.board.node(id).occupant().is_none())
        .context("nowhere to move")?;
    if game.try_move_to(scout, target) {
        info!(to = ?game.board.node(target).coord(), "scout moved");
    }

    println!("-- after one move --");
    print!("{}", game.board.render());

    for view in [game.player_view(a), game.player_view(b)] {
        println!("{}", serde_json::to_string(&view)?);
    }
    if let Some(view) = game.piece_view(scout) {
        println!("{}", serde_json::to_string(&view)?);
    }
    Ok(())
}
