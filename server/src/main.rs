use clap::Parser;
use log::info;
use server::simulation::{run_simulation, SimulationConfig};
use server::{GameRegistry, RegistryConfig};
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plays random drop-token games concurrently", long_about = None)]
struct Args {
    /// Number of games to create and play
    #[arg(short, long, default_value = "100")]
    games: usize,

    /// Number of blocking worker tasks submitting moves
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Board rows
    #[arg(short, long, default_value = "6")]
    rows: usize,

    /// Board columns
    #[arg(short, long, default_value = "7")]
    columns: usize,

    /// Pieces in a row needed to win
    #[arg(long, default_value = "4")]
    win_length: usize,

    /// Seed for the random move generators
    #[arg(short, long, default_value = "0")]
    seed: u64,

    /// Probability that a turn is spent quitting
    #[arg(short, long, default_value = "0.01")]
    quit_chance: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();

    let registry = Arc::new(GameRegistry::with_config(RegistryConfig {
        win_length: args.win_length,
        ..RegistryConfig::default()
    })?);

    let config = SimulationConfig {
        games: args.games,
        workers: args.workers,
        rows: args.rows,
        columns: args.columns,
        seed: args.seed,
        quit_chance: args.quit_chance,
    };

    info!(
        "Starting simulation: {} games on a {}x{} board",
        config.games, config.rows, config.columns
    );
    let report = run_simulation(Arc::clone(&registry), config).await?;

    println!(
        "{} games: {} wins, {} draws, {} quits",
        report.games, report.wins, report.draws, report.quits
    );
    println!(
        "{} moves accepted ({:.1} per game), {} rejected",
        report.total_moves,
        report.average_moves_per_game(),
        report.rejected_moves
    );
    println!(
        "{} games finished, {} still active",
        registry.finished_count(),
        registry.active_count()
    );

    Ok(())
}
