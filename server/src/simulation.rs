//! Concurrent load driver for the game registry
//!
//! Creates a batch of games and plays them to completion from several
//! blocking worker tasks, each owning a slice of the games and submitting
//! random moves for whichever player holds the turn. Rejected moves (a
//! random column that is already full) are counted and retried.

use crate::error::{DropTokenError, ErrorKind};
use crate::registry::GameRegistry;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared::{GameStatus, Move, MoveKind};
use std::sync::Arc;
use tokio::task::JoinSet;

#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    #[error("invalid simulation config: {0}")]
    Config(String),

    #[error("registry error: {0}")]
    Registry(#[from] DropTokenError),

    #[error("worker task failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub games: usize,
    pub workers: usize,
    pub rows: usize,
    pub columns: usize,
    pub seed: u64,
    /// Probability that a turn is spent quitting instead of dropping
    pub quit_chance: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            games: 100,
            workers: 4,
            rows: 6,
            columns: 7,
            seed: 0,
            quit_chance: 0.01,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.workers == 0 {
            return Err(SimulationError::Config("workers must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.quit_chance) {
            return Err(SimulationError::Config(
                "quit_chance must be in [0, 1]".into(),
            ));
        }
        Ok(())
    }
}

/// Outcome totals across all simulated games
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimulationReport {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub quits: usize,
    pub total_moves: usize,
    pub rejected_moves: usize,
}

impl SimulationReport {
    pub fn average_moves_per_game(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.total_moves as f64 / self.games as f64
    }

    fn merge(&mut self, other: SimulationReport) {
        self.games += other.games;
        self.wins += other.wins;
        self.draws += other.draws;
        self.quits += other.quits;
        self.total_moves += other.total_moves;
        self.rejected_moves += other.rejected_moves;
    }
}

/// Creates `config.games` games and plays all of them to completion.
pub async fn run_simulation(
    registry: Arc<GameRegistry>,
    config: SimulationConfig,
) -> Result<SimulationReport, SimulationError> {
    config.validate()?;

    let mut assignments = vec![Vec::new(); config.workers];
    for n in 0..config.games {
        let players = vec![format!("player{}a", n), format!("player{}b", n)];
        let game_id = registry.create_game(config.rows, config.columns, players)?;
        assignments[n % config.workers].push(game_id);
    }
    info!(
        "Simulating {} games on {} workers",
        config.games, config.workers
    );

    let mut workers = JoinSet::new();
    for (worker, game_ids) in assignments.into_iter().enumerate() {
        let registry = Arc::clone(&registry);
        let config = config.clone();
        let seed = config.seed.wrapping_add(worker as u64);

        workers.spawn_blocking(move || play_games(&registry, game_ids, &config, seed));
    }

    let mut report = SimulationReport::default();
    while let Some(result) = workers.join_next().await {
        report.merge(result??);
    }

    info!(
        "Simulation done: {} wins, {} draws, {} quits, {:.1} moves/game",
        report.wins,
        report.draws,
        report.quits,
        report.average_moves_per_game()
    );
    Ok(report)
}

fn play_games(
    registry: &GameRegistry,
    game_ids: Vec<String>,
    config: &SimulationConfig,
    seed: u64,
) -> Result<SimulationReport, DropTokenError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut report = SimulationReport::default();

    for game_id in game_ids {
        loop {
            let (status, player) = registry.with_game(&game_id, |game| {
                (game.status(), game.current_player().to_string())
            })?;
            if status == GameStatus::Done {
                break;
            }

            let mv = if rng.gen_bool(config.quit_chance) {
                Move::quit(player)
            } else {
                Move::token(player, rng.gen_range(0..config.columns))
            };

            match registry.register_move(&game_id, mv) {
                Ok(_) => report.total_moves += 1,
                Err(e) if e.kind() == ErrorKind::IllegalMove => report.rejected_moves += 1,
                Err(e) => return Err(e),
            }
        }

        let (last_kind, has_winner) = registry.with_game(&game_id, |game| {
            (game.moves().last().map(Move::kind), game.winner().is_some())
        })?;
        match (last_kind, has_winner) {
            (Some(MoveKind::Quit), _) => report.quits += 1,
            (_, true) => report.wins += 1,
            (_, false) => report.draws += 1,
        }
        report.games += 1;
        debug!("Simulated {} to completion", game_id);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn run(config: SimulationConfig) -> (Arc<GameRegistry>, SimulationReport) {
        let registry = Arc::new(GameRegistry::new());
        let report =
            tokio_test::block_on(run_simulation(Arc::clone(&registry), config)).unwrap();
        (registry, report)
    }

    #[test]
    fn test_all_games_finish() {
        let config = SimulationConfig {
            games: 12,
            workers: 3,
            ..SimulationConfig::default()
        };
        let (registry, report) = run(config);

        assert_eq!(report.games, 12);
        assert_eq!(report.wins + report.draws + report.quits, 12);
        assert_eq!(registry.active_count(), 0);
        assert_eq!(registry.finished_count(), 12);
    }

    #[test]
    fn test_certain_quit_ends_every_game_on_first_move() {
        let config = SimulationConfig {
            games: 5,
            workers: 2,
            quit_chance: 1.0,
            ..SimulationConfig::default()
        };
        let (_, report) = run(config);

        assert_eq!(report.quits, 5);
        assert_eq!(report.total_moves, 5);
        assert_approx_eq!(report.average_moves_per_game(), 1.0, 1e-9);
    }

    #[test]
    fn test_board_too_small_to_win_always_draws() {
        let config = SimulationConfig {
            games: 4,
            workers: 2,
            rows: 3,
            columns: 1,
            quit_chance: 0.0,
            ..SimulationConfig::default()
        };
        let (_, report) = run(config);

        // A 3x1 board cannot hold four in a row.
        assert_eq!(report.draws, 4);
        assert_eq!(report.total_moves, 12);
        assert_approx_eq!(report.average_moves_per_game(), 3.0, 1e-9);
    }

    #[test]
    fn test_same_seed_same_report() {
        let config = SimulationConfig {
            games: 8,
            workers: 2,
            seed: 7,
            ..SimulationConfig::default()
        };
        let (_, first) = run(config.clone());
        let (_, second) = run(config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let registry = Arc::new(GameRegistry::new());
        let config = SimulationConfig {
            workers: 0,
            ..SimulationConfig::default()
        };
        let result = tokio_test::block_on(run_simulation(registry, config));
        assert!(matches!(result, Err(SimulationError::Config(_))));
    }

    #[test]
    fn test_empty_report_average() {
        assert_approx_eq!(SimulationReport::default().average_moves_per_game(), 0.0, 1e-9);
    }
}
