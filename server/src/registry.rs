//! Process-wide catalog of drop-token games
//!
//! This module owns every game created during the process lifetime:
//! - Identifier allocation for new games
//! - Partitioning into active and finished games
//! - Per-game serialization of move submission
//! - Read-only views of game state and move history
//!
//! Games never leave the registry. Once a game finishes it moves from the
//! active partition to the finished one, where it stays available for
//! history queries.

use crate::config::RegistryConfig;
use crate::error::{DropTokenError, Result};
use crate::game::{validate_setup, Game};
use log::{debug, info};
use parking_lot::{Mutex, RwLock};
use shared::{GameStateView, Move};
use std::collections::HashMap;
use std::sync::Arc;

/// Shared handle to one game; the mutex serializes moves against it.
type GameHandle = Arc<Mutex<Game>>;

/// Both partitions live under one lock so that a game is always in exactly
/// one of them, including while it migrates.
#[derive(Default)]
struct Partitions {
    active: HashMap<String, GameHandle>,
    finished: HashMap<String, GameHandle>,
}

impl Partitions {
    fn get(&self, game_id: &str) -> Option<GameHandle> {
        self.active
            .get(game_id)
            .or_else(|| self.finished.get(game_id))
            .cloned()
    }

    fn contains(&self, game_id: &str) -> bool {
        self.active.contains_key(game_id) || self.finished.contains_key(game_id)
    }

    fn len(&self) -> usize {
        self.active.len() + self.finished.len()
    }
}

/// Catalog of all games in the process.
///
/// The registry is the only component touched concurrently. Two kinds of
/// lock are involved:
/// - the partition lock, held briefly to allocate identifiers, look games
///   up, and migrate finished games
/// - one mutex per game, held for the full validate-then-apply of a move
///
/// A game's mutex may be held while taking the partition lock, never the
/// other way around, so moves against different games never contend beyond
/// the short partition lookups.
pub struct GameRegistry {
    config: RegistryConfig,
    partitions: RwLock<Partitions>,
}

impl GameRegistry {
    /// Creates an empty registry with default settings
    pub fn new() -> Self {
        Self {
            config: RegistryConfig::default(),
            partitions: RwLock::new(Partitions::default()),
        }
    }

    /// Creates an empty registry after validating `config`
    pub fn with_config(config: RegistryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            partitions: RwLock::new(Partitions::default()),
        })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Creates a game and stores it as active, returning its identifier
    ///
    /// Arguments are validated before the partition lock is taken. The
    /// identifier is the configured prefix followed by the first counter
    /// value, starting from the total number of games, that is not already
    /// in use by an active or finished game.
    pub fn create_game(&self, rows: usize, columns: usize, players: Vec<String>) -> Result<String> {
        let win_length = self.config.win_length;
        validate_setup(rows, columns, &players, win_length)?;

        // Id allocation and insertion happen under one write lock
        let mut partitions = self.partitions.write();
        let game_id = self.unused_id(&partitions);
        let game = Game::new(game_id.clone(), rows, columns, players, win_length)?;

        info!(
            "Created game {} ({}x{}) for {} vs {}",
            game_id,
            rows,
            columns,
            game.players()[0],
            game.players()[1]
        );
        partitions
            .active
            .insert(game_id.clone(), Arc::new(Mutex::new(game)));

        Ok(game_id)
    }

    fn unused_id(&self, partitions: &Partitions) -> String {
        let mut counter = partitions.len();
        loop {
            let candidate = format!("{}{}", self.config.id_prefix, counter);
            if !partitions.contains(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Identifiers of games still in progress
    pub fn game_ids(&self) -> Vec<String> {
        self.partitions.read().active.keys().cloned().collect()
    }

    /// Identifiers of games that have finished
    pub fn finished_game_ids(&self) -> Vec<String> {
        self.partitions.read().finished.keys().cloned().collect()
    }

    pub fn active_count(&self) -> usize {
        self.partitions.read().active.len()
    }

    pub fn finished_count(&self) -> usize {
        self.partitions.read().finished.len()
    }

    fn lookup(&self, game_id: &str) -> Result<GameHandle> {
        self.partitions
            .read()
            .get(game_id)
            .ok_or_else(|| DropTokenError::GameNotFound(game_id.to_string()))
    }

    /// Runs `f` against the game with the given identifier, in either partition
    ///
    /// The game is locked for the duration of `f`, so it observes a state
    /// no concurrent move can interleave with.
    pub fn with_game<R>(&self, game_id: &str, f: impl FnOnce(&Game) -> R) -> Result<R> {
        let handle = self.lookup(game_id)?;
        let game = handle.lock();
        Ok(f(&*game))
    }

    /// Players, status and (once done) winner of a game
    pub fn get_game_state(&self, game_id: &str) -> Result<GameStateView> {
        self.with_game(game_id, Game::state_view)
    }

    /// Moves from `start` to `end` inclusive, both 0-based
    ///
    /// `start` defaults to the first move and `end` to the last. A game with
    /// no moves yet yields [`DropTokenError::MovesNotFound`] rather than an
    /// empty list. Each supplied bound must be a valid move index, and `end`
    /// may not precede `start`.
    pub fn get_game_moves(
        &self,
        game_id: &str,
        start: Option<usize>,
        end: Option<usize>,
    ) -> Result<Vec<Move>> {
        self.with_game(game_id, |game| {
            let moves = game.moves();
            if moves.is_empty() {
                return Err(DropTokenError::MovesNotFound(game_id.to_string()));
            }

            let len = moves.len();
            let start = match start {
                Some(index) if index >= len => {
                    return Err(DropTokenError::MoveOutOfRange { index, len })
                }
                Some(index) => index,
                None => 0,
            };
            let end = match end {
                Some(index) if index >= len => {
                    return Err(DropTokenError::MoveOutOfRange { index, len })
                }
                Some(index) if index < start => {
                    return Err(DropTokenError::invalid_argument(format!(
                        "end index {} must not be before start index {}",
                        index, start
                    )))
                }
                Some(index) => index,
                None => len - 1,
            };

            Ok(moves[start..=end].to_vec())
        })?
    }

    /// The single move at `index`
    pub fn get_game_move(&self, game_id: &str, index: usize) -> Result<Move> {
        self.with_game(game_id, |game| {
            game.moves()
                .get(index)
                .cloned()
                .ok_or(DropTokenError::MoveOutOfRange {
                    index,
                    len: game.move_count(),
                })
        })?
    }

    /// Submits a move, returning its index in the game's move log
    ///
    /// Moves against the same game are serialized by that game's lock;
    /// moves against different games proceed independently. A game that
    /// finishes is migrated to the finished partition before its lock is
    /// released.
    pub fn register_move(&self, game_id: &str, mv: Move) -> Result<usize> {
        // Resolve the handle first so the partition lock is released
        // before the game lock is taken
        let handle = self.lookup(game_id)?;
        let mut game = handle.lock();

        // Validate and apply
        let player = mv.player().to_string();
        let index = game
            .perform_move(mv)
            .inspect_err(|e| debug!("Rejected move by {} in {}: {}", player, game_id, e))?;
        debug!("Game {}: move {} by {}", game_id, index, player);

        // Migrate while still holding the game lock
        if game.is_done() {
            let mut partitions = self.partitions.write();
            if let Some(finished) = partitions.active.remove(game_id) {
                partitions.finished.insert(game_id.to_string(), finished);
                info!(
                    "Game {} finished after {} moves, winner: {}",
                    game_id,
                    game.move_count(),
                    game.winner().unwrap_or("none")
                );
            }
        }

        Ok(index)
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
