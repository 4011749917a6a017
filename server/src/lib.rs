//! # Drop Token Game Core
//!
//! This library provides the authoritative implementation of two-player
//! drop-token games (Connect Four with configurable board size). It validates
//! and applies player moves, detects wins and draws, and keeps every game of
//! the process in a concurrent registry. Transport concerns (routing, JSON,
//! status codes) live outside this crate and call into [`GameRegistry`].
//!
//! ## Core Responsibilities
//!
//! ### Game State Machine
//! Each [`Game`] owns its board, its two players and its move log. A game
//! starts `IN_PROGRESS` and becomes `DONE` on a winning drop, a drop that
//! fills the board, or a quit. Every move is validated in full before any
//! state changes, so a rejected move is never partially applied.
//!
//! ### Game Registry
//! The [`GameRegistry`] creates games, hands out unique identifiers and
//! serializes moves per game:
//! - Moves against the same game never interleave
//! - Moves against different games proceed in parallel
//! - Finished games move to a separate partition and stay queryable
//!
//! ### Typed Outcomes
//! Every failure is a [`DropTokenError`]. [`DropTokenError::kind`] groups the
//! variants into the categories a caller maps to responses: argument, not
//! found, range, invalid player, out of turn and illegal move.
//!
//! ## Module Organization
//!
//! ### Board Module (`board`)
//! Row-major grid with per-column fill counters and the four-direction line
//! scan used for win detection.
//!
//! ### Game Module (`game`)
//! Turn order, move application and win/draw detection.
//!
//! ### Registry Module (`registry`)
//! Identifier allocation, active/finished partitions and per-game locking.
//!
//! ### Simulation Module (`simulation`)
//! Concurrent load driver that plays random games through a registry.
//!
//! ## Usage Example
//!
//! ```rust
//! use server::GameRegistry;
//! use shared::{GameStatus, Move};
//!
//! let registry = GameRegistry::new();
//! let game_id = registry
//!     .create_game(4, 4, vec!["alice".to_string(), "bob".to_string()])
//!     .unwrap();
//!
//! assert_eq!(registry.register_move(&game_id, Move::token("alice", 0)).unwrap(), 0);
//! assert_eq!(registry.register_move(&game_id, Move::quit("alice")).unwrap(), 1);
//!
//! let state = registry.get_game_state(&game_id).unwrap();
//! assert_eq!(state.state, GameStatus::Done);
//! assert_eq!(state.winner.as_deref(), Some("bob"));
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod registry;
pub mod seat;
pub mod simulation;

pub use config::RegistryConfig;
pub use error::{DropTokenError, ErrorKind, IllegalMoveReason, Result};
pub use game::Game;
pub use registry::GameRegistry;
