use serde::{Deserialize, Serialize};
use std::fmt;

pub const PLAYER_COUNT: usize = 2;
pub const DEFAULT_WIN_LENGTH: usize = 4;
pub const GAME_ID_PREFIX: &str = "Game";

/// A single player action submitted against a game.
///
/// The set of actions is closed: a token drop into a column, or a quit.
/// Both carry the identity of the acting player.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum Move {
    Token { player: String, column: usize },
    Quit { player: String },
}

impl Move {
    pub fn token(player: impl Into<String>, column: usize) -> Self {
        Move::Token {
            player: player.into(),
            column,
        }
    }

    pub fn quit(player: impl Into<String>) -> Self {
        Move::Quit {
            player: player.into(),
        }
    }

    pub fn player(&self) -> &str {
        match self {
            Move::Token { player, .. } | Move::Quit { player } => player,
        }
    }

    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Token { .. } => MoveKind::Move,
            Move::Quit { .. } => MoveKind::Quit,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            Move::Token { column, .. } => Some(*column),
            Move::Quit { .. } => None,
        }
    }

    /// Whether this move may be made while `current_player` holds the turn.
    ///
    /// Token drops belong to the player whose turn it is. Any participant
    /// may quit at any time.
    pub fn is_valid_for(&self, current_player: &str) -> bool {
        match self {
            Move::Token { player, .. } => player == current_player,
            Move::Quit { .. } => true,
        }
    }

    pub fn view(&self) -> MoveView {
        MoveView {
            kind: self.kind(),
            player: self.player().to_string(),
            column: self.column(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoveKind {
    Move,
    Quit,
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveKind::Move => write!(f, "MOVE"),
            MoveKind::Quit => write!(f, "QUIT"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameStatus {
    InProgress,
    Done,
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "IN_PROGRESS"),
            GameStatus::Done => write!(f, "DONE"),
        }
    }
}

/// Read-only snapshot of a game's participants and outcome.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GameStateView {
    pub players: [String; PLAYER_COUNT],
    pub state: GameStatus,
    /// Only present once the game is done and someone won.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<String>,
}

/// Flat rendering of a [`Move`] for callers that address moves by kind.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MoveView {
    #[serde(rename = "type")]
    pub kind: MoveKind,
    pub player: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_move_accessors() {
        let mv = Move::token("alice", 3);
        assert_eq!(mv.player(), "alice");
        assert_eq!(mv.kind(), MoveKind::Move);
        assert_eq!(mv.column(), Some(3));
    }

    #[test]
    fn test_quit_move_accessors() {
        let mv = Move::quit("bob");
        assert_eq!(mv.player(), "bob");
        assert_eq!(mv.kind(), MoveKind::Quit);
        assert_eq!(mv.column(), None);
    }

    #[test]
    fn test_token_move_only_valid_for_mover() {
        let mv = Move::token("alice", 0);
        assert!(mv.is_valid_for("alice"));
        assert!(!mv.is_valid_for("bob"));
    }

    #[test]
    fn test_quit_move_valid_for_anyone() {
        let mv = Move::quit("alice");
        assert!(mv.is_valid_for("alice"));
        assert!(mv.is_valid_for("bob"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(GameStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(GameStatus::Done.to_string(), "DONE");
        assert_eq!(MoveKind::Move.to_string(), "MOVE");
        assert_eq!(MoveKind::Quit.to_string(), "QUIT");
    }

    #[test]
    fn test_move_serialization_bincode() {
        let mv = Move::token("alice", 6);
        let serialized = bincode::serialize(&mv).unwrap();
        let deserialized: Move = bincode::deserialize(&serialized).unwrap();

        match deserialized {
            Move::Token { player, column } => {
                assert_eq!(player, "alice");
                assert_eq!(column, 6);
            }
            _ => panic!("Wrong move type after deserialization"),
        }
    }

    #[test]
    fn test_move_view_omits_column_for_quit() {
        let json = serde_json::to_value(Move::quit("bob").view()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "QUIT", "player": "bob" }));

        let json = serde_json::to_value(Move::token("alice", 2).view()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "MOVE", "player": "alice", "column": 2 })
        );
    }

    #[test]
    fn test_state_view_omits_winner_while_in_progress() {
        let view = GameStateView {
            players: ["alice".to_string(), "bob".to_string()],
            state: GameStatus::InProgress,
            winner: None,
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "players": ["alice", "bob"], "state": "IN_PROGRESS" })
        );

        let parsed: GameStateView = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, view);
    }
}
