//! Typed outcomes returned by the game core.
//!
//! Every error is deterministic: a failed call leaves the registry and the
//! addressed game exactly as they were. [`DropTokenError::kind`] collapses the
//! detailed variants onto the coarse categories a transport layer maps to
//! responses.

/// Why a move was rejected as illegal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMoveReason {
    #[error("game is already done")]
    GameDone,

    #[error("column {column} does not exist (board has {columns} columns)")]
    ColumnOutOfRange { column: usize, columns: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("move log already holds the maximum of {max} moves")]
    MoveLimitExceeded { max: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DropTokenError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("game {0} not found")]
    GameNotFound(String),

    #[error("game {0} has no moves")]
    MovesNotFound(String),

    #[error("move index {index} out of range (game has {len} moves)")]
    MoveOutOfRange { index: usize, len: usize },

    #[error("player {player} is not playing game {game_id}")]
    InvalidPlayer { player: String, game_id: String },

    #[error("game {game_id}: move made out of turn by player {player}")]
    OutOfTurn { player: String, game_id: String },

    #[error("game {game_id}: illegal move: {reason}")]
    IllegalMove {
        game_id: String,
        reason: IllegalMoveReason,
    },
}

/// Coarse error category, one per distinct caller-facing outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Argument,
    NotFound,
    Range,
    InvalidPlayer,
    OutOfTurn,
    IllegalMove,
}

impl DropTokenError {
    pub fn invalid_argument(detail: impl Into<String>) -> Self {
        Self::InvalidArgument(detail.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DropTokenError::InvalidArgument(_) => ErrorKind::Argument,
            DropTokenError::GameNotFound(_) | DropTokenError::MovesNotFound(_) => {
                ErrorKind::NotFound
            }
            DropTokenError::MoveOutOfRange { .. } => ErrorKind::Range,
            DropTokenError::InvalidPlayer { .. } => ErrorKind::InvalidPlayer,
            DropTokenError::OutOfTurn { .. } => ErrorKind::OutOfTurn,
            DropTokenError::IllegalMove { .. } => ErrorKind::IllegalMove,
        }
    }
}

pub type Result<T> = std::result::Result<T, DropTokenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = DropTokenError::IllegalMove {
            game_id: "Game0".to_string(),
            reason: IllegalMoveReason::ColumnFull { column: 2 },
        };
        assert_eq!(err.to_string(), "game Game0: illegal move: column 2 is full");
    }

    #[test]
    fn test_out_of_range_display() {
        let err = DropTokenError::MoveOutOfRange { index: 7, len: 3 };
        assert_eq!(
            err.to_string(),
            "move index 7 out of range (game has 3 moves)"
        );
    }

    #[test]
    fn test_not_found_kinds_collapse() {
        assert_eq!(
            DropTokenError::GameNotFound("Game9".into()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            DropTokenError::MovesNotFound("Game9".into()).kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn test_range_and_argument_kinds_stay_distinct() {
        let range = DropTokenError::MoveOutOfRange { index: 4, len: 2 };
        let argument = DropTokenError::invalid_argument("end before start");
        assert_eq!(range.kind(), ErrorKind::Range);
        assert_eq!(argument.kind(), ErrorKind::Argument);
        assert_ne!(range.kind(), argument.kind());
    }
}
