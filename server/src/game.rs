use crate::board::{Board, Cell, DropError};
use crate::error::{DropTokenError, IllegalMoveReason, Result};
use crate::seat::Seat;
use log::debug;
use shared::{GameStateView, GameStatus, Move, PLAYER_COUNT};

/// Largest board, in cells, a game may be created with
pub const MAX_CELLS: usize = 1 << 24;

/// Check the parameters a game is created with, returning the board's cell
/// count.
///
/// Exactly two players, each with a name that is not blank, a board of at
/// least one and at most [`MAX_CELLS`] cells, and a win length of at least
/// one. Player names are not checked against each other.
pub fn validate_setup(
    rows: usize,
    columns: usize,
    players: &[String],
    win_length: usize,
) -> Result<usize> {
    if players.len() != PLAYER_COUNT {
        return Err(DropTokenError::invalid_argument(format!(
            "games must have exactly {} players, got {}",
            PLAYER_COUNT,
            players.len()
        )));
    }

    if let Some(index) = players.iter().position(|p| p.trim().is_empty()) {
        return Err(DropTokenError::invalid_argument(format!(
            "player {} must have a non-empty name",
            index
        )));
    }

    if rows == 0 {
        return Err(DropTokenError::invalid_argument(
            "row count must be greater than 0",
        ));
    }

    if columns == 0 {
        return Err(DropTokenError::invalid_argument(
            "column count must be greater than 0",
        ));
    }

    let cells = rows
        .checked_mul(columns)
        .filter(|&cells| cells <= MAX_CELLS)
        .ok_or_else(|| {
            DropTokenError::invalid_argument(format!(
                "board of {}x{} exceeds {} cells",
                rows, columns, MAX_CELLS
            ))
        })?;

    if win_length == 0 {
        return Err(DropTokenError::invalid_argument(
            "win length must be greater than 0",
        ));
    }

    Ok(cells)
}

/// A single drop-token game between two players.
///
/// The game only changes through [`Game::perform_move`]. Validation always
/// runs before any mutation, so a rejected move leaves the game untouched.
#[derive(Debug, Clone)]
pub struct Game {
    id: String,
    players: [String; PLAYER_COUNT],
    win_length: usize,
    board: Board,
    moves: Vec<Move>,
    /// Every cell, plus one for a closing quit
    max_moves: usize,
    current: Seat,
    status: GameStatus,
    winner: Option<Seat>,
}

impl Game {
    pub fn new(
        id: impl Into<String>,
        rows: usize,
        columns: usize,
        players: Vec<String>,
        win_length: usize,
    ) -> Result<Self> {
        let cells = validate_setup(rows, columns, &players, win_length)?;

        let players: [String; PLAYER_COUNT] = players.try_into().map_err(|p: Vec<String>| {
            DropTokenError::invalid_argument(format!("expected 2 players, got {}", p.len()))
        })?;

        Ok(Game {
            id: id.into(),
            players,
            win_length,
            board: Board::new(rows, columns),
            moves: Vec::new(),
            max_moves: cells + 1,
            current: Seat::First,
            status: GameStatus::InProgress,
            winner: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn players(&self) -> &[String; PLAYER_COUNT] {
        &self.players
    }

    pub fn rows(&self) -> usize {
        self.board.rows()
    }

    pub fn columns(&self) -> usize {
        self.board.columns()
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_done(&self) -> bool {
        self.status == GameStatus::Done
    }

    /// The winning player, if the game is done and was not a draw
    pub fn winner(&self) -> Option<&str> {
        self.winner.map(|seat| self.player(seat))
    }

    /// Player whose turn it is to drop a token
    pub fn current_player(&self) -> &str {
        self.player(self.current)
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Owner of a board cell, `None` for empty or out-of-board positions
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        match self.board.get(row, column)? {
            Cell::Piece(seat) => Some(self.player(seat)),
            Cell::Empty => None,
        }
    }

    pub fn is_valid_player(&self, player: &str) -> bool {
        self.seat_of(player).is_some()
    }

    pub fn state_view(&self) -> GameStateView {
        GameStateView {
            players: self.players.clone(),
            state: self.status,
            winner: match self.status {
                GameStatus::Done => self.winner().map(str::to_string),
                GameStatus::InProgress => None,
            },
        }
    }

    /// Validate and apply a move, returning its 0-based index in the move log.
    pub fn perform_move(&mut self, mv: Move) -> Result<usize> {
        let seat = self
            .seat_of(mv.player())
            .ok_or_else(|| DropTokenError::InvalidPlayer {
                player: mv.player().to_string(),
                game_id: self.id.clone(),
            })?;

        if self.is_done() {
            return Err(self.illegal(IllegalMoveReason::GameDone));
        }

        if !mv.is_valid_for(self.current_player()) {
            return Err(DropTokenError::OutOfTurn {
                player: mv.player().to_string(),
                game_id: self.id.clone(),
            });
        }

        match mv {
            Move::Token { column, .. } => self.place_token(seat, column, mv),
            Move::Quit { .. } => self.quit(seat, mv),
        }
    }

    fn place_token(&mut self, seat: Seat, column: usize, mv: Move) -> Result<usize> {
        if column >= self.board.columns() {
            return Err(self.illegal(IllegalMoveReason::ColumnOutOfRange {
                column,
                columns: self.board.columns(),
            }));
        }
        self.check_move_limit()?;

        let row = self.board.drop_piece(column, seat).map_err(|e| match e {
            DropError::ColumnFull => self.illegal(IllegalMoveReason::ColumnFull { column }),
            DropError::InvalidColumn => self.illegal(IllegalMoveReason::ColumnOutOfRange {
                column,
                columns: self.board.columns(),
            }),
        })?;

        let index = self.moves.len();
        self.moves.push(mv);

        // A line needs win_length pieces of one player, so at least
        // 2 * win_length - 1 drops in total.
        let can_win = self.moves.len() >= self.win_length.saturating_mul(2) - 1;

        if can_win && self.board.has_line_through(row, column, seat, self.win_length) {
            self.status = GameStatus::Done;
            self.winner = Some(seat);
            debug!("Game {}: {} wins at move {}", self.id, self.player(seat), index);
        } else if self.moves.len() == self.board.cell_count() && self.board.is_full() {
            self.status = GameStatus::Done;
            self.winner = None;
            debug!("Game {}: draw after {} moves", self.id, self.moves.len());
        } else {
            self.current = self.current.other();
        }

        Ok(index)
    }

    fn quit(&mut self, seat: Seat, mv: Move) -> Result<usize> {
        self.check_move_limit()?;

        let index = self.moves.len();
        self.moves.push(mv);

        self.status = GameStatus::Done;
        self.winner = Some(seat.other());
        debug!("Game {}: {} quit", self.id, self.player(seat));

        Ok(index)
    }

    /// Column-full rejection makes this unreachable; kept as an invariant guard.
    fn check_move_limit(&self) -> Result<()> {
        if self.moves.len() >= self.max_moves {
            return Err(self.illegal(IllegalMoveReason::MoveLimitExceeded {
                max: self.max_moves,
            }));
        }
        Ok(())
    }

    fn illegal(&self, reason: IllegalMoveReason) -> DropTokenError {
        DropTokenError::IllegalMove {
            game_id: self.id.clone(),
            reason,
        }
    }

    fn player(&self, seat: Seat) -> &str {
        &self.players[seat.index()]
    }

    fn seat_of(&self, player: &str) -> Option<Seat> {
        if self.players[0] == player {
            Some(Seat::First)
        } else if self.players[1] == player {
            Some(Seat::Second)
        } else {
            None
        }
    }
}
