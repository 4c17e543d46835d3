use log::{debug, info, trace};

use super::board::{DropError, CONNECT, COLS};
use super::{Board, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// A placed disc: the cell it landed in and who placed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub row: usize,
    pub col: usize,
    pub player: Player,
}

/// What an accepted move did, so callers can react without re-deriving state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub row: usize,
    pub col: usize,
    pub player: Player,
    pub is_win: bool,
    pub is_draw: bool,
}

impl MoveResult {
    pub fn is_terminal(&self) -> bool {
        self.is_win || self.is_draw
    }
}

/// Why a move was not applied. The engine state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveRejected {
    #[error("game is over")]
    GameOver,

    #[error("column is full")]
    ColumnFull,

    #[error("no such column")]
    InvalidColumn,
}

impl From<DropError> for MoveRejected {
    fn from(err: DropError) -> Self {
        match err {
            DropError::ColumnFull => MoveRejected::ColumnFull,
            DropError::InvalidColumn => MoveRejected::InvalidColumn,
        }
    }
}

/// Why an undo was not applied. The engine state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum UndoRejected {
    #[error("nothing to undo")]
    EmptyHistory,

    #[error("game is over")]
    GameOver,

    #[error("last move does not belong to the previous turn")]
    OutOfTurn,
}

/// Win tally per player, kept across resets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scores {
    red: u32,
    yellow: u32,
}

impl Scores {
    pub fn get(&self, player: Player) -> u32 {
        match player {
            Player::Red => self.red,
            Player::Yellow => self.yellow,
        }
    }

    fn record_win(&mut self, player: Player) {
        match player {
            Player::Red => self.red += 1,
            Player::Yellow => self.yellow += 1,
        }
    }
}

/// Owns the grid, turn, tally and move history of a session.
///
/// Invalid requests (full columns, moves after the game ended, undo with
/// nothing to undo) are rejected without touching any state.
#[derive(Debug, Clone)]
pub struct BoardEngine {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    scores: Scores,
    history: Vec<MoveRecord>,
}

impl BoardEngine {
    /// Empty board, Red to move, scores at zero.
    pub fn new() -> Self {
        BoardEngine {
            board: Board::new(),
            current_player: Player::FIRST,
            outcome: None,
            scores: Scores::default(),
            history: Vec::new(),
        }
    }

    /// Start a new game. Scores carry over; use [`reset_scores`](Self::reset_scores)
    /// to start a new match.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.current_player = Player::FIRST;
        self.outcome = None;
        self.history = Vec::new();
        info!("new game (scores red={} yellow={})", self.scores.red, self.scores.yellow);
    }

    /// Zero both tallies. Leaves the game in progress alone.
    pub fn reset_scores(&mut self) {
        self.scores = Scores::default();
        info!("scores cleared");
    }

    /// Drop the current player's disc into `col`.
    ///
    /// A win ends the game and credits the mover in the same step. A draw
    /// ends the game with no credit. Otherwise the turn passes.
    pub fn apply_move(&mut self, col: usize) -> Result<MoveResult, MoveRejected> {
        if self.outcome.is_some() {
            trace!("move into column {col} rejected: game over");
            return Err(MoveRejected::GameOver);
        }

        let player = self.current_player;
        let row = self
            .board
            .drop_piece(col, player.to_cell())
            .map_err(|e| {
                trace!("move into column {col} rejected: {e:?}");
                MoveRejected::from(e)
            })?;
        self.history.push(MoveRecord { row, col, player });

        let is_win = self.board.check_win(row, col);
        let is_draw = !is_win && self.board.is_full();
        debug!("{player} dropped into column {col}, landed on row {row}");

        if is_win {
            self.outcome = Some(GameOutcome::Winner(player));
            self.scores.record_win(player);
            info!("{player} wins after {} moves", self.history.len());
        } else if is_draw {
            self.outcome = Some(GameOutcome::Draw);
            info!("draw after {} moves", self.history.len());
        } else {
            self.current_player = player.other();
        }

        Ok(MoveResult {
            row,
            col,
            player,
            is_win,
            is_draw,
        })
    }

    /// Take back the most recent move and hand the turn back to its player.
    ///
    /// A finished game must be reset rather than undone.
    pub fn undo(&mut self) -> Result<MoveRecord, UndoRejected> {
        if self.outcome.is_some() {
            return Err(UndoRejected::GameOver);
        }
        let last = self.history.pop().ok_or(UndoRejected::EmptyHistory)?;
        if last.player == self.current_player {
            self.history.push(last);
            trace!("undo rejected: last move was {}'s own", last.player);
            return Err(UndoRejected::OutOfTurn);
        }

        self.board.clear(last.row, last.col);
        self.current_player = last.player;
        self.outcome = None;
        debug!("undid {} at row {} column {}", last.player, last.row, last.col);
        Ok(last)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn is_history_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn last_move(&self) -> Option<MoveRecord> {
        self.history.last().copied()
    }

    /// Whether [`undo`](Self::undo) would currently have anything to do.
    pub fn can_undo(&self) -> bool {
        !self.history.is_empty() && self.outcome.is_none()
    }

    /// Row a disc dropped into `col` would land on; `None` when full.
    pub fn lowest_empty_row(&self, col: usize) -> Option<usize> {
        self.board.lowest_empty_row(col)
    }

    pub fn is_column_full(&self, col: usize) -> bool {
        self.board.is_column_full(col)
    }

    pub fn is_board_full(&self) -> bool {
        self.board.is_full()
    }

    /// Columns that would accept a move right now.
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_game_over() {
            return Vec::new();
        }
        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// The four cells to highlight after a win, found around the winning move.
    pub fn winning_cells(&self) -> Option<[(usize, usize); CONNECT]> {
        match self.outcome {
            Some(GameOutcome::Winner(_)) => {
                let last = self.history.last()?;
                self.board.winning_cells(last.row, last.col)
            }
            _ => None,
        }
    }
}

impl Default for BoardEngine {
    fn default() -> Self {
        Self::new()
    }
}
