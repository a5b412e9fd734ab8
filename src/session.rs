//! A single play-through of the sliding puzzle.
//!
//! All game state lives in [`Session`]; there are no ambient globals. The
//! host drives it from one event loop: clicks become [`Session::attempt_move`]
//! calls, the 1 Hz clock becomes [`Session::tick`] calls, and everything the
//! presentation layer needs to know flows out through [`RenderSink`].
//! Restarting means dropping the session and constructing a new one — each
//! session owns exactly one timer, so a stale timer can never keep counting
//! into a fresh game.

use rand::Rng;

use crate::board::{Board, SetupError, Slot};
use crate::effects::{compute_effects, tile_settled, Edges};
use crate::scramble::scramble;

/// Presentation callbacks. The engine hands over identities and flags only;
/// how a tile looks (image crop, glyph, sound) is entirely the sink's
/// business, and the engine never reads anything back.
pub trait RenderSink {
    /// Called after every board mutation, including the initial scramble,
    /// with freshly recomputed edge flags.
    fn board_changed(&mut self, board: &Board, effects: &[Edges]);

    /// The tile that just moved landed in its home slot next to at least one
    /// other home tile.
    fn tile_settled(&mut self, _slot: Slot) {}

    /// Fired exactly once per session, on the transition to solved.
    fn game_won(&mut self, _moves: u32, _elapsed_secs: u32, _score: u32) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Timer {
    Running,
    Stopped,
}

/// Deterministic end-of-game score: linear time and move penalties with a
/// floor of 10.
pub fn compute_score(elapsed_secs: u32, moves: u32) -> u32 {
    let raw = 10_000_i64 - i64::from(elapsed_secs) * 10 - i64::from(moves) * 20;
    raw.max(10) as u32
}

/// One sliding-puzzle game: scrambled board, move counter, elapsed clock.
pub struct Session {
    board: Board,
    moves: u32,
    elapsed_secs: u32,
    timer: Timer,
}

impl Session {
    /// Builds a solved `rows x cols` board, scrambles it with
    /// `difficulty * 10` legal moves, and reports the starting position to
    /// the sink. Counters start at zero with the clock running.
    pub fn new<R: Rng + ?Sized>(
        rows: usize,
        cols: usize,
        difficulty: u32,
        rng: &mut R,
        sink: &mut dyn RenderSink,
    ) -> Result<Self, SetupError> {
        if difficulty == 0 {
            return Err(SetupError::ZeroDifficulty);
        }

        let mut board = Board::solved(rows, cols)?;
        scramble(&mut board, difficulty, rng);
        log::info!(
            "new {}x{} session at difficulty {}",
            rows,
            cols,
            difficulty
        );

        let session = Self {
            board,
            moves: 0,
            elapsed_secs: 0,
            timer: Timer::Running,
        };
        sink.board_changed(&session.board, &compute_effects(&session.board));
        Ok(session)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved()
    }

    /// Advances the clock by one second. The tick source is the host's loop;
    /// the engine never schedules anything. Ticks after the win are ignored.
    pub fn tick(&mut self) {
        if self.timer == Timer::Running {
            self.elapsed_secs += 1;
        }
    }

    /// Tries to slide the tile in `slot` into the empty slot.
    ///
    /// A slot that is out of range, already empty, or not adjacent to the
    /// empty slot is a defined no-op: no mutation, no counter change, no sink
    /// call, `None` returned. On success the two slots swap, the move counter
    /// increments by one, and the sink is told about the new board, the
    /// settled indicator, and (on the solved transition) the final score.
    /// Returns the slot the tile moved into, i.e. the hole's old position.
    pub fn attempt_move(&mut self, slot: Slot, sink: &mut dyn RenderSink) -> Option<Slot> {
        if self.timer == Timer::Stopped {
            return None;
        }
        if slot >= self.board.len() || slot == self.board.empty_slot() {
            return None;
        }
        if !self.board.are_adjacent(slot, self.board.empty_slot()) {
            return None;
        }

        let moved_into = self.board.empty_slot();
        self.board.swap_with_empty(slot);
        self.moves += 1;

        sink.board_changed(&self.board, &compute_effects(&self.board));
        if tile_settled(&self.board, moved_into) {
            sink.tile_settled(moved_into);
        }

        if self.board.is_solved() {
            self.timer = Timer::Stopped;
            let score = compute_score(self.elapsed_secs, self.moves);
            log::info!(
                "solved in {} moves / {}s, score {}",
                self.moves,
                self.elapsed_secs,
                score
            );
            sink.game_won(self.moves, self.elapsed_secs, score);
        }

        Some(moved_into)
    }
}
