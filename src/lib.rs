//! Game engines for two small tile games: a sliding picture puzzle and a
//! pair-matching memory game.
//!
//! The library owns rules and state only. Rendering, input decoding, sound,
//! and timing all belong to the host, which talks to the engine through a
//! narrow seam: it feeds slot clicks and 1 Hz ticks in, and receives boards
//! plus derived highlight flags back through [`session::RenderSink`].
//!
//! - [`board`]: slot/identity board model, grid geometry, win detection
//! - [`scramble`]: solvable-by-construction random-walk scrambler
//! - [`effects`]: derived per-slot edge highlights, recomputed per move
//! - [`session`]: one sliding-puzzle play-through (moves, clock, score)
//! - [`memory`]: the pair-matching game
//!
//! # Quick start
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tile_games::{Board, Edges, RenderSink, Session};
//!
//! struct Printer;
//! impl RenderSink for Printer {
//!     fn board_changed(&mut self, board: &Board, _effects: &[Edges]) {
//!         print!("{}", board);
//!     }
//! }
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let mut sink = Printer;
//! let mut session = Session::new(5, 4, 3, &mut rng, &mut sink).unwrap();
//! // Slide the tile left of the hole into it, if there is one.
//! if let Some(slot) = session
//!     .board()
//!     .neighbor(session.board().empty_slot(), tile_games::Direction::Left)
//! {
//!     session.attempt_move(slot, &mut sink);
//! }
//! ```

pub mod board;
pub mod effects;
pub mod memory;
pub mod scramble;
pub mod session;

pub use board::{Board, Direction, SetupError, Slot};
pub use effects::{compute_effects, tile_settled, Edges};
pub use memory::{Card, DeckError, Flip, MemoryGame};
pub use scramble::{scramble, MOVES_PER_LEVEL};
pub use session::{compute_score, RenderSink, Session};
