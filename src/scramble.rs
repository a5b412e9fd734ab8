//! Board scrambling by randomized walk of the empty slot.
//!
//! Every step is a legal move, so every intermediate state (and the final
//! one) stays reachable from the solved board. That makes the result
//! solvable by construction; no inversion-parity check is needed.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Direction, Slot};

/// Scramble steps applied per difficulty level.
pub const MOVES_PER_LEVEL: usize = 10;

/// Walks the empty slot through `difficulty * MOVES_PER_LEVEL` random legal
/// swaps, never immediately undoing the previous swap.
///
/// The slot vacated by the previous step is excluded from the candidate set,
/// so consecutive steps cannot cancel each other out and shrink the
/// effective scramble distance. Note this bounds the move *count*, not the
/// resulting distance from solved; an unlucky walk can still end near the
/// identity, which is accepted behavior.
pub fn scramble<R: Rng + ?Sized>(board: &mut Board, difficulty: u32, rng: &mut R) {
    debug_assert!(board.is_well_formed());

    let steps = difficulty as usize * MOVES_PER_LEVEL;
    let mut last_vacated: Option<Slot> = None;
    for _ in 0..steps {
        last_vacated = Some(scramble_step(board, last_vacated, rng));
    }

    log::debug!(
        "scrambled {}x{} board with {} random moves",
        board.rows(),
        board.cols(),
        steps
    );
}

/// One scramble step. Returns the slot the empty sentinel vacated, which the
/// next step must not move back into.
fn scramble_step<R: Rng + ?Sized>(
    board: &mut Board,
    last_vacated: Option<Slot>,
    rng: &mut R,
) -> Slot {
    let empty = board.empty_slot();
    let neighbors: Vec<Slot> = Direction::ALL
        .iter()
        .filter_map(|&dir| board.neighbor(empty, dir))
        .collect();

    let candidates: Vec<Slot> = neighbors
        .iter()
        .copied()
        .filter(|&slot| Some(slot) != last_vacated)
        .collect();

    // On a >=2x2 grid the exclusion always leaves a candidate; fall back to
    // the full neighborhood rather than stalling if that ever fails to hold.
    let pool = if candidates.is_empty() {
        &neighbors
    } else {
        &candidates
    };
    let target = *pool
        .choose(rng)
        .expect("every slot of a valid grid has at least two neighbors");

    board.swap_with_empty(target);
    empty
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn scramble_preserves_the_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        for (rows, cols) in [(2, 2), (3, 3), (5, 4)] {
            for difficulty in 1..=4 {
                let mut board = Board::solved(rows, cols).unwrap();
                scramble(&mut board, difficulty, &mut rng);

                assert!(board.is_well_formed(), "{}x{} d{}", rows, cols, difficulty);
                let mut sorted: Vec<u8> = board.cells().to_vec();
                sorted.sort_unstable();
                let identity: Vec<u8> = (0..(rows * cols) as u8).collect();
                assert_eq!(sorted, identity);
            }
        }
    }

    #[test]
    fn scramble_keeps_exactly_one_empty_slot() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut board = Board::solved(5, 4).unwrap();
        scramble(&mut board, 3, &mut rng);

        let empties = board
            .cells()
            .iter()
            .filter(|&&tile| tile == board.empty_id())
            .count();
        assert_eq!(empties, 1);
        assert_eq!(board.tile(board.empty_slot()), board.empty_id());
    }

    #[test]
    fn steps_never_undo_the_previous_step() {
        let mut rng = StdRng::seed_from_u64(99);
        for (rows, cols) in [(2, 2), (4, 4), (5, 4)] {
            let mut board = Board::solved(rows, cols).unwrap();
            let mut last_vacated = None;
            for _ in 0..500 {
                let before = board.empty_slot();
                last_vacated = Some(scramble_step(&mut board, last_vacated, &mut rng));
                assert_eq!(last_vacated, Some(before));

                // The very next step may not return the empty slot to where
                // it was before this one.
                let next = scramble_step(&mut board, last_vacated, &mut rng);
                assert_ne!(board.empty_slot(), before);
                last_vacated = Some(next);
            }
        }
    }

    #[test]
    fn single_step_on_2x2_swaps_a_neighbor_of_the_hole() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::solved(2, 2).unwrap();
        scramble_step(&mut board, None, &mut rng);

        // Empty started in slot 3; its only neighbors are slots 1 and 2.
        let cells = board.cells();
        assert!(cells == [0, 3, 2, 1] || cells == [0, 1, 3, 2], "{:?}", cells);
    }

    #[test]
    fn exclusion_forces_the_only_remaining_neighbor() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut board = Board::solved(2, 2).unwrap();
        board.swap_with_empty(1);
        // Hole at 1, neighbors {0, 3}; excluding 3 leaves exactly one choice.
        let vacated = scramble_step(&mut board, Some(3), &mut rng);
        assert_eq!(vacated, 1);
        assert_eq!(board.empty_slot(), 0);
    }
}
