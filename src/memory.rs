//! Pair-matching memory game.
//!
//! A deck of character pairs is dealt face down; the player turns up two
//! cards per move and keeps them when they match. The engine holds pure
//! state — which character is where, what is face up, what is matched — and
//! leaves card artwork and reveal delays to the presentation layer. Where
//! the original flow would sleep before hiding a mismatched pair, this
//! engine instead parks the pair as *pending* and waits for an explicit
//! [`MemoryGame::resolve`] call, so it never blocks the event loop.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

/// Distinct characters available to build decks from.
pub const ROSTER_SIZE: usize = 30;

/// Pairs dealt into a standard game.
pub const DEFAULT_PAIRS: usize = 10;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    #[error("pair count must be between 1 and {ROSTER_SIZE}, got {0}")]
    InvalidPairCount(usize),
}

/// One card of the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Card {
    character: u8,
    face_up: bool,
    matched: bool,
}

impl Card {
    /// Character identity, an index into the roster.
    pub fn character(&self) -> u8 {
        self.character
    }

    pub fn is_face_up(&self) -> bool {
        self.face_up
    }

    pub fn is_matched(&self) -> bool {
        self.matched
    }
}

/// Outcome of a [`MemoryGame::flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flip {
    /// Matched card, card already face up, or a third card while a pair is
    /// pending: nothing changed.
    Ignored,
    /// First card of a move turned face up.
    FaceUp,
    /// Second card turned up; the pair is now pending. Display it, then call
    /// [`MemoryGame::resolve`].
    Pair { matched: bool },
}

pub struct MemoryGame {
    cards: Vec<Card>,
    face_up: Vec<usize>,
    moves: u32,
    matches: u32,
    pairs: usize,
    elapsed_secs: u32,
    started: bool,
    finished: bool,
}

impl MemoryGame {
    /// Deals a new shuffled deck: `pairs` distinct characters chosen from the
    /// roster at random, two cards each.
    pub fn new<R: Rng + ?Sized>(pairs: usize, rng: &mut R) -> Result<Self, DeckError> {
        if pairs == 0 || pairs > ROSTER_SIZE {
            return Err(DeckError::InvalidPairCount(pairs));
        }

        let roster: Vec<u8> = (0..ROSTER_SIZE as u8).collect();
        let mut cards: Vec<Card> = roster
            .choose_multiple(rng, pairs)
            .flat_map(|&character| {
                let card = Card {
                    character,
                    face_up: false,
                    matched: false,
                };
                [card, card]
            })
            .collect();
        cards.shuffle(rng);

        log::info!("dealt memory deck with {} pairs", pairs);
        Ok(Self {
            cards,
            face_up: Vec::with_capacity(2),
            moves: 0,
            matches: 0,
            pairs,
            elapsed_secs: 0,
            started: false,
            finished: false,
        })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn pairs(&self) -> usize {
        self.pairs
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn matches(&self) -> u32 {
        self.matches
    }

    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn is_won(&self) -> bool {
        self.finished
    }

    /// The pair waiting for [`MemoryGame::resolve`], if any.
    pub fn pending_pair(&self) -> Option<(usize, usize)> {
        match self.face_up[..] {
            [a, b] => Some((a, b)),
            _ => None,
        }
    }

    /// Advances the clock by one second. The clock only runs between the
    /// first flip and the final match.
    pub fn tick(&mut self) {
        if self.started && !self.finished {
            self.elapsed_secs += 1;
        }
    }

    /// Turns the card at `index` face up.
    ///
    /// Flips of matched cards, already-up cards, out-of-range indices, or any
    /// card while a pair is pending are silently ignored. The first flip of
    /// the game starts the clock; the second card of each move increments the
    /// move counter by exactly one.
    pub fn flip(&mut self, index: usize) -> Flip {
        if self.finished || index >= self.cards.len() || self.face_up.len() == 2 {
            return Flip::Ignored;
        }
        if self.cards[index].matched || self.cards[index].face_up {
            return Flip::Ignored;
        }

        self.started = true;
        self.cards[index].face_up = true;
        self.face_up.push(index);

        match self.face_up[..] {
            [first, second] => {
                self.moves += 1;
                Flip::Pair {
                    matched: self.cards[first].character == self.cards[second].character,
                }
            }
            _ => Flip::FaceUp,
        }
    }

    /// Settles the pending pair: a match is locked in, a mismatch goes back
    /// face down. Returns true once all pairs are matched, which also stops
    /// the clock. Without a pending pair this is a no-op.
    pub fn resolve(&mut self) -> bool {
        if let [first, second] = self.face_up[..] {
            if self.cards[first].character == self.cards[second].character {
                self.cards[first].matched = true;
                self.cards[second].matched = true;
                self.matches += 1;
                if self.matches as usize == self.pairs {
                    self.finished = true;
                    log::info!(
                        "memory game won in {} moves / {}s",
                        self.moves,
                        self.elapsed_secs
                    );
                }
            } else {
                self.cards[first].face_up = false;
                self.cards[second].face_up = false;
            }
            self.face_up.clear();
        }
        self.finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn deck(seed: u64, pairs: usize) -> MemoryGame {
        let mut rng = StdRng::seed_from_u64(seed);
        MemoryGame::new(pairs, &mut rng).unwrap()
    }

    fn find_pair(game: &MemoryGame) -> (usize, usize) {
        let cards = game.cards();
        for i in 0..cards.len() {
            for j in i + 1..cards.len() {
                if cards[i].character() == cards[j].character() {
                    return (i, j);
                }
            }
        }
        unreachable!("every character appears twice");
    }

    fn find_mismatch(game: &MemoryGame) -> (usize, usize) {
        let cards = game.cards();
        for i in 0..cards.len() {
            for j in i + 1..cards.len() {
                if cards[i].character() != cards[j].character() {
                    return (i, j);
                }
            }
        }
        unreachable!("a deck with two or more pairs holds distinct characters");
    }

    #[test]
    fn deck_holds_each_chosen_character_twice() {
        let game = deck(1, DEFAULT_PAIRS);
        assert_eq!(game.cards().len(), 2 * DEFAULT_PAIRS);

        let mut counts = [0usize; ROSTER_SIZE];
        for card in game.cards() {
            counts[card.character() as usize] += 1;
        }
        assert_eq!(counts.iter().filter(|&&c| c == 2).count(), DEFAULT_PAIRS);
        assert_eq!(counts.iter().filter(|&&c| c == 0).count(), ROSTER_SIZE - DEFAULT_PAIRS);
    }

    #[test]
    fn pair_counts_outside_the_roster_are_rejected() {
        let mut rng = StdRng::seed_from_u64(2);
        assert_eq!(
            MemoryGame::new(0, &mut rng).err(),
            Some(DeckError::InvalidPairCount(0))
        );
        assert_eq!(
            MemoryGame::new(ROSTER_SIZE + 1, &mut rng).err(),
            Some(DeckError::InvalidPairCount(ROSTER_SIZE + 1))
        );
        assert!(MemoryGame::new(ROSTER_SIZE, &mut rng).is_ok());
    }

    #[test]
    fn matching_pair_stays_up_and_counts() {
        let mut game = deck(3, 4);
        let (a, b) = find_pair(&game);

        assert_eq!(game.flip(a), Flip::FaceUp);
        assert_eq!(game.flip(b), Flip::Pair { matched: true });
        assert_eq!(game.moves(), 1);

        game.resolve();
        assert!(game.cards()[a].is_matched());
        assert!(game.cards()[b].is_matched());
        assert_eq!(game.matches(), 1);
        assert!(!game.is_won());
    }

    #[test]
    fn mismatched_pair_goes_back_face_down() {
        let mut game = deck(4, 4);
        let (a, b) = find_mismatch(&game);

        game.flip(a);
        assert_eq!(game.flip(b), Flip::Pair { matched: false });
        assert_eq!(game.pending_pair(), Some((a, b)));

        game.resolve();
        assert!(!game.cards()[a].is_face_up());
        assert!(!game.cards()[b].is_face_up());
        assert_eq!(game.moves(), 1);
        assert_eq!(game.matches(), 0);
    }

    #[test]
    fn third_flip_and_repeat_flips_are_ignored() {
        let mut game = deck(5, 4);
        let (a, b) = find_mismatch(&game);
        let other = (0..game.cards().len()).find(|&i| i != a && i != b).unwrap();

        game.flip(a);
        assert_eq!(game.flip(a), Flip::Ignored);
        game.flip(b);
        assert_eq!(game.flip(other), Flip::Ignored);
        assert_eq!(game.moves(), 1);

        game.resolve();
        assert_eq!(game.flip(999), Flip::Ignored);
    }

    #[test]
    fn flipping_a_matched_card_is_ignored() {
        let mut game = deck(6, 4);
        let (a, b) = find_pair(&game);
        game.flip(a);
        game.flip(b);
        game.resolve();

        assert_eq!(game.flip(a), Flip::Ignored);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn matching_every_pair_wins_and_stops_the_clock() {
        let mut game = deck(7, 2);
        while !game.is_won() {
            let (a, b) = find_unmatched_pair(&game);
            game.flip(a);
            game.flip(b);
            game.resolve();
        }

        assert_eq!(game.matches(), 2);
        assert_eq!(game.moves(), 2);

        let elapsed = game.elapsed_secs();
        game.tick();
        assert_eq!(game.elapsed_secs(), elapsed);
    }

    fn find_unmatched_pair(game: &MemoryGame) -> (usize, usize) {
        let cards = game.cards();
        for i in 0..cards.len() {
            for j in i + 1..cards.len() {
                if !cards[i].is_matched()
                    && !cards[j].is_matched()
                    && cards[i].character() == cards[j].character()
                {
                    return (i, j);
                }
            }
        }
        unreachable!("an unfinished game has an unmatched pair");
    }

    #[test]
    fn clock_waits_for_the_first_flip() {
        let mut game = deck(8, 4);
        game.tick();
        game.tick();
        assert_eq!(game.elapsed_secs(), 0);

        game.flip(0);
        game.tick();
        assert_eq!(game.elapsed_secs(), 1);
    }
}
