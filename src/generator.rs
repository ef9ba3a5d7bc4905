//! Random card generation.
//!
//! Each column draws from its own 15-number range by rejection sampling: pick a
//! candidate uniformly, redraw if the column already holds it. With at most five
//! picks from fifteen values the loop always terminates quickly.

use crate::card::{Ball, Card, CardId, Column, Position, GRID_SIZE};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const ID_LEN: usize = 9;
const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a card from thread-local entropy.
///
/// ```
/// use bingo_rs::card::Position;
/// use bingo_rs::generator::generate;
///
/// let card = generate();
/// assert_eq!(card.number_at(Position::FREE), None);
/// assert!(!card.has_won());
/// ```
pub fn generate() -> Card {
    generate_with(&mut rand::rng())
}

/// Generate a reproducible card: the same seed yields the same numbers and id.
pub fn generate_seeded(seed: u64) -> Card {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_with(&mut rng)
}

/// Generate a card using the provided RNG.
pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Card {
    let mut numbers = [[None; GRID_SIZE]; GRID_SIZE];
    for column in Column::ALL {
        let mut seen: u16 = 0;
        for row in 0..GRID_SIZE {
            if Position::at(column.index(), row).is_free() {
                continue;
            }
            let value = loop {
                let candidate = rng.random_range(column.range());
                let bit = 1u16 << (candidate - column.low());
                if seen & bit == 0 {
                    seen |= bit;
                    break candidate;
                }
            };
            numbers[column.index()][row] = Some(Ball::from_raw(value));
        }
    }
    let id = random_id(rng);
    tracing::trace!(card = %id, "generated card");
    Card::from_parts(id, numbers)
}

fn random_id<R: Rng + ?Sized>(rng: &mut R) -> CardId {
    let id: String = (0..ID_LEN)
        .map(|_| char::from(ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())]))
        .collect();
    CardId::new(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_seeded(42);
        let b = generate_seeded(42);
        assert_eq!(a, b);
        assert_ne!(a.id(), generate_seeded(43).id());
    }

    #[test]
    fn id_is_short_and_lowercase_alphanumeric() {
        let card = generate_seeded(7);
        let id = card.id().as_str();
        assert_eq!(id.len(), ID_LEN);
        assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
    }

    #[test]
    fn new_cards_start_unmarked() {
        let card = generate();
        assert_eq!(card.marked().count_marked(), 0);
        assert!(card.derived_marked_values().is_empty());
    }

    #[test]
    fn every_cell_but_free_holds_a_number() {
        let card = generate_seeded(11);
        for pos in Position::all() {
            assert_eq!(card.number_at(pos).is_none(), pos.is_free(), "{pos}");
        }
    }
}
