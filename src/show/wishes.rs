// wishes.rs - Draw without repetition until the deck runs out

use fastrand::Rng;

pub struct WishDeck<T> {
    entries: Vec<T>,
    left: Vec<T>,
    rng: Rng,
}

impl<T: Clone> WishDeck<T> {
    pub fn new(entries: Vec<T>, rng: Rng) -> Self {
        Self {
            left: entries.clone(),
            entries,
            rng,
        }
    }

    /// Random entry not drawn since the last refill. `None` for an empty deck.
    pub fn draw(&mut self) -> Option<T> {
        if self.left.is_empty() {
            self.left = self.entries.clone();
        }
        if self.left.is_empty() {
            return None;
        }
        let i = self.rng.usize(..self.left.len());
        Some(self.left.swap_remove(i))
    }

    pub fn remaining(&self) -> usize {
        self.left.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_once_per_round() {
        let mut deck = WishDeck::new((0..8).collect(), Rng::with_seed(5));
        for _ in 0..3 {
            let mut round: Vec<i32> = (0..8).filter_map(|_| deck.draw()).collect();
            round.sort();
            assert_eq!(round, (0..8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn empty_deck_draws_nothing() {
        let mut deck: WishDeck<&str> = WishDeck::new(Vec::new(), Rng::with_seed(1));
        assert_eq!(deck.draw(), None);
    }
}
