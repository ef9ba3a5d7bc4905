use crate::card::{Ball, MAX_BALL};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CallerError {
    #[error("ball {0} appears more than once in the call sequence")]
    Duplicate(Ball),
}

/// The pool of 75 balls, drawn without replacement.
#[derive(Debug, Clone)]
pub struct Caller {
    // Next ball is at the end.
    pool: Vec<Ball>,
    called: Vec<Ball>,
    called_mask: u128,
}

impl Default for Caller {
    fn default() -> Self {
        Self::new()
    }
}

impl Caller {
    /// A freshly shuffled pool using thread-local entropy.
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    /// Shuffle using a seeded RNG for reproducibility.
    ///
    /// ```
    /// use bingo_rs::caller::Caller;
    ///
    /// let mut a = Caller::seeded(3);
    /// let mut b = Caller::seeded(3);
    /// assert_eq!(a.call(), b.call());
    /// assert_eq!(a.remaining(), 74);
    /// ```
    pub fn seeded(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::with_rng(&mut rng)
    }

    /// Shuffle using the provided RNG.
    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut pool: Vec<Ball> = Ball::all().collect();
        pool.shuffle(rng);
        Self::from_pool(pool)
    }

    /// A scripted caller that yields `sequence` in order, then is exhausted.
    pub fn from_sequence(sequence: Vec<Ball>) -> Result<Self, CallerError> {
        let mut mask = 0u128;
        for ball in &sequence {
            let bit = 1u128 << ball.number();
            if mask & bit != 0 {
                return Err(CallerError::Duplicate(*ball));
            }
            mask |= bit;
        }
        let mut pool = sequence;
        pool.reverse();
        Ok(Self::from_pool(pool))
    }

    fn from_pool(pool: Vec<Ball>) -> Self {
        Self { pool, called: Vec::with_capacity(MAX_BALL as usize), called_mask: 0 }
    }

    /// Draw the next ball; `None` once the pool is empty.
    pub fn call(&mut self) -> Option<Ball> {
        let ball = self.pool.pop()?;
        self.called.push(ball);
        self.called_mask |= 1u128 << ball.number();
        Some(ball)
    }

    /// Balls drawn so far, oldest first.
    pub fn called(&self) -> &[Ball] {
        &self.called
    }

    pub fn last_called(&self) -> Option<Ball> {
        self.called.last().copied()
    }

    pub fn is_called(&self, ball: Ball) -> bool {
        self.called_mask & (1u128 << ball.number()) != 0
    }

    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(n: u8) -> Ball {
        Ball::try_new(n).unwrap()
    }

    #[test]
    fn draws_every_ball_once_then_exhausts() {
        let mut caller = Caller::seeded(17);
        let mut seen = std::collections::HashSet::new();
        while let Some(b) = caller.call() {
            assert!(seen.insert(b), "duplicate {b}");
        }
        assert_eq!(seen.len(), 75);
        assert!(caller.is_exhausted());
        assert_eq!(caller.call(), None);
        assert_eq!(caller.called().len(), 75);
    }

    #[test]
    fn scripted_sequence_is_called_in_order() {
        let mut caller = Caller::from_sequence(vec![ball(5), ball(70), ball(33)]).unwrap();
        assert_eq!(caller.call(), Some(ball(5)));
        assert!(caller.is_called(ball(5)));
        assert!(!caller.is_called(ball(70)));
        assert_eq!(caller.call(), Some(ball(70)));
        assert_eq!(caller.last_called(), Some(ball(70)));
        assert_eq!(caller.remaining(), 1);
        assert_eq!(caller.call(), Some(ball(33)));
        assert_eq!(caller.call(), None);
    }

    #[test]
    fn scripted_sequence_rejects_duplicates() {
        let err = Caller::from_sequence(vec![ball(1), ball(2), ball(1)]).unwrap_err();
        assert_eq!(err, CallerError::Duplicate(ball(1)));
    }
}
