use crate::engine::BingoEngine;
use crate::game::GameError;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use std::time::{Duration, Instant};

use super::{AgentKind, PlayerAgent};

/// Difficulty tiers: how often a bot overlooks a called number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Expert,
            Difficulty::Expert => Difficulty::Easy,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Expert,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
            Difficulty::Expert => Difficulty::Hard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Med",
            Difficulty::Hard => "Hard",
            Difficulty::Expert => "Xprt",
        }
    }
}

/// Configuration for a bot's attention and reaction time.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct BotProfile {
    pub difficulty: Difficulty,
    /// Probability of never noticing a called number.
    pub miss_rate: f64,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub rng_seed: Option<u64>,
}

impl BotProfile {
    /// Create a profile with tuned defaults for a difficulty tier.
    pub fn for_difficulty(difficulty: Difficulty) -> Self {
        let miss_rate = match difficulty {
            Difficulty::Easy => 0.25,
            Difficulty::Medium => 0.1,
            Difficulty::Hard => 0.04,
            Difficulty::Expert => 0.0,
        };
        Self { difficulty, miss_rate, min_delay_ms: 0, max_delay_ms: 0, rng_seed: None }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn with_delay_ms(mut self, min: u64, max: u64) -> Self {
        self.min_delay_ms = min;
        self.max_delay_ms = max.max(min);
        self
    }
}

impl Default for BotProfile {
    fn default() -> Self {
        Self::for_difficulty(Difficulty::Medium)
    }
}

#[derive(Debug)]
struct BotState {
    rng: StdRng,
    /// Called numbers already considered.
    seen: usize,
    ready_at: Option<Instant>,
}

impl BotState {
    fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(v) => StdRng::seed_from_u64(v),
            None => {
                let mut seed = [0u8; 32];
                rand::rng().fill_bytes(&mut seed);
                StdRng::from_seed(seed)
            }
        };
        Self { rng, seen: 0, ready_at: None }
    }
}

/// Daubs called numbers after a reaction delay, occasionally missing one.
#[derive(Debug)]
pub struct BotAgent {
    profile: BotProfile,
    state: BotState,
}

impl BotAgent {
    pub fn new(profile: BotProfile) -> Self {
        let state = BotState::new(profile.rng_seed);
        Self { profile, state }
    }

    /// Schedules a reaction on first sight of new numbers; true once it has elapsed.
    fn reaction_elapsed(&mut self) -> bool {
        let max = self.profile.max_delay_ms.max(self.profile.min_delay_ms);
        if max == 0 {
            return true;
        }
        let now = Instant::now();
        match self.state.ready_at {
            Some(at) => now >= at,
            None => {
                let delay = self.state.rng.random_range(self.profile.min_delay_ms..=max);
                self.state.ready_at = Some(now + Duration::from_millis(delay));
                false
            }
        }
    }
}

impl PlayerAgent for BotAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Bot
    }

    fn on_tick(&mut self, engine: &mut dyn BingoEngine, seat: usize) -> Result<bool, GameError> {
        let called = engine.called().len();
        if called < self.state.seen {
            self.reset();
        }
        if called == self.state.seen || !self.reaction_elapsed() {
            return Ok(false);
        }

        let mut acted = false;
        while self.state.seen < engine.called().len() {
            let ball = engine.called()[self.state.seen];
            self.state.seen += 1;
            if self.state.rng.random::<f64>() < self.profile.miss_rate {
                tracing::trace!(seat, %ball, "bot missed a number");
                continue;
            }
            match engine.daub(seat, ball) {
                Ok(outcome) => acted |= outcome.is_some_and(|o| o.changed()),
                Err(GameError::Finished) => break,
                Err(err) => return Err(err),
            }
        }
        self.state.ready_at = None;
        Ok(acted)
    }

    fn reset(&mut self) {
        self.state.seen = 0;
        self.state.ready_at = None;
    }
}
