use crate::caller::Caller;
use crate::card::{Ball, Card, Position};
use crate::evaluator::{find_win, WinPattern};
use crate::generator::generate_with;
use crate::marks::MarkOutcome;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const MIN_PLAYERS: usize = 1;
pub const MAX_PLAYERS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Status {
    /// Cards dealt, no ball called yet.
    Waiting,
    Playing,
    /// Someone has bingo. Only the last called ball may still be daubed.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum HistoryEvent {
    NumberCalled(Ball),
    Marked { seat: usize, ball: Ball },
    Bingo { seat: usize, pattern: WinPattern },
    Exhausted,
}

impl HistoryEvent {
    pub fn label(self) -> &'static str {
        match self {
            HistoryEvent::NumberCalled(_) => "Call",
            HistoryEvent::Marked { .. } => "Mark",
            HistoryEvent::Bingo { .. } => "BINGO",
            HistoryEvent::Exhausted => "Empty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct HistoryEntry {
    /// Balls called when the event happened.
    pub calls: usize,
    pub event: HistoryEvent,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("at least one player is required, got {0}")]
    TooFewPlayers(usize),
    #[error("at most {max} players are supported, got {got}")]
    TooManyPlayers { max: usize, got: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error("no player at seat {0}")]
    NoSuchSeat(usize),
    #[error("the game is over")]
    Finished,
    #[error("all 75 balls have been called")]
    Exhausted,
    #[error("{0} has not been called")]
    NotCalled(Ball),
}

/// Session settings. `validate` is applied by [`Game::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct GameConfig {
    pub players: usize,
    /// Reject marks on numbers that have not been called.
    pub strict_marking: bool,
    /// Seed for cards and call order; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { players: 4, strict_marking: true, seed: None }
    }
}

impl GameConfig {
    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_strict_marking(mut self, strict: bool) -> Self {
        self.strict_marking = strict;
        self
    }

    /// Pull the player count into the supported range.
    pub fn clamped(mut self) -> Self {
        self.players = self.players.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < MIN_PLAYERS {
            return Err(ConfigError::TooFewPlayers(self.players));
        }
        if self.players > MAX_PLAYERS {
            return Err(ConfigError::TooManyPlayers { max: MAX_PLAYERS, got: self.players });
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) name: String,
    pub(crate) card: Card,
    pub(crate) bingo: Option<WinPattern>,
}

impl Player {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn card(&self) -> &Card {
        &self.card
    }

    /// The pattern that won this player the game, if any.
    pub fn bingo(&self) -> Option<WinPattern> {
        self.bingo
    }
}

/// A local game: one card per seat, a shared caller, win detection on every mark.
///
/// ```
/// use bingo_rs::game::{Game, GameConfig, Status};
///
/// let mut game = Game::new(GameConfig::default().with_players(2).with_seed(1)).unwrap();
/// assert_eq!(game.status(), Status::Waiting);
/// let ball = game.call_next().unwrap();
/// for seat in 0..game.num_players() {
///     game.daub(seat, ball).unwrap();
/// }
/// assert_eq!(game.status(), Status::Playing);
/// ```
#[derive(Debug)]
#[non_exhaustive]
pub struct Game {
    pub(crate) config: GameConfig,
    rng: ChaCha8Rng,
    pub(crate) caller: Caller,
    pub(crate) players: Vec<Player>,
    pub(crate) status: Status,
    pub(crate) winners: Vec<usize>,
    history: Vec<HistoryEntry>,
}

impl Game {
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Like [`Game::new`], but clamps the player count instead of failing.
    pub fn with_clamped_config(config: GameConfig) -> Self {
        Self::build(config.clamped())
    }

    fn build(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let caller = Caller::with_rng(&mut rng);
        let mut game = Self {
            rng,
            caller,
            players: Vec::with_capacity(config.players),
            status: Status::Waiting,
            winners: Vec::new(),
            history: Vec::new(),
            config,
        };
        game.deal();
        game
    }

    /// Deal fresh cards and a fresh caller. Cards are never replaced mid-game.
    pub fn new_game(&mut self) {
        self.caller = Caller::with_rng(&mut self.rng);
        self.deal();
    }

    fn deal(&mut self) {
        self.players = (1..=self.config.players)
            .map(|i| Player {
                name: if i == 1 { "You".to_string() } else { format!("P{i}") },
                card: generate_with(&mut self.rng),
                bingo: None,
            })
            .collect();
        self.status = Status::Waiting;
        self.winners.clear();
        self.history.clear();
        tracing::debug!(players = self.players.len(), "new game dealt");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    pub fn caller(&self) -> &Caller {
        &self.caller
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Seats that have bingo, in the order they completed it.
    pub fn winners(&self) -> &[usize] {
        &self.winners
    }

    /// Draw the next ball.
    pub fn call_next(&mut self) -> Result<Ball, GameError> {
        if self.status == Status::Finished {
            return Err(GameError::Finished);
        }
        let Some(ball) = self.caller.call() else {
            if !self.history.iter().any(|e| e.event == HistoryEvent::Exhausted) {
                tracing::info!("ball pool exhausted without a winner");
                self.record(HistoryEvent::Exhausted);
            }
            return Err(GameError::Exhausted);
        };
        self.status = Status::Playing;
        self.record(HistoryEvent::NumberCalled(ball));
        tracing::debug!(%ball, calls = self.caller.called().len(), "ball called");
        Ok(ball)
    }

    /// Mark a cell on a seat's card and check it for bingo.
    pub fn mark(&mut self, seat: usize, pos: Position) -> Result<MarkOutcome, GameError> {
        let player = self.players.get(seat).ok_or(GameError::NoSuchSeat(seat))?;
        let number = player.card.number_at(pos);
        if let Some(ball) = number {
            self.check_markable(ball)?;
        } else if self.status == Status::Finished {
            return Err(GameError::Finished);
        }

        let outcome = self.players[seat].card.mark(pos);
        if let (MarkOutcome::Marked, Some(ball)) = (outcome, number) {
            tracing::debug!(seat, %ball, "cell marked");
            self.record(HistoryEvent::Marked { seat, ball });
            self.check_bingo(seat);
        }
        Ok(outcome)
    }

    /// Mark the cell holding `ball`. `Ok(None)` when the seat's card lacks it.
    pub fn daub(&mut self, seat: usize, ball: Ball) -> Result<Option<MarkOutcome>, GameError> {
        let player = self.players.get(seat).ok_or(GameError::NoSuchSeat(seat))?;
        match player.card.position_of(ball) {
            Some(pos) => self.mark(seat, pos).map(Some),
            None => Ok(None),
        }
    }

    fn check_markable(&self, ball: Ball) -> Result<(), GameError> {
        if self.status == Status::Finished && self.caller.last_called() != Some(ball) {
            return Err(GameError::Finished);
        }
        if self.config.strict_marking && !self.caller.is_called(ball) {
            return Err(GameError::NotCalled(ball));
        }
        Ok(())
    }

    fn check_bingo(&mut self, seat: usize) {
        let player = &mut self.players[seat];
        if player.bingo.is_some() {
            return;
        }
        if let Some(pattern) = find_win(&player.card.marked) {
            player.bingo = Some(pattern);
            self.winners.push(seat);
            self.status = Status::Finished;
            tracing::info!(
                seat,
                card = %player.card.id(),
                %pattern,
                calls = self.caller.called().len(),
                "bingo"
            );
            self.record(HistoryEvent::Bingo { seat, pattern });
        }
    }

    fn record(&mut self, event: HistoryEvent) {
        self.history.push(HistoryEntry { calls: self.caller.called().len(), event });
    }

    pub fn history_recent(&self, n: usize) -> Vec<HistoryEntry> {
        if n == 0 {
            return Vec::new();
        }
        let len = self.history.len();
        let start = len.saturating_sub(n);
        self.history[start..].to_vec()
    }

    pub fn history_recent_offset(&self, n: usize, offset: usize) -> Vec<HistoryEntry> {
        if n == 0 || self.history.is_empty() {
            return Vec::new();
        }
        let len = self.history.len();
        let offset = offset.min(len.saturating_sub(n));
        let end = len - offset;
        let start = end.saturating_sub(n);
        self.history[start..end].to_vec()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
