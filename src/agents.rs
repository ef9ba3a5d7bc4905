//! Agents: pluggable seat controllers (bots, humans via a frontend).
//!
//! Bingo has no turn order, so every agent is ticked on every pass. A
//! `PlayerAgent` reads the called numbers through [`BingoEngine`] and marks its
//! own seat's card. `AgentTable` owns one optional agent per seat so UIs stay
//! thin and never coordinate bots themselves.

use crate::card::{Ball, Position};
use crate::engine::BingoEngine;
use crate::game::GameError;
use core::fmt;
use std::collections::VecDeque;

/// Kinds of agents attached to seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AgentKind {
    Human,
    Bot,
}

/// Seat-level intents, typically produced by a UI for a human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Intent {
    Mark(Position),
    Daub(Ball),
}

/// A seat controller ticked on every pass of the table.
pub trait PlayerAgent {
    /// Act for `seat`; returns whether any cell was newly marked.
    fn on_tick(&mut self, engine: &mut dyn BingoEngine, seat: usize) -> Result<bool, GameError>;
    /// The kind of this agent (human, bot, etc.).
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }
    /// Optionally receive an intent; default is to ignore and return false.
    fn receive(&mut self, _intent: Intent) -> bool {
        false
    }
    /// Drop per-game state when new cards are dealt.
    fn reset(&mut self) {}
}

mod bots;

pub use bots::{BotAgent, BotProfile, Difficulty};

/// Executes queued UI intents, optionally daubing every called number itself.
#[derive(Debug, Default)]
pub struct HumanAgent {
    pending: VecDeque<Intent>,
    auto_daub: bool,
    seen: usize,
}

impl HumanAgent {
    const MAX_PENDING: usize = 8;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_auto_daub(mut self, on: bool) -> Self {
        self.auto_daub = on;
        self
    }

    pub fn auto_daub(&self) -> bool {
        self.auto_daub
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl PlayerAgent for HumanAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Human
    }

    fn receive(&mut self, intent: Intent) -> bool {
        if self.pending.len() >= Self::MAX_PENDING {
            return false;
        }
        self.pending.push_back(intent);
        true
    }

    /// Applies every queued intent, then auto-daubs. A rejected intent does not
    /// stop the rest; the first error is returned once the tick is done.
    fn on_tick(&mut self, engine: &mut dyn BingoEngine, seat: usize) -> Result<bool, GameError> {
        let mut acted = false;
        let mut first_err = None;
        while let Some(intent) = self.pending.pop_front() {
            let outcome = match intent {
                Intent::Mark(pos) => engine.mark(seat, pos).map(Some),
                Intent::Daub(ball) => engine.daub(seat, ball),
            };
            match outcome {
                Ok(outcome) => acted |= outcome.is_some_and(|o| o.changed()),
                Err(err) => {
                    first_err.get_or_insert(err);
                }
            }
        }

        if self.auto_daub {
            if engine.called().len() < self.seen {
                self.seen = 0;
            }
            while self.seen < engine.called().len() {
                let ball = engine.called()[self.seen];
                self.seen += 1;
                match engine.daub(seat, ball) {
                    Ok(outcome) => acted |= outcome.is_some_and(|o| o.changed()),
                    Err(GameError::Finished) => {}
                    Err(err) => {
                        first_err.get_or_insert(err);
                    }
                }
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(acted),
        }
    }

    fn reset(&mut self) {
        self.pending.clear();
        self.seen = 0;
    }
}

/// Result of ticking every seat once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct TickReport {
    pub acted: bool,
    /// Errors by seat; one failing seat never stops the others.
    pub errors: Vec<(usize, GameError)>,
}

/// Manages a set of optional agents, one per seat.
pub struct AgentTable {
    seats: Vec<Option<Box<dyn PlayerAgent>>>,
}

impl fmt::Debug for AgentTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags: String = self
            .seats
            .iter()
            .map(|a| match a.as_deref().map(|ag| ag.kind()) {
                Some(AgentKind::Bot) => 'B',
                Some(AgentKind::Human) => 'H',
                None => '-',
            })
            .collect();
        write!(f, "AgentTable({flags})")
    }
}

impl AgentTable {
    /// Create a table with `n` seats, all empty.
    pub fn for_seats(n: usize) -> Self {
        let mut seats = Vec::with_capacity(n);
        seats.resize_with(n, || None);
        Self { seats }
    }

    /// Ensure the table has exactly `n` seats.
    pub fn ensure_len(&mut self, n: usize) {
        if self.seats.len() < n {
            self.seats.resize_with(n, || None);
        }
        if self.seats.len() > n {
            self.seats.truncate(n);
        }
    }

    /// Assign an agent to a seat (or remove when `None`).
    pub fn set_agent(&mut self, seat: usize, agent: Option<Box<dyn PlayerAgent>>) {
        if seat >= self.seats.len() {
            self.ensure_len(seat + 1);
        }
        self.seats[seat] = agent;
    }

    pub fn agent(&self, seat: usize) -> Option<&dyn PlayerAgent> {
        self.seats.get(seat).and_then(|a| a.as_deref())
    }

    pub fn agent_kind(&self, seat: usize) -> Option<AgentKind> {
        self.agent(seat).map(|ag| ag.kind())
    }

    /// Send an intent to a specific seat agent, if any.
    pub fn receive(&mut self, seat: usize, intent: Intent) -> bool {
        if let Some(Some(agent)) = self.seats.get_mut(seat) {
            return agent.receive(intent);
        }
        false
    }

    pub fn any_bots(&self) -> bool {
        self.seats.iter().filter_map(|a| a.as_deref()).any(|ag| ag.kind() == AgentKind::Bot)
    }

    /// Forget per-game state in every agent.
    pub fn reset(&mut self) {
        for agent in self.seats.iter_mut().flatten() {
            agent.reset();
        }
    }

    /// Tick every seated agent once, in seat order.
    pub fn on_tick(&mut self, engine: &mut dyn BingoEngine) -> TickReport {
        let mut report = TickReport::default();
        let n = engine.num_players();
        for (seat, slot) in self.seats.iter_mut().enumerate().take(n) {
            let Some(agent) = slot else { continue };
            match agent.on_tick(engine, seat) {
                Ok(acted) => report.acted |= acted,
                Err(err) => {
                    tracing::debug!(seat, %err, "agent action rejected");
                    report.errors.push((seat, err));
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GameConfig};
    use crate::marks::MarkOutcome;

    fn mk_game(players: usize) -> Game {
        Game::new(GameConfig::default().with_players(players).with_seed(21)).unwrap()
    }

    #[test]
    fn human_applies_queued_marks_on_tick() {
        let mut game = mk_game(1);
        let ball = game.call_next().unwrap();
        let mut human = HumanAgent::new();
        assert!(human.receive(Intent::Daub(ball)));
        assert_eq!(human.pending(), 1);
        let _ = human.on_tick(&mut game, 0).unwrap();
        assert_eq!(human.pending(), 0);
        if let Some(pos) = game.players()[0].card().position_of(ball) {
            assert!(game.players()[0].card().is_marked(pos));
        }
    }

    #[test]
    fn human_queue_is_bounded() {
        let mut human = HumanAgent::new();
        for _ in 0..HumanAgent::MAX_PENDING {
            assert!(human.receive(Intent::Mark(Position::FREE)));
        }
        assert!(!human.receive(Intent::Mark(Position::FREE)));
    }

    #[test]
    fn human_reports_rejected_mark() {
        let mut game = mk_game(1);
        let pos = Position::try_new(4, 4).unwrap();
        let mut human = HumanAgent::new();
        human.receive(Intent::Mark(pos));
        assert!(matches!(human.on_tick(&mut game, 0), Err(GameError::NotCalled(_))));
    }

    /// Calls until a number on seat 0's card comes up; returns it and an uncalled cell.
    fn first_hit(game: &mut Game) -> (Ball, Position) {
        let card = game.players()[0].card().clone();
        let ball = loop {
            let b = game.call_next().unwrap();
            if card.contains(b) {
                break b;
            }
        };
        let uncalled = Position::all()
            .find(|p| card.number_at(*p).is_some_and(|b| !game.caller().is_called(b)))
            .unwrap();
        (ball, uncalled)
    }

    #[test]
    fn rejected_intent_does_not_drop_the_rest_of_the_queue() {
        let mut game = mk_game(1);
        let (ball, uncalled) = first_hit(&mut game);
        let mut human = HumanAgent::new();
        human.receive(Intent::Mark(uncalled));
        human.receive(Intent::Daub(ball));

        assert!(matches!(human.on_tick(&mut game, 0), Err(GameError::NotCalled(_))));
        assert_eq!(human.pending(), 0);
        let card = game.players()[0].card();
        assert!(card.is_marked(card.position_of(ball).unwrap()));
        assert!(!card.is_marked(uncalled));
    }

    #[test]
    fn rejected_intent_does_not_skip_auto_daub() {
        let mut game = mk_game(1);
        let (ball, uncalled) = first_hit(&mut game);
        let mut human = HumanAgent::new().with_auto_daub(true);
        human.receive(Intent::Mark(uncalled));

        assert!(matches!(human.on_tick(&mut game, 0), Err(GameError::NotCalled(_))));
        let card = game.players()[0].card();
        assert!(card.is_marked(card.position_of(ball).unwrap()));
    }

    #[test]
    fn auto_daub_marks_every_called_number() {
        let mut game = mk_game(1);
        let mut human = HumanAgent::new().with_auto_daub(true);
        let mut called = Vec::new();
        for _ in 0..20 {
            called.push(game.call_next().unwrap());
            let _ = human.on_tick(&mut game, 0).unwrap();
            if game.status() == crate::game::Status::Finished {
                break;
            }
        }
        let card = game.players()[0].card();
        for ball in called.iter().filter(|b| card.contains(**b)) {
            assert!(card.derived_marked_values().contains(ball));
        }
    }

    #[test]
    fn table_collects_errors_without_stopping_other_seats() {
        let mut game = mk_game(2);
        let ball = game.call_next().unwrap();
        let mut table = AgentTable::for_seats(2);
        let mut bad = HumanAgent::new();
        bad.receive(Intent::Mark(Position::try_new(0, 0).unwrap()));
        table.set_agent(0, Some(Box::new(bad)));
        let mut good = HumanAgent::new();
        good.receive(Intent::Daub(ball));
        table.set_agent(1, Some(Box::new(good)));

        let report = table.on_tick(&mut game);
        let first = game.players()[0].card().number_at(Position::try_new(0, 0).unwrap());
        if first != Some(ball) {
            assert_eq!(report.errors.len(), 1);
            assert_eq!(report.errors[0].0, 0);
        }
        let expected = game.players()[1].card().contains(ball);
        assert_eq!(report.acted, expected);
        assert_eq!(format!("{table:?}"), "AgentTable(HH)");
        assert_eq!(
            game.mark(1, Position::FREE),
            Ok(MarkOutcome::FreeSpace),
            "free space is always a no-op"
        );
    }
}
