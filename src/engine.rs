// Game engine API boundary. Agents and UIs drive a session through this trait
// so they never depend on `Game` internals. It is implemented for `Game`.

use crate::card::{Ball, Card, Position};
use crate::game::{GameError, Status};
use crate::marks::MarkOutcome;

pub trait BingoEngine {
    // Session lifecycle
    fn new_game(&mut self);

    // Mutations
    fn call_next(&mut self) -> Result<Ball, GameError>;
    fn mark(&mut self, seat: usize, pos: Position) -> Result<MarkOutcome, GameError>;
    fn daub(&mut self, seat: usize, ball: Ball) -> Result<Option<MarkOutcome>, GameError>;

    // Queries
    fn called(&self) -> &[Ball];
    fn card(&self, seat: usize) -> Option<&Card>;
    fn status(&self) -> Status;
    fn winners(&self) -> &[usize];
    fn num_players(&self) -> usize;
}

impl BingoEngine for crate::game::Game {
    fn new_game(&mut self) {
        self.new_game();
    }

    fn call_next(&mut self) -> Result<Ball, GameError> {
        self.call_next()
    }
    fn mark(&mut self, seat: usize, pos: Position) -> Result<MarkOutcome, GameError> {
        self.mark(seat, pos)
    }
    fn daub(&mut self, seat: usize, ball: Ball) -> Result<Option<MarkOutcome>, GameError> {
        self.daub(seat, ball)
    }

    fn called(&self) -> &[Ball] {
        self.caller.called()
    }
    fn card(&self, seat: usize) -> Option<&Card> {
        self.players.get(seat).map(|p| &p.card)
    }
    fn status(&self) -> Status {
        self.status
    }
    fn winners(&self) -> &[usize] {
        &self.winners
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }
}
