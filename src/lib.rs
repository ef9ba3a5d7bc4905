//! bingo-rs: 75-ball bingo cards, marking, and win detection
//!
//! Goals:
//! - Cards that always satisfy the column ranges, with a FREE center
//! - One source of truth for marks; marked values are derived from it
//! - Win checks over the 12 lines of a 5x5 grid, reporting which line won
//!
//! ## Quick start: generate a card and play it
//! ```
//! use bingo_rs::card::Ball;
//! use bingo_rs::evaluator::find_win;
//! use bingo_rs::generator::generate_seeded;
//!
//! let mut card = generate_seeded(7);
//! assert!(!card.has_won());
//!
//! // Daub every number in the B column.
//! let column: Vec<Ball> = card.column_values(bingo_rs::card::Column::B).collect();
//! for ball in column {
//!     card.daub(ball);
//! }
//! assert!(card.has_won());
//! assert_eq!(find_win(card.marked()).unwrap().to_string(), "column B");
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin bingo-rs
//! ```
//! Set `BINGO_LOG_FILE=/tmp/bingo.log` (and optionally `RUST_LOG`) to capture logs.

pub mod agents;
pub mod caller;
pub mod card;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod generator;
pub mod marks;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
