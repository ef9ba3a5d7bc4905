//! Terminal frontend. `app` holds all state transitions and is testable without
//! a terminal; `ui` only draws; `controller` maps keys to `InputAction`s.

pub mod app;
pub mod controller;
mod ui;
