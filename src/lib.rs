//! Grid snake: a deterministic game-state core plus the terminal front-end
//! that drives it.
//!
//! [`game::GameState`] owns the simulation and advances one cell per
//! [`game::GameState::step`]. [`clock::SimulationClock`] decides when steps
//! happen, and [`session::Session`] wires both to a high-score store and a
//! presenter.

pub mod clock;
pub mod config;
pub mod food;
pub mod game;
pub mod input;
pub mod renderer;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
