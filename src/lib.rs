//! # Connect Four
//!
//! Rules engine for two-player Connect Four with a terminal front end built
//! with Ratatui.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, player marks, session engine with
//!   undo and score tally
//! - [`ui`] — Terminal UI: game view, board rendering
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod ui;
