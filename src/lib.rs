//! # Connect Four
//!
//! Connect Four for two people at one keyboard, or one person against a
//! greedy bot. The engine is synchronous and timing-free; the terminal UI
//! owns animation and the bot's thinking delay.
//!
//! ## Modules
//!
//! - [`game`] — Board, gravity, line detection and the turn-controlling session
//! - [`ai`] — Agent trait and the greedy win/block/center bot
//! - [`ui`] — Terminal UI built with Ratatui
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod ui;
