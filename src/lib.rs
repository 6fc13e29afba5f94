//! Pokemon search TUI built on tui-dispatch
//!
//! The library exposes the screen's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod config;
pub mod effect;
pub mod error;
pub mod logging;
pub mod reducer;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
