//! WORDSTRIKE host application.
//!
//! This crate wires the simulation crates together: it runs the engine on a
//! game-loop thread, bootstraps logging, parses the command line and drives
//! headless soak sessions with a bot typist.

pub mod autopilot;
pub mod config;
pub mod error;
pub mod game_loop;
pub mod logging;
pub mod state;

pub use wordstrike_core as core;
