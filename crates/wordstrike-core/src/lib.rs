//! Core types and definitions for the WORDSTRIKE typing-combat simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, commands, session state, snapshots, events, and constants.
//! It has no dependency on any renderer, audio backend, or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod session;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
