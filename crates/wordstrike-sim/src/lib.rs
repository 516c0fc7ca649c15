//! Headless simulation engine for WORDSTRIKE.
//!
//! Owns the hecs ECS world, processes player commands, runs the per-tick
//! systems (spawning, movement, combat) and produces `GameStateSnapshot`s.
//! No renderer or audio dependency, so every rule is testable frame by frame.

pub mod achievements;
pub mod combat;
pub mod engine;
pub mod persistence;
pub mod systems;
pub mod world_setup;
