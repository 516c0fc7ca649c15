//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are functions over `&mut World` (or `&World` for read-only).
//! Per-session bookkeeping they need is passed in by the engine.

pub mod cleanup;
pub mod movement;
pub mod snapshot;
pub mod spawn_scheduler;
pub mod typing;
