//! Enemy steering for WORDSTRIKE.
//!
//! A renderer-independent movement solver: given the live enemy bodies and a
//! frame delta, it returns where each body ends up, how it is facing, and
//! whether it reached the defender. No ECS dependency; operates on plain data,
//! so frame-by-frame behaviour is testable without a view layer.

pub mod separation;
pub mod solver;

pub use solver::{step, ReachKind, SteeringBody, SteeringOutcome};

pub use wordstrike_core as core;

#[cfg(test)]
mod tests;
