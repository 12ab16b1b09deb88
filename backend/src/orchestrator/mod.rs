//! Orchestrator - main simulation loop
//!
//! Drives the assign / work / observe cycle once per simulated minute until
//! every order is delivered.
//!
//! See `engine.rs` for the full implementation.

pub mod engine;

// Re-export main types for convenience
pub use engine::{
    ChefSnapshot, OrderSnapshot, Orchestrator, OrchestratorConfig, PolicyConfig, ResourceSnapshot,
    SimulationError, TickResult,
};
