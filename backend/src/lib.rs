//! Pizza Fulfillment Simulator - Core Engine
//!
//! Deterministic discrete-time simulation of pizza orders moving through a
//! three-stage resource pipeline: preparation (chefs), baking (ovens) and
//! delivery (drivers).
//!
//! # Architecture
//!
//! - **core**: Time management
//! - **models**: Domain types (Order, Chef, Oven, Driver, SimulationState)
//! - **policy**: Chef scheduling policies (FOCUSED, RR)
//! - **orchestrator**: Main simulation loop and per-minute snapshots
//!
//! # Critical Invariants
//!
//! 1. Execution is single-threaded and fully deterministic
//! 2. Orders are owned by the simulation; resources hold index bindings
//! 3. Resource pools advance in fixed order: chefs, ovens, drivers,
//!    ascending id within each pool

// Module declarations
pub mod core;
pub mod models;
pub mod orchestrator;
pub mod policy;

// Re-exports for convenience
pub use crate::core::time::TimeManager;
pub use models::{
    event::{Event, EventLog},
    order::{Order, OrderConfig, OrderError, OrderId, OrderState, ParseOrderError},
    resources::{Chef, ChefStrategy, Driver, Oven, ParseStrategyError, ResourceError},
    state::SimulationState,
};
pub use orchestrator::{
    ChefSnapshot, OrderSnapshot, Orchestrator, OrchestratorConfig, PolicyConfig, ResourceSnapshot,
    SimulationError, TickResult,
};
pub use policy::{ChefAssignment, ChefAssignmentPolicy, FocusedPolicy, RoundRobinPolicy};
