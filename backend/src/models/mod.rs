//! Domain models for the pizza fulfillment simulator

pub mod event;
pub mod order;
pub mod resources;
pub mod state;

// Re-exports
pub use event::{Event, EventLog};
pub use order::{Order, OrderConfig, OrderError, OrderId, OrderState, ParseOrderError};
pub use resources::{Chef, ChefStrategy, Driver, Oven, ParseStrategyError, ResourceError};
pub use state::SimulationState;
