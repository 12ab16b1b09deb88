//! Chef Assignment Policy Module
//!
//! Once per tick the orchestrator asks the configured policy how to match
//! free chefs against the priority-sorted list of orders waiting for
//! preparation. Policies are planners, not executors: they look at an
//! immutable view of the chefs and orders and return a list of
//! [`ChefAssignment`] decisions, which the orchestrator then applies. This
//! keeps the policies pure and independently testable.
//!
//! Two policies exist:
//! 1. **FOCUSED** ([`FocusedPolicy`]): every free chef is sent to the single
//!    highest-priority waiting order
//! 2. **RR** ([`RoundRobinPolicy`]): free chefs take the highest-priority
//!    waiting order one by one, each holding it for at most a fixed quantum
//!    of ticks
//!
//! Ovens and drivers have no policy choice; their first-free-unit matching
//! lives in the orchestrator.

use crate::models::order::{Order, OrderId};
use crate::models::resources::Chef;

pub mod focused;
pub mod round_robin;

pub use focused::FocusedPolicy;
pub use round_robin::RoundRobinPolicy;

/// Decision to bind one chef to one order this tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChefAssignment {
    /// Chef to bind
    pub chef_id: usize,

    /// Order to bind it to
    pub order_id: OrderId,

    /// Quantum to seed before binding; `None` for non-preemptive policies
    pub quantum: Option<i32>,
}

/// Per-tick chef assignment planning
///
/// `waiting` is the list of orders in `Pending` or `ChefWaiting` state,
/// already sorted ascending by priority with ties in arrival order. The
/// returned decisions are applied in order by the orchestrator.
pub trait ChefAssignmentPolicy {
    fn plan(&self, chefs: &[Chef], orders: &[Order], waiting: &[OrderId]) -> Vec<ChefAssignment>;
}
