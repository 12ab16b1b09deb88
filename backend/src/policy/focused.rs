//! FOCUSED Policy
//!
//! Non-preemptive gang scheduling: the single highest-priority waiting
//! order gets every currently free chef.
//!
//! # Behavior
//!
//! - If any order is waiting, all free chefs are bound to the first one in
//!   the priority-sorted list; lower-priority orders wait
//! - Bound chefs keep their order until its preparation is complete
//! - With N chefs on one order, each chef decrements the order's shared
//!   prep countdown every tick, so the order finishes roughly N times
//!   faster than with a single chef
//!
//! # Use Case
//!
//! - Minimize latency of the most urgent order at the cost of starving
//!   everything behind it

use super::{ChefAssignment, ChefAssignmentPolicy};
use crate::models::order::{Order, OrderId};
use crate::models::resources::Chef;

/// FOCUSED policy: all free chefs on the highest-priority order
///
/// # Example
///
/// ```
/// use pizza_simulator_core_rs::policy::{ChefAssignmentPolicy, FocusedPolicy};
/// use pizza_simulator_core_rs::{Chef, ChefStrategy, Order};
///
/// let policy = FocusedPolicy::new();
/// let chefs = vec![
///     Chef::new(0, ChefStrategy::Focused, 2),
///     Chef::new(1, ChefStrategy::Focused, 2),
/// ];
/// let orders = vec![Order::new("alice".to_string(), 1, 5, 1, 2, 3)];
///
/// let plan = policy.plan(&chefs, &orders, &[0]);
/// assert_eq!(plan.len(), 2); // both chefs sent to alice
/// ```
pub struct FocusedPolicy;

impl FocusedPolicy {
    /// Create new FOCUSED policy
    pub fn new() -> Self {
        Self
    }
}

impl Default for FocusedPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl ChefAssignmentPolicy for FocusedPolicy {
    fn plan(&self, chefs: &[Chef], _orders: &[Order], waiting: &[OrderId]) -> Vec<ChefAssignment> {
        let Some(&target) = waiting.first() else {
            return Vec::new();
        };

        chefs
            .iter()
            .filter(|chef| chef.is_free())
            .map(|chef| ChefAssignment {
                chef_id: chef.id(),
                order_id: target,
                quantum: None,
            })
            .collect()
    }
}
