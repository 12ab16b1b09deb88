//! RR (Round Robin) Policy
//!
//! Preemptive quantum-based scheduling.
//!
//! # Behavior
//!
//! - Free chefs are walked in ascending id order; each is sent to the
//!   current highest-priority waiting order with a fresh quantum
//! - An order stays in the waiting list until as many chefs are bound to it
//!   as it has pizzas, so a multi-pizza order can absorb several chefs but
//!   never more than one chef-slot per pizza
//! - A bound chef holds its order for at most `quantum` ticks; the work
//!   cycle then preempts the order back to the waiting list
//!
//! # Use Case
//!
//! - Fair sharing of the chef pool across orders while still honoring
//!   priority at every assignment point

use super::{ChefAssignment, ChefAssignmentPolicy};
use crate::models::order::{Order, OrderId};
use crate::models::resources::Chef;

/// RR policy: one chef-slot per pizza, preemptible after a quantum
///
/// # Example
///
/// ```
/// use pizza_simulator_core_rs::policy::{ChefAssignmentPolicy, RoundRobinPolicy};
/// use pizza_simulator_core_rs::{Chef, ChefStrategy, Order};
///
/// let policy = RoundRobinPolicy::new(2);
/// let chefs = vec![
///     Chef::new(0, ChefStrategy::RoundRobin, 3),
///     Chef::new(1, ChefStrategy::RoundRobin, 3),
/// ];
/// // One single-pizza order: the second chef has nothing left to take.
/// let orders = vec![Order::new("alice".to_string(), 1, 5, 1, 3, 3)];
///
/// let plan = policy.plan(&chefs, &orders, &[0]);
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan[0].quantum, Some(2));
/// ```
pub struct RoundRobinPolicy {
    /// Ticks a chef may hold an order before preemption
    quantum: i32,
}

impl RoundRobinPolicy {
    /// Create new RR policy with the given quantum
    pub fn new(quantum: i32) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> i32 {
        self.quantum
    }
}

impl ChefAssignmentPolicy for RoundRobinPolicy {
    fn plan(&self, chefs: &[Chef], orders: &[Order], waiting: &[OrderId]) -> Vec<ChefAssignment> {
        let mut waiting: Vec<OrderId> = waiting.to_vec();
        let mut plan: Vec<ChefAssignment> = Vec::new();

        for chef in chefs.iter().filter(|chef| chef.is_free()) {
            let Some(&target) = waiting.first() else {
                break;
            };

            plan.push(ChefAssignment {
                chef_id: chef.id(),
                order_id: target,
                quantum: Some(self.quantum),
            });

            // Chefs working on the order plus the ones planned this pass.
            let bound = chefs
                .iter()
                .filter(|c| c.current_order() == Some(target))
                .count()
                + plan.iter().filter(|a| a.order_id == target).count();

            let pizzas = orders
                .get(target)
                .map(|order| order.num_pizzas() as usize)
                .unwrap_or(0);
            if bound >= pizzas {
                waiting.remove(0);
            }
        }
        plan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resources::ChefStrategy;

    fn chefs(n: usize) -> Vec<Chef> {
        (0..n)
            .map(|id| Chef::new(id, ChefStrategy::RoundRobin, 3))
            .collect()
    }

    fn order(person: &str, num_pizzas: u32, priority: i32) -> Order {
        Order::new(person.to_string(), num_pizzas, 5, priority, 3, 3)
    }

    #[test]
    fn test_every_assignment_carries_the_quantum() {
        let policy = RoundRobinPolicy::new(4);
        let orders = vec![order("a", 2, 1)];

        let plan = policy.plan(&chefs(2), &orders, &[0]);
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|a| a.quantum == Some(4)));
    }

    #[test]
    fn test_highest_priority_order_absorbs_chefs_first() {
        let policy = RoundRobinPolicy::new(2);
        let orders = vec![order("low", 2, 5), order("high", 2, 1)];

        // Two chefs, the high-priority order has two pizzas: both go there.
        let plan = policy.plan(&chefs(2), &orders, &[1, 0]);
        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|a| a.order_id == 1));
    }

    #[test]
    fn test_chef_slots_capped_at_one_per_pizza() {
        let policy = RoundRobinPolicy::new(2);
        let orders = vec![order("small", 1, 1), order("next", 2, 2)];

        // Three chefs: one slot for the single-pizza order, the rest spill
        // over to the next order in priority.
        let plan = policy.plan(&chefs(3), &orders, &[0, 1]);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[0].order_id, 0);
        assert_eq!(plan[1].order_id, 1);
        assert_eq!(plan[2].order_id, 1);
    }

    #[test]
    fn test_existing_bindings_count_against_the_cap() {
        let policy = RoundRobinPolicy::new(2);
        let mut pool = chefs(2);
        let mut orders = vec![order("a", 2, 1), order("b", 1, 2)];
        pool[0].assign(0, &mut orders[0]).unwrap();

        // Order 0 already has one chef; the free chef fills its second slot
        // only if the waiting list still leads with it.
        let plan = policy.plan(&pool, &orders, &[0, 1]);
        assert_eq!(plan, vec![ChefAssignment {
            chef_id: 1,
            order_id: 0,
            quantum: Some(2),
        }]);
    }

    #[test]
    fn test_no_waiting_orders_plans_nothing() {
        let policy = RoundRobinPolicy::new(2);
        assert!(policy.plan(&chefs(2), &[], &[]).is_empty());
    }
}
