//! Simulation State
//!
//! Owns the complete state of one simulation run: the order list and the
//! three resource pools. Orders are referenced everywhere else by their
//! index in the list ([`OrderId`]); the list is append-only and orders are
//! never removed, so indices stay valid for the lifetime of a run.
//!
//! # Critical Invariants
//!
//! 1. **Stable identity**: an order's index never changes once loaded
//! 2. **Forward-only lifecycle**: orders never regress past `OvenWaiting`
//! 3. **Stable priority order**: waiting lists sort by ascending priority
//!    with ties kept in arrival order

use serde::{Deserialize, Serialize};

use crate::models::order::{Order, OrderId, OrderState};
use crate::models::resources::{Chef, Driver, Oven};

/// Complete state of a running simulation
///
/// # Example
/// ```
/// use pizza_simulator_core_rs::{Chef, ChefStrategy, Driver, Order, Oven, SimulationState};
///
/// let orders = vec![Order::new("alice".to_string(), 2, 5, 1, 2, 3)];
/// let chefs = vec![Chef::new(0, ChefStrategy::Focused, 2)];
/// let ovens = vec![Oven::new(0, 3)];
/// let drivers = vec![Driver::new(0)];
///
/// let state = SimulationState::new(orders, chefs, ovens, drivers);
/// assert_eq!(state.num_orders(), 1);
/// assert!(!state.all_delivered());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationState {
    /// All orders, in arrival order; index is the order's identity
    orders: Vec<Order>,

    /// Preparation pool
    chefs: Vec<Chef>,

    /// Baking pool
    ovens: Vec<Oven>,

    /// Delivery pool
    drivers: Vec<Driver>,
}

impl SimulationState {
    pub fn new(orders: Vec<Order>, chefs: Vec<Chef>, ovens: Vec<Oven>, drivers: Vec<Driver>) -> Self {
        Self {
            orders,
            chefs,
            ovens,
            drivers,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn chefs(&self) -> &[Chef] {
        &self.chefs
    }

    pub fn ovens(&self) -> &[Oven] {
        &self.ovens
    }

    pub fn drivers(&self) -> &[Driver] {
        &self.drivers
    }

    pub fn num_orders(&self) -> usize {
        self.orders.len()
    }

    /// Split into disjoint mutable borrows of the order list and the three
    /// pools, so assignment and work phases can mutate a resource and its
    /// bound order at the same time.
    pub fn split_mut(&mut self) -> (&mut [Order], &mut [Chef], &mut [Oven], &mut [Driver]) {
        (
            &mut self.orders,
            &mut self.chefs,
            &mut self.ovens,
            &mut self.drivers,
        )
    }

    /// Termination condition for the tick loop
    pub fn all_delivered(&self) -> bool {
        self.orders.iter().all(|order| order.is_delivered())
    }

    // ========================================================================
    // Waiting lists
    // ========================================================================

    /// Orders eligible for a chef (`Pending` or `ChefWaiting`), ascending by
    /// priority; ties keep arrival order.
    pub fn chef_waiting_queue(&self) -> Vec<OrderId> {
        let mut waiting: Vec<OrderId> = self
            .orders
            .iter()
            .enumerate()
            .filter(|(_, order)| {
                matches!(order.state(), OrderState::Pending | OrderState::ChefWaiting)
            })
            .map(|(id, _)| id)
            .collect();
        waiting.sort_by_key(|&id| self.orders[id].priority());
        waiting
    }

    /// Oven queue entries, ascending by priority: one entry per remaining
    /// unbaked pizza of each `OvenWaiting` order, so a multi-pizza order
    /// occupies multiple slots.
    pub fn oven_waiting_queue(&self) -> Vec<OrderId> {
        let mut entries: Vec<OrderId> = Vec::new();
        for (id, order) in self.orders.iter().enumerate() {
            if order.state() == OrderState::OvenWaiting {
                for _ in 0..order.pizzas_unbaked() {
                    entries.push(id);
                }
            }
        }
        entries.sort_by_key(|&id| self.orders[id].priority());
        entries
    }

    /// Orders eligible for a driver, ascending by priority
    pub fn driver_waiting_queue(&self) -> Vec<OrderId> {
        let mut waiting: Vec<OrderId> = self
            .orders
            .iter()
            .enumerate()
            .filter(|(_, order)| order.state() == OrderState::DriverWaiting)
            .map(|(id, _)| id)
            .collect();
        waiting.sort_by_key(|&id| self.orders[id].priority());
        waiting
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resources::ChefStrategy;

    fn order(person: &str, num_pizzas: u32, priority: i32) -> Order {
        Order::new(person.to_string(), num_pizzas, 5, priority, 2, 3)
    }

    fn state_with_orders(orders: Vec<Order>) -> SimulationState {
        SimulationState::new(
            orders,
            vec![Chef::new(0, ChefStrategy::Focused, 2)],
            vec![Oven::new(0, 3)],
            vec![Driver::new(0)],
        )
    }

    #[test]
    fn test_chef_queue_sorted_by_priority_with_stable_ties() {
        let state = state_with_orders(vec![
            order("late-high", 1, 2),
            order("first-low", 1, 5),
            order("second-low", 1, 5),
            order("urgent", 1, 1),
        ]);

        assert_eq!(state.chef_waiting_queue(), vec![3, 0, 1, 2]);
    }

    #[test]
    fn test_chef_queue_excludes_orders_past_preparation() {
        let mut orders = vec![order("a", 1, 1), order("b", 1, 2)];
        orders[0].transition_to(OrderState::Preparing).unwrap();
        orders[0].transition_to(OrderState::OvenWaiting).unwrap();
        let state = state_with_orders(orders);

        assert_eq!(state.chef_waiting_queue(), vec![1]);
    }

    #[test]
    fn test_oven_queue_has_one_entry_per_unbaked_pizza() {
        let mut orders = vec![order("a", 3, 2), order("b", 1, 1)];
        for o in orders.iter_mut() {
            o.transition_to(OrderState::Preparing).unwrap();
            o.transition_to(OrderState::OvenWaiting).unwrap();
        }
        let state = state_with_orders(orders);

        assert_eq!(state.oven_waiting_queue(), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_driver_queue_only_driver_waiting_orders() {
        let mut orders = vec![order("a", 1, 2), order("b", 1, 1)];
        orders[0].transition_to(OrderState::Preparing).unwrap();
        orders[0].transition_to(OrderState::OvenWaiting).unwrap();
        orders[0].transition_to(OrderState::OvenPreparing).unwrap();
        orders[0].transition_to(OrderState::DriverWaiting).unwrap();
        let state = state_with_orders(orders);

        assert_eq!(state.driver_waiting_queue(), vec![0]);
    }

    #[test]
    fn test_all_delivered() {
        let mut orders = vec![order("a", 1, 1)];
        assert!(!state_with_orders(orders.clone()).all_delivered());

        orders[0].transition_to(OrderState::Preparing).unwrap();
        orders[0].transition_to(OrderState::OvenWaiting).unwrap();
        orders[0].transition_to(OrderState::OvenPreparing).unwrap();
        orders[0].transition_to(OrderState::DriverWaiting).unwrap();
        orders[0].transition_to(OrderState::Delivered).unwrap();
        assert!(state_with_orders(orders).all_delivered());
    }

    #[test]
    fn test_all_delivered_on_empty_order_list() {
        let state = state_with_orders(Vec::new());
        assert!(state.all_delivered());
    }
}
