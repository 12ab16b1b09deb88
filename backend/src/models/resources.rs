//! Resource units: chefs, ovens, and drivers
//!
//! Each unit holds at most one non-owning order binding (an [`OrderId`]
//! index) and advances that order by one time unit per call to `work`. A
//! binding is released when the bound order's state no longer matches the
//! unit's working state, when the unit finishes its stage of the order, or
//! (round-robin chefs) when the quantum runs out.
//!
//! `work` never fails on a stale binding; it silently unbinds. The only
//! errors these types produce are invariant violations that indicate a bug
//! in the assignment policy, and illegal state transitions bubbling up from
//! the order model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::order::{Order, OrderError, OrderId, OrderState};

/// Chef scheduling strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChefStrategy {
    /// All free chefs gang up on the single highest-priority waiting order
    Focused,

    /// Each free chef takes the highest-priority waiting order for at most
    /// one quantum of ticks
    RoundRobin,
}

impl ChefStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            ChefStrategy::Focused => "FOCUSED",
            ChefStrategy::RoundRobin => "RR",
        }
    }
}

impl fmt::Display for ChefStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the wire names `FOCUSED` and `RR`
impl FromStr for ChefStrategy {
    type Err = ParseStrategyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "FOCUSED" => Ok(ChefStrategy::Focused),
            "RR" => Ok(ChefStrategy::RoundRobin),
            other => Err(ParseStrategyError(other.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("chef strategy must be either FOCUSED or RR, got `{0}`")]
pub struct ParseStrategyError(pub String);

/// Invariant violations raised by resource binding
///
/// Unreachable under the shipped assignment policies; any occurrence is a
/// scheduling bug and aborts the run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResourceError {
    #[error("chef {0} is already working on an order")]
    ChefBusy(usize),

    #[error("oven {0} is already baking for an order")]
    OvenBusy(usize),

    #[error("driver {0} is already out on a delivery")]
    DriverBusy(usize),

    #[error(transparent)]
    Order(#[from] OrderError),
}

/// A chef slot in the preparation pool
///
/// # Example
/// ```
/// use pizza_simulator_core_rs::{Chef, ChefStrategy, Order, OrderState};
///
/// let mut chef = Chef::new(0, ChefStrategy::Focused, 2);
/// let mut orders = vec![Order::new("alice".to_string(), 1, 5, 1, 2, 3)];
///
/// chef.assign(0, &mut orders[0]).unwrap();
/// assert_eq!(orders[0].state(), OrderState::Preparing);
///
/// chef.work(&mut orders).unwrap();
/// assert_eq!(orders[0].remaining_prep_time(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chef {
    /// Pool-unique id; pools iterate in ascending id order
    id: usize,

    /// Scheduling strategy this chef operates under
    strategy: ChefStrategy,

    /// Preparation time seeded per pizza
    prep_time: u32,

    /// Bound order, if any
    current_order: Option<OrderId>,

    /// Ticks left before a round-robin chef must let go; unused for FOCUSED
    remaining_quantum: i32,
}

impl Chef {
    pub fn new(id: usize, strategy: ChefStrategy, prep_time: u32) -> Self {
        Self {
            id,
            strategy,
            prep_time,
            current_order: None,
            remaining_quantum: 0,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn strategy(&self) -> ChefStrategy {
        self.strategy
    }

    pub fn is_free(&self) -> bool {
        self.current_order.is_none()
    }

    pub fn current_order(&self) -> Option<OrderId> {
        self.current_order
    }

    pub fn remaining_quantum(&self) -> i32 {
        self.remaining_quantum
    }

    pub fn set_remaining_quantum(&mut self, quantum: i32) {
        self.remaining_quantum = quantum;
    }

    /// Bind this chef to `order`.
    ///
    /// Rejects double-binding a FOCUSED chef. Orders already past the
    /// preparation stage are stale references and the call is a no-op.
    /// Accepting a `Pending` or `ChefWaiting` order moves it to `Preparing`
    /// and seeds the prep countdown if it is zero.
    pub fn assign(&mut self, order_id: OrderId, order: &mut Order) -> Result<(), ResourceError> {
        if self.current_order.is_some() && self.strategy == ChefStrategy::Focused {
            return Err(ResourceError::ChefBusy(self.id));
        }

        if order.state().is_past_preparation() {
            return Ok(());
        }

        self.current_order = Some(order_id);
        if matches!(order.state(), OrderState::Pending | OrderState::ChefWaiting) {
            order.transition_to(OrderState::Preparing)?;
        }
        if order.remaining_prep_time() == 0 {
            order.set_remaining_prep_time(self.prep_time);
        }
        Ok(())
    }

    /// Advance the bound order's preparation by one time unit.
    ///
    /// A bound order that has left `Preparing` (another chef finished it
    /// this tick) is silently released with no side effects. Under RR the
    /// quantum is spent one tick at a time and, when exhausted without the
    /// current pizza completing, the order is preempted back to
    /// `ChefWaiting`.
    pub fn work(&mut self, orders: &mut [Order]) -> Result<(), ResourceError> {
        let Some(order_id) = self.current_order else {
            return Ok(());
        };
        let Some(order) = orders.get_mut(order_id) else {
            self.current_order = None;
            return Ok(());
        };

        if order.state() != OrderState::Preparing {
            self.current_order = None;
            return Ok(());
        }

        order.decrement_prep_time();
        if self.strategy == ChefStrategy::RoundRobin {
            self.remaining_quantum -= 1;
        }

        if order.remaining_prep_time() == 0 {
            order.complete_pizza_prep();

            if order.pizzas_prepared() == order.num_pizzas() {
                order.transition_to(OrderState::OvenWaiting)?;
                self.current_order = None;
            } else if self.strategy == ChefStrategy::RoundRobin && self.remaining_quantum <= 0 {
                order.transition_to(OrderState::ChefWaiting)?;
                self.current_order = None;
            }
        } else if self.strategy == ChefStrategy::RoundRobin && self.remaining_quantum <= 0 {
            // Quantum ran out mid-pizza: preempt without progress.
            order.transition_to(OrderState::ChefWaiting)?;
            self.current_order = None;
        }
        Ok(())
    }
}

/// An oven slot in the baking pool
///
/// Bakes pizzas for one order strictly sequentially: exactly one pizza in
/// flight at a time, the countdown reseeded per pizza.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Oven {
    id: usize,

    /// Bake time seeded per pizza
    bake_time: u32,

    current_order: Option<OrderId>,
}

impl Oven {
    pub fn new(id: usize, bake_time: u32) -> Self {
        Self {
            id,
            bake_time,
            current_order: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_free(&self) -> bool {
        self.current_order.is_none()
    }

    pub fn current_order(&self) -> Option<OrderId> {
        self.current_order
    }

    /// Bind this oven to `order`.
    ///
    /// Only an `OvenWaiting` order is accepted; anything else is a stale
    /// queue entry and the call is a no-op. In particular an order some
    /// other oven already took this tick is `OvenPreparing` by the time the
    /// duplicate entry is walked, so one order never runs in two ovens.
    pub fn assign(&mut self, order_id: OrderId, order: &mut Order) -> Result<(), ResourceError> {
        if self.current_order.is_some() {
            return Err(ResourceError::OvenBusy(self.id));
        }
        if order.state() != OrderState::OvenWaiting {
            return Ok(());
        }

        self.current_order = Some(order_id);
        order.transition_to(OrderState::OvenPreparing)?;
        if order.remaining_bake_time() == 0 {
            order.set_remaining_bake_time(self.bake_time);
        }
        Ok(())
    }

    /// Advance the bound order's baking by one time unit.
    pub fn work(&mut self, orders: &mut [Order]) -> Result<(), ResourceError> {
        let Some(order_id) = self.current_order else {
            return Ok(());
        };
        let Some(order) = orders.get_mut(order_id) else {
            self.current_order = None;
            return Ok(());
        };

        if order.state() != OrderState::OvenPreparing {
            self.current_order = None;
            return Ok(());
        }

        order.decrement_bake_time();
        if order.remaining_bake_time() == 0 {
            order.complete_pizza_bake();

            if order.pizzas_baked() == order.num_pizzas() {
                order.transition_to(OrderState::DriverWaiting)?;
                self.current_order = None;
            } else {
                // Next pizza of the same order; the binding holds.
                order.set_remaining_bake_time(self.bake_time);
            }
        }
        Ok(())
    }
}

/// A driver slot in the delivery pool
///
/// Drivers never preempt; once bound they run the delivery to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    id: usize,
    current_order: Option<OrderId>,
}

impl Driver {
    pub fn new(id: usize) -> Self {
        Self {
            id,
            current_order: None,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn is_free(&self) -> bool {
        self.current_order.is_none()
    }

    pub fn current_order(&self) -> Option<OrderId> {
        self.current_order
    }

    /// Bind this driver to an order; the delivery countdown was fixed when
    /// the order was created.
    pub fn assign(&mut self, order_id: OrderId) -> Result<(), ResourceError> {
        if self.current_order.is_some() {
            return Err(ResourceError::DriverBusy(self.id));
        }
        self.current_order = Some(order_id);
        Ok(())
    }

    /// Advance the bound order's delivery by one time unit.
    pub fn work(&mut self, orders: &mut [Order]) -> Result<(), ResourceError> {
        let Some(order_id) = self.current_order else {
            return Ok(());
        };
        let Some(order) = orders.get_mut(order_id) else {
            self.current_order = None;
            return Ok(());
        };

        order.decrement_delivery_time();
        if order.remaining_delivery_time() == 0 {
            order.transition_to(OrderState::Delivered)?;
            self.current_order = None;
        }
        Ok(())
    }
}
