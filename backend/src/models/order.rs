//! Order model
//!
//! Represents one customer's request as it moves through the three-stage
//! fulfillment pipeline (preparation, baking, delivery). Each order has:
//! - A person name (unique display key)
//! - Static parameters: pizza count, delivery duration, priority
//! - Per-pizza timing constants injected at load time
//! - A state machine with explicit, validated transitions
//! - Progress counters for prepared and baked pizzas
//!
//! Orders are owned exclusively by the simulation's order list; resources
//! refer to them by index ([`OrderId`]), never by shared pointer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index of an order within the simulation's order list.
///
/// Resource units hold `Option<OrderId>` as their non-owning binding.
pub type OrderId = usize;

/// Lifecycle state of an order
///
/// States advance forward along the pipeline and never regress past
/// `OvenWaiting`. The only backward edge is the preparation bounce
/// `Preparing` ⇄ `ChefWaiting` used by quantum-based scheduling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderState {
    /// Loaded, waiting for a first chef
    Pending,

    /// One or more chefs are working on the current pizza
    Preparing,

    /// Preempted by quantum expiry, waiting for a chef again
    ChefWaiting,

    /// All pizzas prepared, waiting for an oven
    OvenWaiting,

    /// An oven is baking the current pizza
    OvenPreparing,

    /// All pizzas baked, waiting for (or riding with) a driver
    DriverWaiting,

    /// Terminal: the order has been delivered
    Delivered,
}

impl OrderState {
    /// Whether `next` is a legal transition from this state.
    ///
    /// This is the single encoding of the transition table; everything else
    /// goes through [`Order::transition_to`].
    pub fn can_transition_to(self, next: OrderState) -> bool {
        use OrderState::*;
        matches!(
            (self, next),
            (Pending, Preparing)
                | (ChefWaiting, Preparing)
                | (Preparing, ChefWaiting)
                | (Preparing, OvenWaiting)
                | (OvenWaiting, OvenPreparing)
                | (OvenPreparing, DriverWaiting)
                | (DriverWaiting, Delivered)
        )
    }

    /// True once the order has left the preparation stage for good.
    ///
    /// Chef assignment treats such orders as stale references.
    pub fn is_past_preparation(self) -> bool {
        use OrderState::*;
        matches!(self, OvenWaiting | OvenPreparing | DriverWaiting | Delivered)
    }

    /// Wire/display name, e.g. `OVEN_WAITING`
    pub fn as_str(self) -> &'static str {
        match self {
            OrderState::Pending => "PENDING",
            OrderState::Preparing => "PREPARING",
            OrderState::ChefWaiting => "CHEF_WAITING",
            OrderState::OvenWaiting => "OVEN_WAITING",
            OrderState::OvenPreparing => "OVEN_PREPARING",
            OrderState::DriverWaiting => "DRIVER_WAITING",
            OrderState::Delivered => "DELIVERED",
        }
    }
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during order state changes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrderError {
    #[error("illegal order state transition {from} -> {to}")]
    IllegalTransition { from: OrderState, to: OrderState },
}

/// Errors raised while parsing an order record line
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseOrderError {
    #[error("expected 4 comma-separated fields, got {0}")]
    FieldCount(usize),

    #[error("field `{field}` is not a valid integer: `{value}`")]
    InvalidNumber { field: &'static str, value: String },
}

/// One order record as read from the input file
///
/// Records use the line format `person,numPizzas,deliveryTime,priority`.
///
/// # Example
/// ```
/// use pizza_simulator_core_rs::OrderConfig;
///
/// let config: OrderConfig = "alice,2,5,1".parse().unwrap();
/// assert_eq!(config.person, "alice");
/// assert_eq!(config.num_pizzas, 2);
/// assert_eq!(config.delivery_time, 5);
/// assert_eq!(config.priority, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Customer name, unique within a run
    pub person: String,

    /// Number of pizzas in the order
    pub num_pizzas: u32,

    /// Total delivery duration once a driver is bound
    pub delivery_time: u32,

    /// Scheduling priority; lower values are served first
    pub priority: i32,
}

impl FromStr for OrderConfig {
    type Err = ParseOrderError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() != 4 {
            return Err(ParseOrderError::FieldCount(fields.len()));
        }

        let parse_u32 = |field: &'static str, value: &str| {
            value
                .parse::<u32>()
                .map_err(|_| ParseOrderError::InvalidNumber {
                    field,
                    value: value.to_string(),
                })
        };

        Ok(OrderConfig {
            person: fields[0].to_string(),
            num_pizzas: parse_u32("numPizzas", fields[1])?,
            delivery_time: parse_u32("deliveryTime", fields[2])?,
            priority: fields[3]
                .parse::<i32>()
                .map_err(|_| ParseOrderError::InvalidNumber {
                    field: "priority",
                    value: fields[3].to_string(),
                })?,
        })
    }
}

/// One customer's order and its progress through the pipeline
///
/// # Example
/// ```
/// use pizza_simulator_core_rs::{Order, OrderState};
///
/// let order = Order::new("alice".to_string(), 2, 5, 1, 2, 3);
/// assert_eq!(order.state(), OrderState::Pending);
/// // A pending order already shows the cost of its first pizza.
/// assert_eq!(order.remaining_prep_time(), 2);
/// assert_eq!(order.remaining_delivery_time(), 5);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Customer name (unique display key)
    person: String,

    /// Number of pizzas in the order
    num_pizzas: u32,

    /// Total delivery duration once a driver is bound
    delivery_time: u32,

    /// Scheduling priority; lower values are served first
    priority: i32,

    /// Preparation time per pizza (shared constant, injected at load)
    chef_time: u32,

    /// Bake time per pizza (shared constant, injected at load)
    bake_time: u32,

    /// Current lifecycle state
    state: OrderState,

    /// Pizzas that fully completed preparation
    pizzas_prepared: u32,

    /// Pizzas that fully completed baking
    pizzas_baked: u32,

    /// Time left on the pizza currently being prepared
    remaining_prep_time: u32,

    /// Time left on the pizza currently being baked; 0 until an oven seeds it
    remaining_bake_time: u32,

    /// Time left on the whole order's delivery
    remaining_delivery_time: u32,
}

impl Order {
    /// Create a new order in `Pending` state.
    ///
    /// `chef_time` and `bake_time` are the per-pizza durations shared by all
    /// orders in a run. The preparation countdown for the first pizza is
    /// seeded immediately so the remaining-time projection is meaningful
    /// before any chef is bound.
    pub fn new(
        person: String,
        num_pizzas: u32,
        delivery_time: u32,
        priority: i32,
        chef_time: u32,
        bake_time: u32,
    ) -> Self {
        Self {
            person,
            num_pizzas,
            delivery_time,
            priority,
            chef_time,
            bake_time,
            state: OrderState::Pending,
            pizzas_prepared: 0,
            pizzas_baked: 0,
            remaining_prep_time: chef_time,
            remaining_bake_time: 0,
            remaining_delivery_time: delivery_time,
        }
    }

    /// Build an order from a parsed record plus the shared timing constants
    pub fn from_config(config: &OrderConfig, chef_time: u32, bake_time: u32) -> Self {
        Self::new(
            config.person.clone(),
            config.num_pizzas,
            config.delivery_time,
            config.priority,
            chef_time,
            bake_time,
        )
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn person(&self) -> &str {
        &self.person
    }

    pub fn num_pizzas(&self) -> u32 {
        self.num_pizzas
    }

    pub fn delivery_time(&self) -> u32 {
        self.delivery_time
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    pub fn pizzas_prepared(&self) -> u32 {
        self.pizzas_prepared
    }

    pub fn pizzas_baked(&self) -> u32 {
        self.pizzas_baked
    }

    pub fn remaining_prep_time(&self) -> u32 {
        self.remaining_prep_time
    }

    pub fn remaining_bake_time(&self) -> u32 {
        self.remaining_bake_time
    }

    pub fn remaining_delivery_time(&self) -> u32 {
        self.remaining_delivery_time
    }

    /// Pizzas not yet baked; each occupies one oven queue slot
    pub fn pizzas_unbaked(&self) -> u32 {
        self.num_pizzas - self.pizzas_baked
    }

    pub fn is_delivered(&self) -> bool {
        self.state == OrderState::Delivered
    }

    // ========================================================================
    // State machine
    // ========================================================================

    /// Move the order to `next`, rejecting transitions outside the table.
    ///
    /// # Example
    /// ```
    /// use pizza_simulator_core_rs::{Order, OrderState};
    ///
    /// let mut order = Order::new("alice".to_string(), 1, 5, 1, 2, 3);
    /// order.transition_to(OrderState::Preparing).unwrap();
    ///
    /// // Skipping the oven is not a thing.
    /// assert!(order.transition_to(OrderState::DriverWaiting).is_err());
    /// ```
    pub fn transition_to(&mut self, next: OrderState) -> Result<(), OrderError> {
        if !self.state.can_transition_to(next) {
            return Err(OrderError::IllegalTransition {
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }

    // ========================================================================
    // Progress counters
    // ========================================================================

    /// Record that the pizza in progress finished preparation.
    ///
    /// Resets the prep countdown for the next pizza while any remain.
    pub fn complete_pizza_prep(&mut self) {
        self.pizzas_prepared += 1;
        if self.pizzas_prepared < self.num_pizzas {
            self.remaining_prep_time = self.chef_time;
        }
    }

    /// Record that the pizza in progress finished baking
    pub fn complete_pizza_bake(&mut self) {
        self.pizzas_baked += 1;
    }

    pub fn set_remaining_prep_time(&mut self, time: u32) {
        self.remaining_prep_time = time;
    }

    pub fn set_remaining_bake_time(&mut self, time: u32) {
        self.remaining_bake_time = time;
    }

    /// Advance preparation by one time unit; never goes below zero
    pub fn decrement_prep_time(&mut self) {
        self.remaining_prep_time = self.remaining_prep_time.saturating_sub(1);
    }

    /// Advance baking by one time unit; never goes below zero
    pub fn decrement_bake_time(&mut self) {
        self.remaining_bake_time = self.remaining_bake_time.saturating_sub(1);
    }

    /// Advance delivery by one time unit; never goes below zero
    pub fn decrement_delivery_time(&mut self) {
        self.remaining_delivery_time = self.remaining_delivery_time.saturating_sub(1);
    }

    // ========================================================================
    // Reporting projections (read-only)
    // ========================================================================

    /// Remaining work in the order's current stage, for display only.
    pub fn total_remaining_time(&self) -> u32 {
        match self.state {
            OrderState::Pending => self.num_pizzas * self.chef_time,
            OrderState::Preparing => {
                self.remaining_prep_time
                    + (self.num_pizzas - (self.pizzas_prepared + 1)) * self.chef_time
            }
            OrderState::ChefWaiting => 0,
            OrderState::OvenWaiting => self.bake_time * self.num_pizzas,
            OrderState::OvenPreparing => self.remaining_bake_time,
            OrderState::DriverWaiting => self.delivery_time,
            OrderState::Delivered => self.remaining_delivery_time,
        }
    }

    /// Pizzas counted as done within the current stage, for display only.
    pub fn done_in_current_state(&self) -> u32 {
        match self.state {
            OrderState::OvenPreparing => self.pizzas_baked,
            OrderState::Delivered => self.num_pizzas,
            _ => 0,
        }
    }

    /// Pizzas counted as pending within the current stage, for display only.
    pub fn pending_in_current_state(&self) -> u32 {
        match self.state {
            OrderState::Pending | OrderState::Preparing | OrderState::ChefWaiting => {
                self.num_pizzas
            }
            OrderState::OvenWaiting | OrderState::OvenPreparing => {
                self.num_pizzas - self.pizzas_baked
            }
            OrderState::DriverWaiting => self.num_pizzas,
            OrderState::Delivered => 0,
        }
    }
}
