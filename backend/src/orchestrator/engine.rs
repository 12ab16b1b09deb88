//! Orchestrator Engine
//!
//! Main simulation loop integrating all components:
//! - Chef assignment under the configured policy (FOCUSED or RR)
//! - Oven and driver assignment (priority order, first free unit)
//! - Work advancement for every resource pool in fixed order
//! - Event logging (complete order history)
//! - Per-minute snapshots of every order and resource
//!
//! # Architecture
//!
//! Each call to [`Orchestrator::tick`] runs one simulated minute:
//!
//! ```text
//! For each minute m:
//! 1. Assign free chefs to waiting orders (policy decision)
//! 2. Assign free ovens to OVEN_WAITING orders
//! 3. Assign free drivers to DRIVER_WAITING orders
//! 4. work() every chef, then every oven, then every driver,
//!    each pool in ascending id order
//! 5. Snapshot all orders and resources
//! 6. Advance the minute counter
//! ```
//!
//! The loop terminates when every order is `Delivered`, checked before each
//! iteration; the caller owns the loop so it can render each minute as it
//! completes.
//!
//! # Example
//!
//! ```rust
//! use pizza_simulator_core_rs::orchestrator::{Orchestrator, OrchestratorConfig, PolicyConfig};
//! use pizza_simulator_core_rs::OrderConfig;
//!
//! let config = OrchestratorConfig {
//!     available_chefs: 1,
//!     available_ovens: 1,
//!     available_drivers: 1,
//!     chef_time: 2,
//!     bake_time: 3,
//!     chef_policy: PolicyConfig::Focused,
//!     orders: vec![OrderConfig {
//!         person: "alice".to_string(),
//!         num_pizzas: 2,
//!         delivery_time: 5,
//!         priority: 1,
//!     }],
//! };
//!
//! let mut orchestrator = Orchestrator::new(config).unwrap();
//! while !orchestrator.is_complete() {
//!     let result = orchestrator.tick().unwrap();
//!     println!("minute {}: {} orders tracked", result.minute, result.orders.len());
//! }
//! ```

use std::collections::HashSet;

use serde::Serialize;

use crate::core::time::TimeManager;
use crate::models::event::{Event, EventLog};
use crate::models::order::{Order, OrderConfig, OrderState};
use crate::models::resources::{Chef, ChefStrategy, Driver, Oven, ResourceError};
use crate::models::state::SimulationState;
use crate::policy::{ChefAssignmentPolicy, FocusedPolicy, RoundRobinPolicy};

// ============================================================================
// Configuration Types
// ============================================================================

/// Complete orchestrator configuration
///
/// Contains all parameters needed to initialize a simulation run.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Number of chefs in the preparation pool
    pub available_chefs: usize,

    /// Number of ovens in the baking pool
    pub available_ovens: usize,

    /// Number of drivers in the delivery pool
    pub available_drivers: usize,

    /// Preparation time per pizza
    pub chef_time: u32,

    /// Bake time per pizza
    pub bake_time: u32,

    /// Chef scheduling policy
    pub chef_policy: PolicyConfig,

    /// Order records, in arrival order
    pub orders: Vec<OrderConfig>,
}

/// Chef policy selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyConfig {
    /// FOCUSED: every free chef on the single highest-priority order
    Focused,

    /// RR: per-chef binding, preemptible after `quantum` ticks
    RoundRobin {
        /// Ticks a chef may hold an order before preemption
        quantum: i32,
    },
}

impl PolicyConfig {
    /// The strategy label resources carry for this policy
    pub fn strategy(&self) -> ChefStrategy {
        match self {
            PolicyConfig::Focused => ChefStrategy::Focused,
            PolicyConfig::RoundRobin { .. } => ChefStrategy::RoundRobin,
        }
    }
}

// ============================================================================
// Results & Errors
// ============================================================================

/// Per-order observation within a [`TickResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSnapshot {
    pub person: String,
    pub state: OrderState,
    pub done: u32,
    pub pending: u32,
    pub total_remaining: u32,
}

impl From<&Order> for OrderSnapshot {
    fn from(order: &Order) -> Self {
        Self {
            person: order.person().to_string(),
            state: order.state(),
            done: order.done_in_current_state(),
            pending: order.pending_in_current_state(),
            total_remaining: order.total_remaining_time(),
        }
    }
}

/// Per-chef observation within a [`TickResult`]
///
/// `remaining_quantum` is populated only for RR chefs with a bound order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChefSnapshot {
    pub id: usize,
    pub person: Option<String>,
    pub remaining_quantum: Option<i32>,
}

/// Per-oven / per-driver observation within a [`TickResult`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceSnapshot {
    pub id: usize,
    pub person: Option<String>,
}

/// Result of a single simulated minute
#[derive(Debug, Clone, Serialize)]
pub struct TickResult {
    /// Minute number (1-based)
    pub minute: u32,

    /// One entry per order, in arrival order
    pub orders: Vec<OrderSnapshot>,

    /// One entry per chef, in id order
    pub chefs: Vec<ChefSnapshot>,

    /// One entry per oven, in id order
    pub ovens: Vec<ResourceSnapshot>,

    /// One entry per driver, in id order
    pub drivers: Vec<ResourceSnapshot>,
}

/// Simulation error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Configuration validation error
    InvalidConfig(String),

    /// A policy produced a reference to an order that does not exist
    OrderNotFound(usize),

    /// A scheduling invariant was broken (double binding, illegal transition)
    InvariantViolation(String),

    /// `run_to_completion` hit its minute cap before all orders delivered
    MinuteLimitExceeded(u32),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::InvalidConfig(msg) => write!(f, "Invalid config: {}", msg),
            SimulationError::OrderNotFound(id) => write!(f, "Order not found: {}", id),
            SimulationError::InvariantViolation(msg) => {
                write!(f, "Invariant violation: {}", msg)
            }
            SimulationError::MinuteLimitExceeded(limit) => {
                write!(f, "Simulation did not complete within {} minutes", limit)
            }
        }
    }
}

impl std::error::Error for SimulationError {}

impl From<ResourceError> for SimulationError {
    fn from(err: ResourceError) -> Self {
        SimulationError::InvariantViolation(err.to_string())
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator managing simulation state and the tick loop
///
/// Owns all simulation state and coordinates assignment, work advancement,
/// event logging and snapshots.
///
/// # Determinism
///
/// There is no randomness anywhere: pools iterate in ascending id order,
/// waiting lists sort stably by priority, and shared-order mutation happens
/// in that fixed order. Same config = identical results.
pub struct Orchestrator {
    /// Simulation state (orders, chefs, ovens, drivers)
    state: SimulationState,

    /// Time management
    time: TimeManager,

    /// Chef assignment planner
    policy: Box<dyn ChefAssignmentPolicy>,

    /// Event log (all simulation events)
    event_log: EventLog,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("state", &self.state)
            .field("time", &self.time)
            .field("policy", &"<dyn ChefAssignmentPolicy>")
            .field("event_log", &self.event_log)
            .finish()
    }
}

impl Orchestrator {
    /// Create a new orchestrator from configuration
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidConfig` when any resource count or
    /// timing is non-positive, the RR quantum is non-positive, an order has
    /// zero pizzas or a zero delivery time, or two orders share a person.
    pub fn new(config: OrchestratorConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let orders: Vec<Order> = config
            .orders
            .iter()
            .map(|record| Order::from_config(record, config.chef_time, config.bake_time))
            .collect();

        let strategy = config.chef_policy.strategy();
        let chefs: Vec<Chef> = (0..config.available_chefs)
            .map(|id| Chef::new(id, strategy, config.chef_time))
            .collect();
        let ovens: Vec<Oven> = (0..config.available_ovens)
            .map(|id| Oven::new(id, config.bake_time))
            .collect();
        let drivers: Vec<Driver> = (0..config.available_drivers).map(Driver::new).collect();

        let policy: Box<dyn ChefAssignmentPolicy> = match config.chef_policy {
            PolicyConfig::Focused => Box::new(FocusedPolicy::new()),
            PolicyConfig::RoundRobin { quantum } => Box::new(RoundRobinPolicy::new(quantum)),
        };

        Ok(Self {
            state: SimulationState::new(orders, chefs, ovens, drivers),
            time: TimeManager::new(),
            policy,
            event_log: EventLog::new(),
        })
    }

    /// Validate configuration
    fn validate_config(config: &OrchestratorConfig) -> Result<(), SimulationError> {
        if config.available_chefs == 0 {
            return Err(SimulationError::InvalidConfig(
                "available_chefs must be > 0".to_string(),
            ));
        }
        if config.available_ovens == 0 {
            return Err(SimulationError::InvalidConfig(
                "available_ovens must be > 0".to_string(),
            ));
        }
        if config.available_drivers == 0 {
            return Err(SimulationError::InvalidConfig(
                "available_drivers must be > 0".to_string(),
            ));
        }
        if config.chef_time == 0 {
            return Err(SimulationError::InvalidConfig(
                "chef_time must be > 0".to_string(),
            ));
        }
        if config.bake_time == 0 {
            return Err(SimulationError::InvalidConfig(
                "bake_time must be > 0".to_string(),
            ));
        }
        if let PolicyConfig::RoundRobin { quantum } = config.chef_policy {
            if quantum <= 0 {
                return Err(SimulationError::InvalidConfig(
                    "chef_quantum must be > 0 for the RR strategy".to_string(),
                ));
            }
        }

        // Check per-order parameters and duplicate person keys
        let mut people = HashSet::new();
        for record in &config.orders {
            if record.num_pizzas == 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "order for {} must have at least one pizza",
                    record.person
                )));
            }
            if record.delivery_time == 0 {
                return Err(SimulationError::InvalidConfig(format!(
                    "order for {} must have a positive delivery time",
                    record.person
                )));
            }
            if !people.insert(&record.person) {
                return Err(SimulationError::InvalidConfig(format!(
                    "Duplicate person: {}",
                    record.person
                )));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the current minute (the one the next `tick` will simulate)
    pub fn current_minute(&self) -> u32 {
        self.time.current_minute()
    }

    /// Get reference to simulation state
    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Get mutable reference to simulation state
    ///
    /// Primarily for testing. Direct state mutation bypasses orchestrator
    /// invariants; use with caution.
    pub fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.state
    }

    /// Get reference to the event log
    pub fn event_log(&self) -> &EventLog {
        &self.event_log
    }

    /// True when every order has been delivered
    pub fn is_complete(&self) -> bool {
        self.state.all_delivered()
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Execute one simulated minute
    ///
    /// Runs the three assignment phases, advances every resource pool in
    /// fixed order, and returns the end-of-minute snapshot.
    ///
    /// # Errors
    ///
    /// Any `InvariantViolation` or `OrderNotFound` here indicates a bug in
    /// an assignment policy; nothing in a valid run produces one.
    pub fn tick(&mut self) -> Result<TickResult, SimulationError> {
        let minute = self.time.current_minute();

        // STEP 1: ASSIGNMENT (chefs, then ovens, then drivers)
        self.assign_chefs(minute)?;
        self.assign_ovens(minute)?;
        self.assign_drivers()?;

        // STEP 2: WORK (same pool order; ascending id within each pool)
        self.work_chefs(minute)?;
        self.work_ovens(minute)?;
        self.work_drivers(minute)?;

        // STEP 3: OBSERVATION
        let result = self.snapshot(minute);

        self.time.advance_minute();
        Ok(result)
    }

    /// Drive ticks until every order is delivered, collecting the results.
    ///
    /// `max_minutes` caps the run so a configuration bug cannot spin
    /// forever; a valid configuration always terminates well before any
    /// sensible cap.
    pub fn run_to_completion(
        &mut self,
        max_minutes: u32,
    ) -> Result<Vec<TickResult>, SimulationError> {
        let mut results = Vec::new();
        while !self.is_complete() {
            if self.time.current_minute() > max_minutes {
                return Err(SimulationError::MinuteLimitExceeded(max_minutes));
            }
            results.push(self.tick()?);
        }
        Ok(results)
    }

    // ========================================================================
    // Assignment phases
    // ========================================================================

    fn assign_chefs(&mut self, minute: u32) -> Result<(), SimulationError> {
        let waiting = self.state.chef_waiting_queue();
        let plan = self
            .policy
            .plan(self.state.chefs(), self.state.orders(), &waiting);

        let (orders, chefs, _, _) = self.state.split_mut();
        let mut events = Vec::new();
        for assignment in plan {
            let chef = chefs.get_mut(assignment.chef_id).ok_or_else(|| {
                SimulationError::InvariantViolation(format!(
                    "policy referenced unknown chef {}",
                    assignment.chef_id
                ))
            })?;
            let order = orders
                .get_mut(assignment.order_id)
                .ok_or(SimulationError::OrderNotFound(assignment.order_id))?;

            if let Some(quantum) = assignment.quantum {
                chef.set_remaining_quantum(quantum);
            }
            let state_before = order.state();
            chef.assign(assignment.order_id, order)?;
            if order.state() != state_before {
                events.push(Event::StateChanged {
                    minute,
                    person: order.person().to_string(),
                    from: state_before,
                    to: order.state(),
                });
            }
        }

        for event in events {
            self.event_log.log(event);
        }
        Ok(())
    }

    fn assign_ovens(&mut self, minute: u32) -> Result<(), SimulationError> {
        let entries = self.state.oven_waiting_queue();
        let (orders, _, ovens, _) = self.state.split_mut();

        let mut events = Vec::new();
        for order_id in entries {
            let order = orders
                .get_mut(order_id)
                .ok_or(SimulationError::OrderNotFound(order_id))?;
            // Duplicate entries of an order some oven already took this
            // tick are no longer OvenWaiting; skip them.
            if order.state() != OrderState::OvenWaiting {
                continue;
            }
            let Some(oven) = ovens.iter_mut().find(|oven| oven.is_free()) else {
                break;
            };
            oven.assign(order_id, order)?;
            events.push(Event::StateChanged {
                minute,
                person: order.person().to_string(),
                from: OrderState::OvenWaiting,
                to: order.state(),
            });
        }

        for event in events {
            self.event_log.log(event);
        }
        Ok(())
    }

    fn assign_drivers(&mut self) -> Result<(), SimulationError> {
        let waiting = self.state.driver_waiting_queue();
        let (_, _, _, drivers) = self.state.split_mut();

        for order_id in waiting {
            let Some(driver) = drivers.iter_mut().find(|driver| driver.is_free()) else {
                break;
            };
            driver.assign(order_id)?;
        }
        Ok(())
    }

    // ========================================================================
    // Work phases
    // ========================================================================

    fn work_chefs(&mut self, minute: u32) -> Result<(), SimulationError> {
        let (orders, chefs, _, _) = self.state.split_mut();
        let mut events = Vec::new();

        for chef in chefs.iter_mut() {
            let watched = chef.current_order();
            let before = watched
                .and_then(|id| orders.get(id))
                .map(|order| (order.state(), order.pizzas_prepared()));

            chef.work(orders)?;

            if let (Some(order_id), Some((state_before, prepared_before))) = (watched, before) {
                if let Some(order) = orders.get(order_id) {
                    if order.pizzas_prepared() > prepared_before {
                        events.push(Event::PizzaPrepared {
                            minute,
                            person: order.person().to_string(),
                            prepared: order.pizzas_prepared(),
                        });
                    }
                    if order.state() != state_before {
                        events.push(Event::StateChanged {
                            minute,
                            person: order.person().to_string(),
                            from: state_before,
                            to: order.state(),
                        });
                    }
                }
            }
        }

        for event in events {
            self.event_log.log(event);
        }
        Ok(())
    }

    fn work_ovens(&mut self, minute: u32) -> Result<(), SimulationError> {
        let (orders, _, ovens, _) = self.state.split_mut();
        let mut events = Vec::new();

        for oven in ovens.iter_mut() {
            let watched = oven.current_order();
            let before = watched
                .and_then(|id| orders.get(id))
                .map(|order| (order.state(), order.pizzas_baked()));

            oven.work(orders)?;

            if let (Some(order_id), Some((state_before, baked_before))) = (watched, before) {
                if let Some(order) = orders.get(order_id) {
                    if order.pizzas_baked() > baked_before {
                        events.push(Event::PizzaBaked {
                            minute,
                            person: order.person().to_string(),
                            baked: order.pizzas_baked(),
                        });
                    }
                    if order.state() != state_before {
                        events.push(Event::StateChanged {
                            minute,
                            person: order.person().to_string(),
                            from: state_before,
                            to: order.state(),
                        });
                    }
                }
            }
        }

        for event in events {
            self.event_log.log(event);
        }
        Ok(())
    }

    fn work_drivers(&mut self, minute: u32) -> Result<(), SimulationError> {
        let (orders, _, _, drivers) = self.state.split_mut();
        let mut events = Vec::new();

        for driver in drivers.iter_mut() {
            let watched = driver.current_order();
            let state_before = watched.and_then(|id| orders.get(id)).map(|order| order.state());

            driver.work(orders)?;

            if let (Some(order_id), Some(state_before)) = (watched, state_before) {
                if let Some(order) = orders.get(order_id) {
                    if order.state() != state_before {
                        events.push(Event::StateChanged {
                            minute,
                            person: order.person().to_string(),
                            from: state_before,
                            to: order.state(),
                        });
                    }
                }
            }
        }

        for event in events {
            self.event_log.log(event);
        }
        Ok(())
    }

    // ========================================================================
    // Observation
    // ========================================================================

    fn snapshot(&self, minute: u32) -> TickResult {
        let person_of = |order_id| {
            self.state
                .order(order_id)
                .map(|order| order.person().to_string())
        };

        TickResult {
            minute,
            orders: self.state.orders().iter().map(OrderSnapshot::from).collect(),
            chefs: self
                .state
                .chefs()
                .iter()
                .map(|chef| ChefSnapshot {
                    id: chef.id(),
                    person: chef.current_order().and_then(person_of),
                    remaining_quantum: match (chef.strategy(), chef.current_order()) {
                        (ChefStrategy::RoundRobin, Some(_)) => Some(chef.remaining_quantum()),
                        _ => None,
                    },
                })
                .collect(),
            ovens: self
                .state
                .ovens()
                .iter()
                .map(|oven| ResourceSnapshot {
                    id: oven.id(),
                    person: oven.current_order().and_then(person_of),
                })
                .collect(),
            drivers: self
                .state
                .drivers()
                .iter()
                .map(|driver| ResourceSnapshot {
                    id: driver.id(),
                    person: driver.current_order().and_then(person_of),
                })
                .collect(),
        }
    }
}
