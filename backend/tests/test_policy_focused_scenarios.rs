//! Scenario tests for the FOCUSED chef policy
//!
//! These walk full simulations minute by minute and pin the exact timings
//! the assignment and work cycles must produce, including the multi-chef
//! shared-counter compounding.

use pizza_simulator_core_rs::{
    Event, Orchestrator, OrchestratorConfig, OrderConfig, OrderState, PolicyConfig,
};

fn config(chefs: usize, orders: Vec<OrderConfig>) -> OrchestratorConfig {
    OrchestratorConfig {
        available_chefs: chefs,
        available_ovens: 1,
        available_drivers: 1,
        chef_time: 2,
        bake_time: 3,
        chef_policy: PolicyConfig::Focused,
        orders,
    }
}

fn order(person: &str, num_pizzas: u32, delivery_time: u32, priority: i32) -> OrderConfig {
    OrderConfig {
        person: person.to_string(),
        num_pizzas,
        delivery_time,
        priority,
    }
}

/// 1 chef, 1 oven, 1 driver, chef_time=2, bake_time=3, order alice,2,5,1:
/// OVEN_WAITING at minute 4, DRIVER_WAITING at minute 10, DELIVERED at 15.
#[test]
fn test_single_order_full_pipeline_timings() {
    let mut orchestrator =
        Orchestrator::new(config(1, vec![order("alice", 2, 5, 1)])).unwrap();

    let results = orchestrator.run_to_completion(100).unwrap();
    assert_eq!(results.len(), 15);

    let state_at = |minute: usize| results[minute - 1].orders[0].state;
    assert_eq!(state_at(1), OrderState::Preparing);
    assert_eq!(state_at(3), OrderState::Preparing);
    assert_eq!(state_at(4), OrderState::OvenWaiting);
    assert_eq!(state_at(5), OrderState::OvenPreparing);
    assert_eq!(state_at(9), OrderState::OvenPreparing);
    assert_eq!(state_at(10), OrderState::DriverWaiting);
    assert_eq!(state_at(14), OrderState::DriverWaiting);
    assert_eq!(state_at(15), OrderState::Delivered);

    let delivered = orchestrator.state().orders()[0].clone();
    assert_eq!(delivered.pizzas_prepared(), 2);
    assert_eq!(delivered.pizzas_baked(), 2);
    assert_eq!(delivered.remaining_delivery_time(), 0);
}

#[test]
fn test_single_order_resource_bindings_over_time() {
    let mut orchestrator =
        Orchestrator::new(config(1, vec![order("alice", 2, 5, 1)])).unwrap();

    let results = orchestrator.run_to_completion(100).unwrap();

    // Chef holds the order through the whole preparation stage.
    for minute in 1..=3 {
        assert_eq!(
            results[minute - 1].chefs[0].person.as_deref(),
            Some("alice"),
            "minute {minute}"
        );
    }
    assert_eq!(results[3].chefs[0].person, None);

    // Oven holds it from assignment until the last pizza finishes baking.
    for minute in 5..=9 {
        assert_eq!(
            results[minute - 1].ovens[0].person.as_deref(),
            Some("alice"),
            "minute {minute}"
        );
    }
    assert_eq!(results[9].ovens[0].person, None);

    // Driver runs exactly delivery_time ticks: bound minutes 11..=14,
    // released during minute 15.
    for minute in 11..=14 {
        assert_eq!(
            results[minute - 1].drivers[0].person.as_deref(),
            Some("alice"),
            "minute {minute}"
        );
    }
    assert_eq!(results[14].drivers[0].person, None);
}

/// N chefs on one order each advance the shared prep countdown once per
/// tick, in ascending chef id order.
#[test]
fn test_multiple_chefs_compound_on_one_order() {
    let mut config = config(3, vec![order("alice", 2, 5, 1)]);
    config.chef_time = 3;
    let mut orchestrator = Orchestrator::new(config).unwrap();

    // Minute 1: three decrements reach zero, first pizza done, countdown
    // reseeded by the finishing chef.
    orchestrator.tick().unwrap();
    {
        let alice = &orchestrator.state().orders()[0];
        assert_eq!(alice.pizzas_prepared(), 1);
        assert_eq!(alice.remaining_prep_time(), 3);
        assert_eq!(alice.state(), OrderState::Preparing);
    }

    // Minute 2: the second pizza finishes the same way; a 6-minute
    // preparation collapses into 2 minutes with 3 chefs.
    orchestrator.tick().unwrap();
    let alice = &orchestrator.state().orders()[0];
    assert_eq!(alice.pizzas_prepared(), 2);
    assert_eq!(alice.state(), OrderState::OvenWaiting);
}

/// All free chefs gang onto the highest-priority waiting order; the rest
/// starve until it leaves the preparation stage.
#[test]
fn test_focused_starves_lower_priority_until_first_order_leaves_prep() {
    let mut orchestrator = Orchestrator::new(config(
        2,
        vec![order("urgent", 2, 5, 1), order("casual", 1, 5, 2)],
    ))
    .unwrap();

    // chef_time=2, 2 chefs on urgent: pizza finishes every minute.
    let first = orchestrator.tick().unwrap();
    assert_eq!(first.chefs[0].person.as_deref(), Some("urgent"));
    assert_eq!(first.chefs[1].person.as_deref(), Some("urgent"));
    assert_eq!(first.orders[1].state, OrderState::Pending);

    // Minute 2: chef 1 finishes the last urgent pizza and unbinds; chef 0
    // is still holding its stale binding when the minute ends.
    let second = orchestrator.tick().unwrap();
    assert_eq!(second.orders[0].state, OrderState::OvenWaiting);
    assert_eq!(second.chefs[0].person.as_deref(), Some("urgent"));
    assert_eq!(second.chefs[1].person, None);

    // Minute 3: only chef 1 was free at assignment time, so casual gets one
    // chef; chef 0 silently drops its stale binding during work.
    let third = orchestrator.tick().unwrap();
    assert_eq!(third.chefs[0].person, None);
    assert_eq!(third.chefs[1].person.as_deref(), Some("casual"));
    assert_eq!(third.orders[1].state, OrderState::Preparing);

    // Minute 4: casual's single pizza completes.
    let fourth = orchestrator.tick().unwrap();
    assert_eq!(fourth.orders[1].state, OrderState::OvenWaiting);
}

#[test]
fn test_event_log_covers_the_whole_lifecycle() {
    let mut orchestrator =
        Orchestrator::new(config(1, vec![order("alice", 2, 5, 1)])).unwrap();
    orchestrator.run_to_completion(100).unwrap();

    let log = orchestrator.event_log();
    let transitions: Vec<(u32, OrderState)> = log
        .events()
        .iter()
        .filter_map(|event| match event {
            Event::StateChanged { minute, to, .. } => Some((*minute, *to)),
            _ => None,
        })
        .collect();

    assert_eq!(
        transitions,
        vec![
            (1, OrderState::Preparing),
            (4, OrderState::OvenWaiting),
            (5, OrderState::OvenPreparing),
            (10, OrderState::DriverWaiting),
            (15, OrderState::Delivered),
        ]
    );

    // Two pizzas prepared, two baked.
    let prepared: Vec<u32> = log
        .events()
        .iter()
        .filter_map(|event| match event {
            Event::PizzaPrepared { minute, .. } => Some(*minute),
            _ => None,
        })
        .collect();
    assert_eq!(prepared, vec![2, 4]);

    let baked: Vec<u32> = log
        .events()
        .iter()
        .filter_map(|event| match event {
            Event::PizzaBaked { minute, .. } => Some(*minute),
            _ => None,
        })
        .collect();
    assert_eq!(baked, vec![7, 10]);
}
