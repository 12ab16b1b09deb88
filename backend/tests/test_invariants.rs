//! Randomized invariant tests
//!
//! Small random configurations, both policies: every run must terminate
//! with all orders delivered and consistent counters, and the progress
//! counters must be monotonic tick over tick.

use proptest::prelude::*;

use pizza_simulator_core_rs::{
    Orchestrator, OrchestratorConfig, OrderConfig, OrderState, PolicyConfig,
};

fn arb_policy() -> impl Strategy<Value = PolicyConfig> {
    prop_oneof![
        Just(PolicyConfig::Focused),
        (1..5i32).prop_map(|quantum| PolicyConfig::RoundRobin { quantum }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn simulation_terminates_with_consistent_counters(
        available_chefs in 1..4usize,
        available_ovens in 1..3usize,
        available_drivers in 1..3usize,
        chef_time in 1..4u32,
        bake_time in 1..4u32,
        chef_policy in arb_policy(),
        order_params in prop::collection::vec((1..4u32, 1..6u32, 0..5i32), 1..5),
    ) {
        let orders: Vec<OrderConfig> = order_params
            .iter()
            .enumerate()
            .map(|(i, &(num_pizzas, delivery_time, priority))| OrderConfig {
                person: format!("person{i}"),
                num_pizzas,
                delivery_time,
                priority,
            })
            .collect();

        let config = OrchestratorConfig {
            available_chefs,
            available_ovens,
            available_drivers,
            chef_time,
            bake_time,
            chef_policy,
            orders,
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();

        let num_orders = orchestrator.state().num_orders();
        let mut previous = vec![(0u32, 0u32); num_orders];
        let mut minutes = 0u32;

        while !orchestrator.is_complete() {
            minutes += 1;
            prop_assert!(minutes <= 10_000, "simulation failed to terminate");
            orchestrator.tick().unwrap();

            for (i, order) in orchestrator.state().orders().iter().enumerate() {
                let prepared = order.pizzas_prepared();
                let baked = order.pizzas_baked();

                // Monotonic, bounded counters.
                prop_assert!(prepared >= previous[i].0);
                prop_assert!(baked >= previous[i].1);
                prop_assert!(prepared <= order.num_pizzas());
                prop_assert!(baked <= order.num_pizzas());
                // Baking a pizza requires having prepared them all first.
                prop_assert!(baked == 0 || prepared == order.num_pizzas());

                previous[i] = (prepared, baked);
            }
        }

        for order in orchestrator.state().orders() {
            prop_assert_eq!(order.state(), OrderState::Delivered);
            prop_assert_eq!(order.pizzas_prepared(), order.num_pizzas());
            prop_assert_eq!(order.pizzas_baked(), order.num_pizzas());
            prop_assert_eq!(order.remaining_delivery_time(), 0);
        }
    }

    #[test]
    fn resources_never_hold_dangling_references(
        available_chefs in 1..4usize,
        chef_time in 1..4u32,
        chef_policy in arb_policy(),
        order_params in prop::collection::vec((1..4u32, 1..4u32, 0..3i32), 1..4),
    ) {
        let orders: Vec<OrderConfig> = order_params
            .iter()
            .enumerate()
            .map(|(i, &(num_pizzas, delivery_time, priority))| OrderConfig {
                person: format!("person{i}"),
                num_pizzas,
                delivery_time,
                priority,
            })
            .collect();

        let config = OrchestratorConfig {
            available_chefs,
            available_ovens: 1,
            available_drivers: 1,
            chef_time,
            bake_time: 2,
            chef_policy,
            orders,
        };
        let mut orchestrator = Orchestrator::new(config).unwrap();
        let num_orders = orchestrator.state().num_orders();

        while !orchestrator.is_complete() {
            orchestrator.tick().unwrap();

            let state = orchestrator.state();
            for chef in state.chefs() {
                if let Some(order_id) = chef.current_order() {
                    prop_assert!(order_id < num_orders);
                }
            }
            for oven in state.ovens() {
                if let Some(order_id) = oven.current_order() {
                    prop_assert!(order_id < num_orders);
                    // A bound oven's order is always mid-bake.
                    prop_assert_eq!(
                        state.orders()[order_id].state(),
                        OrderState::OvenPreparing
                    );
                }
            }
            for driver in state.drivers() {
                if let Some(order_id) = driver.current_order() {
                    prop_assert!(order_id < num_orders);
                    prop_assert_eq!(
                        state.orders()[order_id].state(),
                        OrderState::DriverWaiting
                    );
                }
            }
        }
    }
}
