//! Command-line front end for the pizza fulfillment simulator.
//!
//! Thin adapter around the core engine: parses flags, loads the order file,
//! runs the tick loop and renders one block of output per simulated minute.
//! Exits 0 on a completed simulation, 1 with a single `Error: <message>`
//! line on any configuration or input problem.

use std::env;
use std::fs;
use std::io;
use std::process;
use std::str::FromStr;

use log::{debug, info};
use thiserror::Error;

use pizza_simulator_core_rs::{
    ChefStrategy, Orchestrator, OrchestratorConfig, OrderConfig, ParseOrderError, PolicyConfig,
    SimulationError, TickResult,
};

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}")]
    Usage(String),

    #[error("cannot read order file `{path}`: {source}")]
    OrderFile { path: String, source: io::Error },

    #[error("invalid order record `{line}`: {source}")]
    OrderFormat {
        line: String,
        source: ParseOrderError,
    },

    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Fully parsed command line
#[derive(Debug)]
struct CliArgs {
    input_file: String,
    available_chefs: usize,
    available_ovens: usize,
    available_drivers: usize,
    bake_time: u32,
    chef_time: u32,
    chef_strategy: ChefStrategy,
    chef_quantum: Option<i32>,
}

fn parse_number<T: FromStr>(flag: &str, value: &str) -> Result<T, CliError> {
    value
        .parse::<T>()
        .map_err(|_| CliError::Usage(format!("invalid value for {flag}: `{value}`")))
}

/// Parse flags, accepting both `--key value` and `--key=value` forms.
fn parse_args(args: &[String]) -> Result<CliArgs, CliError> {
    let mut input_file = None;
    let mut available_chefs = None;
    let mut available_ovens = None;
    let mut available_drivers = None;
    let mut bake_time = None;
    let mut chef_time = None;
    let mut chef_strategy = None;
    let mut chef_quantum = None;

    let mut i = 0;
    while i < args.len() {
        let (flag, value) = match args[i].split_once('=') {
            Some((flag, value)) => (flag.to_string(), value.to_string()),
            None => {
                let flag = args[i].clone();
                i += 1;
                match args.get(i) {
                    Some(value) => (flag, value.clone()),
                    None => {
                        return Err(CliError::Usage(format!(
                            "missing value for argument: {flag}"
                        )))
                    }
                }
            }
        };

        match flag.as_str() {
            "--input-file" => input_file = Some(value),
            "--available-chefs" => available_chefs = Some(parse_number::<usize>(&flag, &value)?),
            "--available-ovens" => available_ovens = Some(parse_number::<usize>(&flag, &value)?),
            "--available-drivers" => {
                available_drivers = Some(parse_number::<usize>(&flag, &value)?)
            }
            "--bake-time" => bake_time = Some(parse_number::<u32>(&flag, &value)?),
            "--chef-time" => chef_time = Some(parse_number::<u32>(&flag, &value)?),
            "--chef-strategy" => {
                chef_strategy = Some(
                    value
                        .parse::<ChefStrategy>()
                        .map_err(|err| CliError::Usage(err.to_string()))?,
                )
            }
            "--chef-quantum" => chef_quantum = Some(parse_number::<i32>(&flag, &value)?),
            other => return Err(CliError::Usage(format!("unknown argument: {other}"))),
        }
        i += 1;
    }

    fn require<T>(name: &str, value: Option<T>) -> Result<T, CliError> {
        value.ok_or_else(|| CliError::Usage(format!("missing required argument {name}")))
    }

    Ok(CliArgs {
        input_file: require("--input-file", input_file)?,
        available_chefs: require("--available-chefs", available_chefs)?,
        available_ovens: require("--available-ovens", available_ovens)?,
        available_drivers: require("--available-drivers", available_drivers)?,
        bake_time: require("--bake-time", bake_time)?,
        chef_time: require("--chef-time", chef_time)?,
        chef_strategy: require("--chef-strategy", chef_strategy)?,
        chef_quantum,
    })
}

/// Read and parse the order file, one record per line.
fn load_orders(path: &str) -> Result<Vec<OrderConfig>, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::OrderFile {
        path: path.to_string(),
        source,
    })?;

    contents
        .lines()
        .map(|line| {
            line.parse::<OrderConfig>()
                .map_err(|source| CliError::OrderFormat {
                    line: line.to_string(),
                    source,
                })
        })
        .collect()
}

/// Render one minute of simulation output.
fn print_minute(result: &TickResult) {
    println!("==== MINUTE {}", result.minute);

    for order in &result.orders {
        println!(
            "{},{},{},{},{}",
            order.person, order.state, order.done, order.pending, order.total_remaining
        );
    }

    for chef in &result.chefs {
        match (&chef.person, chef.remaining_quantum) {
            (Some(person), Some(quantum)) => println!("Chef{},{},{}", chef.id, person, quantum),
            (Some(person), None) => println!("Chef{},{}", chef.id, person),
            (None, _) => println!("Chef{},None", chef.id),
        }
    }
    for oven in &result.ovens {
        match &oven.person {
            Some(person) => println!("Oven{},{}", oven.id, person),
            None => println!("Oven{},None", oven.id),
        }
    }
    for driver in &result.drivers {
        match &driver.person {
            Some(person) => println!("Driver{},{}", driver.id, person),
            None => println!("Driver{},None", driver.id),
        }
    }
}

fn run(raw_args: &[String]) -> Result<(), CliError> {
    let args = parse_args(raw_args)?;

    let chef_policy = match args.chef_strategy {
        ChefStrategy::Focused => PolicyConfig::Focused,
        ChefStrategy::RoundRobin => match args.chef_quantum {
            Some(quantum) => PolicyConfig::RoundRobin { quantum },
            None => {
                return Err(CliError::Usage(
                    "--chef-quantum is required for the RR strategy".to_string(),
                ))
            }
        },
    };

    let orders = load_orders(&args.input_file)?;
    info!("loaded {} orders from {}", orders.len(), args.input_file);

    let config = OrchestratorConfig {
        available_chefs: args.available_chefs,
        available_ovens: args.available_ovens,
        available_drivers: args.available_drivers,
        chef_time: args.chef_time,
        bake_time: args.bake_time,
        chef_policy,
        orders,
    };

    let mut orchestrator = Orchestrator::new(config)?;
    while !orchestrator.is_complete() {
        let result = orchestrator.tick()?;
        print_minute(&result);
    }
    debug!(
        "simulation finished after {} minutes, {} events logged",
        orchestrator.current_minute().saturating_sub(1),
        orchestrator.event_log().len()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(err) = run(&args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_both_flag_forms() {
        let parsed = parse_args(&args(&[
            "--input-file=orders.txt",
            "--available-chefs",
            "2",
            "--available-ovens=1",
            "--available-drivers",
            "1",
            "--bake-time=3",
            "--chef-time",
            "2",
            "--chef-strategy=RR",
            "--chef-quantum",
            "4",
        ]))
        .unwrap();

        assert_eq!(parsed.input_file, "orders.txt");
        assert_eq!(parsed.available_chefs, 2);
        assert_eq!(parsed.chef_strategy, ChefStrategy::RoundRobin);
        assert_eq!(parsed.chef_quantum, Some(4));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let err = parse_args(&args(&["--frobnicate", "1"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_missing_value_rejected() {
        let err = parse_args(&args(&["--available-chefs"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_missing_required_flag_rejected() {
        let err = parse_args(&args(&["--input-file", "orders.txt"])).unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_invalid_strategy_rejected() {
        let err = parse_args(&args(&[
            "--input-file=o.txt",
            "--available-chefs=1",
            "--available-ovens=1",
            "--available-drivers=1",
            "--bake-time=3",
            "--chef-time=2",
            "--chef-strategy=LIFO",
        ]))
        .unwrap_err();
        assert!(matches!(err, CliError::Usage(_)));
    }
}
