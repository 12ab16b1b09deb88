//! Event logging for debugging and post-run analysis.
//!
//! The engine appends an event for every observable change an order goes
//! through: state transitions and per-pizza completions. The per-tick
//! snapshot remains the primary output; the log exists so tests and tools
//! can ask "what happened to this order, and when" without replaying
//! console output.

use serde::{Deserialize, Serialize};

use crate::models::order::OrderState;

/// A significant state change, stamped with the minute it happened in.
///
/// Events are logged in the order they occur within a tick, which under the
/// fixed chef → oven → driver iteration makes the log deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// An order moved between lifecycle states
    StateChanged {
        minute: u32,
        person: String,
        from: OrderState,
        to: OrderState,
    },

    /// A pizza finished preparation; `prepared` is the new counter value
    PizzaPrepared {
        minute: u32,
        person: String,
        prepared: u32,
    },

    /// A pizza finished baking; `baked` is the new counter value
    PizzaBaked {
        minute: u32,
        person: String,
        baked: u32,
    },
}

impl Event {
    /// Minute the event occurred in
    pub fn minute(&self) -> u32 {
        match self {
            Event::StateChanged { minute, .. }
            | Event::PizzaPrepared { minute, .. }
            | Event::PizzaBaked { minute, .. } => *minute,
        }
    }

    /// Person whose order the event belongs to
    pub fn person(&self) -> &str {
        match self {
            Event::StateChanged { person, .. }
            | Event::PizzaPrepared { person, .. }
            | Event::PizzaBaked { person, .. } => person,
        }
    }
}

/// Append-only log of simulation events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Add an event to the log
    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Get the number of events logged
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the log is empty
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Get all events
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Get events for a specific minute
    pub fn events_at_minute(&self, minute: u32) -> Vec<&Event> {
        self.events.iter().filter(|e| e.minute() == minute).collect()
    }

    /// Get events for a specific person's order
    pub fn events_for_person(&self, person: &str) -> Vec<&Event> {
        self.events.iter().filter(|e| e.person() == person).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_filter() {
        let mut log = EventLog::new();
        assert!(log.is_empty());

        log.log(Event::StateChanged {
            minute: 1,
            person: "alice".to_string(),
            from: OrderState::Pending,
            to: OrderState::Preparing,
        });
        log.log(Event::PizzaPrepared {
            minute: 2,
            person: "alice".to_string(),
            prepared: 1,
        });
        log.log(Event::PizzaBaked {
            minute: 5,
            person: "bob".to_string(),
            baked: 1,
        });

        assert_eq!(log.len(), 3);
        assert_eq!(log.events_at_minute(2).len(), 1);
        assert_eq!(log.events_for_person("alice").len(), 2);
        assert_eq!(log.events_for_person("carol").len(), 0);
    }
}
