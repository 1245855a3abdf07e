//! Event logging for auditing generator use.
//!
//! This module defines the Event enum which records every operation run
//! through the service facade. Events enable:
//! - Auditing (which parameters were used, how many bits were consumed)
//! - Debugging (why an operation failed, how many draws were rejected)
//! - Advisory warnings (factors that are not Blum primes)
//!
//! The event log never feeds back into any result.
//!
//! # Example
//!
//! ```rust
//! use bbs_demo_core_rs::models::{Event, OperationKind};
//!
//! let event = Event::OperationCompleted {
//!     operation: 1,
//!     kind: OperationKind::Encrypt,
//!     steps: 5,
//!     bits_drawn: 40,
//! };
//!
//! assert_eq!(event.operation(), 1);
//! assert_eq!(event.event_type(), "OperationCompleted");
//! ```

use serde::Serialize;

/// Kind of operation the service ran
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum OperationKind {
    Encrypt,
    Decrypt,
    Spin,
    Shuffle,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Encrypt => "encrypt",
            OperationKind::Decrypt => "decrypt",
            OperationKind::Spin => "spin",
            OperationKind::Shuffle => "shuffle",
        }
    }
}

/// Audit event
///
/// All events carry the sequence number of the operation they belong to.
/// Events are logged in the order they occur.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A fresh generator was built for an operation
    GeneratorCreated {
        operation: u64,
        kind: OperationKind,
        modulus_bits: u64,
    },

    /// A factor is not ≡ 3 mod 4 (advisory, the operation still runs)
    NonBlumParameter {
        operation: u64,
        name: String,
        residue: u32,
    },

    /// Operation finished
    OperationCompleted {
        operation: u64,
        kind: OperationKind,
        steps: usize,
        bits_drawn: u64,
    },

    /// Shuffle discarded out-of-range draws
    ShuffleRejections { operation: u64, rejected: usize },

    /// Operation failed; no result was produced
    OperationFailed {
        operation: u64,
        kind: OperationKind,
        reason: String,
    },
}

impl Event {
    /// Get the operation sequence number
    pub fn operation(&self) -> u64 {
        match self {
            Event::GeneratorCreated { operation, .. } => *operation,
            Event::NonBlumParameter { operation, .. } => *operation,
            Event::OperationCompleted { operation, .. } => *operation,
            Event::ShuffleRejections { operation, .. } => *operation,
            Event::OperationFailed { operation, .. } => *operation,
        }
    }

    /// Get a short description of the event type
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::GeneratorCreated { .. } => "GeneratorCreated",
            Event::NonBlumParameter { .. } => "NonBlumParameter",
            Event::OperationCompleted { .. } => "OperationCompleted",
            Event::ShuffleRejections { .. } => "ShuffleRejections",
            Event::OperationFailed { .. } => "OperationFailed",
        }
    }

    /// Get the operation kind if the event records it
    pub fn kind(&self) -> Option<OperationKind> {
        match self {
            Event::GeneratorCreated { kind, .. } => Some(*kind),
            Event::OperationCompleted { kind, .. } => Some(*kind),
            Event::OperationFailed { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Event log for storing and querying audit events.
///
/// This is a simple wrapper around Vec<Event> with convenience methods.
#[derive(Debug, Clone, Default)]
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

    /// Get events for a specific operation
    pub fn events_for_operation(&self, operation: u64) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.operation() == operation)
            .collect()
    }

    /// Get events of a specific type
    pub fn events_of_type(&self, event_type: &str) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Clear all events
    pub fn clear(&mut self) {
        self.events.clear();
    }
}
