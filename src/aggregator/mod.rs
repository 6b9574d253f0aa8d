//! Event selection and stack normalization.
//!
//! This module decides which recorded events count toward a profile and
//! turns each counted event's stack trace into frame labels:
//! - Event type sets per profiling intent (on-CPU / off-CPU)
//! - Time window filtering
//! - Root-first stacks with the omit-first-seen-package rule

pub mod selector;
pub mod stack_builder;

// Re-export main types and functions
pub use selector::{
    accept, check_event_types, EventType, EventTypeSet, ProfileType, TimeWindow,
};
pub use stack_builder::{ignored_stack, normalize, Stack};
