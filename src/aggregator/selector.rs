//! Event selection by profiling intent and time window.
//!
//! On-CPU profiles count execution samples. Off-CPU profiles count the
//! events where a thread was parked, sleeping, blocked on a monitor or
//! waiting on socket and file I/O.

use crate::parser::{Event, EventSource};
use crate::utils::config::NANOS_PER_SECOND;
use crate::utils::error::{ConfigError, SelectionError};
use log::debug;
use std::fmt;

/// Profiling intent selected with `--profile-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileType {
    /// Time spent executing (1)
    Cpu,
    /// Time spent blocked or waiting (2)
    OffCpu,
}

impl TryFrom<i64> for ProfileType {
    type Error = ConfigError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ProfileType::Cpu),
            2 => Ok(ProfileType::OffCpu),
            other => Err(ConfigError::InvalidProfileType(other)),
        }
    }
}

impl ProfileType {
    pub fn description(&self) -> &'static str {
        match self {
            ProfileType::Cpu => "CPU profiling",
            ProfileType::OffCpu => "Off-CPU profiling",
        }
    }
}

/// Event types the converter knows how to select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    ExecutionSample,
    ThreadPark,
    SocketRead,
    SocketWrite,
    FileWrite,
    FileRead,
    MonitorWait,
    MonitorBlocked,
    ThreadSleep,
}

impl EventType {
    /// Event type identifier used by current JDKs
    pub fn id(&self) -> &'static str {
        match self {
            EventType::ExecutionSample => "jdk.ExecutionSample",
            EventType::ThreadPark => "jdk.ThreadPark",
            EventType::SocketRead => "jdk.SocketRead",
            EventType::SocketWrite => "jdk.SocketWrite",
            EventType::FileWrite => "jdk.FileWrite",
            EventType::FileRead => "jdk.FileRead",
            EventType::MonitorWait => "jdk.JavaMonitorWait",
            EventType::MonitorBlocked => "jdk.JavaMonitorEnter",
            EventType::ThreadSleep => "jdk.ThreadSleep",
        }
    }

    /// Display label, as written by older recorders
    pub fn label(&self) -> &'static str {
        match self {
            EventType::ExecutionSample => "Method Profiling Sample",
            EventType::ThreadPark => "Java Thread Park",
            EventType::SocketRead => "Socket Read",
            EventType::SocketWrite => "Socket Write",
            EventType::FileWrite => "File Write",
            EventType::FileRead => "File Read",
            EventType::MonitorWait => "Java Monitor Wait",
            EventType::MonitorBlocked => "Java Monitor Blocked",
            EventType::ThreadSleep => "Java Thread Sleep",
        }
    }

    pub fn matches(&self, name: &str) -> bool {
        name == self.id() || name == self.label()
    }
}

/// Event types relevant to one profiling intent, fixed for the whole run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTypeSet {
    types: Vec<EventType>,
}

impl EventTypeSet {
    /// Build the set for a profiling intent
    pub fn for_profile(profile: ProfileType) -> Self {
        let types = match profile {
            ProfileType::Cpu => vec![EventType::ExecutionSample],
            ProfileType::OffCpu => vec![
                EventType::ThreadPark,
                EventType::SocketRead,
                EventType::SocketWrite,
                EventType::FileWrite,
                EventType::FileRead,
                EventType::MonitorWait,
                EventType::MonitorBlocked,
                EventType::ThreadSleep,
            ],
        };
        Self { types }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.iter().any(|t| t.matches(name))
    }

    pub fn types(&self) -> &[EventType] {
        &self.types
    }
}

impl fmt::Display for EventTypeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.types.iter().map(EventType::id).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// Inclusive time window in epoch nanoseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start_nanos: i64,
    pub end_nanos: i64,
}

impl TimeWindow {
    pub fn new(start_nanos: i64, end_nanos: i64) -> Self {
        Self {
            start_nanos,
            end_nanos,
        }
    }

    /// Build a window from second-granularity CLI bounds
    ///
    /// A bound of 0 means "not given". Returns `None` when neither bound
    /// is given; a missing start or end leaves that side open.
    pub fn from_seconds(
        start_seconds: i64,
        end_seconds: i64,
    ) -> Result<Option<Self>, ConfigError> {
        if start_seconds <= 0 && end_seconds <= 0 {
            return Ok(None);
        }

        let start_nanos = start_seconds.max(0).saturating_mul(NANOS_PER_SECOND);
        let end_nanos = if end_seconds > 0 {
            end_seconds.saturating_mul(NANOS_PER_SECOND)
        } else {
            i64::MAX
        };

        if start_nanos > end_nanos {
            return Err(ConfigError::InvalidTimeWindow {
                start: start_seconds,
                end: end_seconds,
            });
        }

        Ok(Some(Self::new(start_nanos, end_nanos)))
    }

    /// True when the instant lies inside the window, bounds included
    pub fn contains(&self, nanos: i64) -> bool {
        self.start_nanos <= nanos && nanos <= self.end_nanos
    }

    /// True when the event's start or end lies inside the window
    ///
    /// An event that starts before the window and ends after it has
    /// neither end inside and is rejected.
    pub fn admits(&self, start_nanos: i64, end_nanos: i64) -> bool {
        self.contains(start_nanos) || self.contains(end_nanos)
    }
}

/// Decide whether an event counts toward the profile
///
/// **Public** - pure predicate used by the pipeline driver
pub fn accept(event: &Event, event_types: &EventTypeSet, window: Option<&TimeWindow>) -> bool {
    if !event_types.contains(&event.type_name) {
        return false;
    }

    match window {
        Some(window) => window.admits(event.start_nanos, event.end_nanos),
        None => true,
    }
}

/// Fail fast when no event type in the recording matches the set
///
/// **Public** - preflight check run before iterating events
pub fn check_event_types(
    source: &dyn EventSource,
    event_types: &EventTypeSet,
) -> Result<(), SelectionError> {
    let catalog = source.event_types();
    debug!("Recording contains event types: {:?}", catalog);

    if catalog.iter().any(|name| event_types.contains(name)) {
        Ok(())
    } else {
        Err(SelectionError::NoMatchingEventTypes(event_types.to_string()))
    }
}
