//! Input JSON schema for recording dumps.
//!
//! Mirrors the structure written by `jfr print --json`. Only the fields the
//! converter needs are declared; everything else in the dump is ignored.

use serde::Deserialize;

/// Top-level dump: either the `jfr print --json` wrapper or a bare event array
///
/// `Events` must stay first: a one-element array would otherwise also
/// deserialize as the `Wrapped` struct.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RecordingDump {
    Events(Vec<RawEvent>),
    Wrapped { recording: RawRecording },
}

impl RecordingDump {
    /// Consume the dump and return its events in file order
    pub fn into_events(self) -> Vec<RawEvent> {
        match self {
            RecordingDump::Events(events) => events,
            RecordingDump::Wrapped { recording } => recording.events,
        }
    }
}

/// The `recording` object of a wrapped dump
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecording {
    #[serde(default)]
    pub events: Vec<RawEvent>,
}

/// A single event as it appears in the dump
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Event type name (e.g. "jdk.ExecutionSample")
    #[serde(rename = "type")]
    pub event_type: String,

    /// Event field values
    #[serde(default)]
    pub values: RawEventValues,
}

/// Field values of an event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEventValues {
    #[serde(default, rename = "startTime")]
    pub start_time: Option<TimeValue>,

    #[serde(default)]
    pub duration: Option<TimeValue>,

    /// Absent or `null` when the event has no stack
    #[serde(default, rename = "stackTrace")]
    pub stack_trace: Option<RawStackTrace>,
}

/// Timestamps and durations are printed as ISO-8601 text, but plain
/// nanosecond integers are accepted as well
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    Nanos(i64),
    Text(String),
}

/// Recorded stack trace, frames ordered leaf first
#[derive(Debug, Clone, Deserialize)]
pub struct RawStackTrace {
    #[serde(default)]
    pub truncated: bool,

    #[serde(default)]
    pub frames: Vec<RawFrame>,
}

/// One stack frame
#[derive(Debug, Clone, Deserialize)]
pub struct RawFrame {
    pub method: RawMethod,

    #[serde(default, rename = "lineNumber")]
    pub line_number: Option<i32>,
}

/// Method reference of a frame
#[derive(Debug, Clone, Deserialize)]
pub struct RawMethod {
    /// Declaring class
    #[serde(rename = "type")]
    pub class: RawClass,

    pub name: String,

    /// JVM method descriptor, e.g. "(Ljava/lang/String;)V"
    #[serde(default)]
    pub descriptor: String,
}

/// Declaring class of a method
#[derive(Debug, Clone, Deserialize)]
pub struct RawClass {
    pub name: String,
}
