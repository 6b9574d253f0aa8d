//! Recording model and loader.
//!
//! Reads a JSON event dump into immutable `Event` values and exposes them
//! through the `EventSource` trait, which is all the conversion pipeline
//! needs to know about a recording.

use super::decompress::decompress_to_temp;
use super::descriptor::{render_method, RenderOptions};
use super::schema::{RawEvent, RawFrame, RawStackTrace, RecordingDump, TimeValue};
use crate::utils::config::NANOS_PER_SECOND;
use crate::utils::error::LoadError;
use chrono::DateTime;
use log::{debug, info};
use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Method reference of a stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Declaring class, qualified with dots
    pub class_name: String,
    pub name: String,
    /// JVM descriptor, may be empty when the dump omits it
    pub descriptor: String,
}

impl Method {
    pub fn new(
        class_name: impl Into<String>,
        name: impl Into<String>,
        descriptor: impl Into<String>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            name: name.into(),
            descriptor: descriptor.into(),
        }
    }

    /// Human-readable method label
    pub fn render(&self, options: &RenderOptions) -> String {
        render_method(&self.class_name, &self.name, &self.descriptor, options)
    }
}

/// A single stack frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub method: Method,
    pub line_number: Option<u32>,
}

impl Frame {
    pub fn new(method: Method, line_number: Option<u32>) -> Self {
        Self {
            method,
            line_number,
        }
    }

    /// Frame label: rendered method plus `:<line>` when enabled and known
    pub fn label(&self, options: &RenderOptions) -> String {
        let mut label = self.method.render(options);
        if options.line_numbers {
            if let Some(line) = self.line_number {
                label.push(':');
                label.push_str(&line.to_string());
            }
        }
        label
    }
}

/// Recorded call stack, frames ordered leaf first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StackTrace {
    pub frames: Vec<Frame>,

    /// The recorder hit its stack depth limit; root frames are missing
    pub truncated: bool,
}

/// A recorded event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub type_name: String,
    pub start_nanos: i64,
    pub end_nanos: i64,
    pub duration_nanos: i64,
    pub stack_trace: Option<StackTrace>,
}

impl Event {
    /// Build an event; the end timestamp is derived from start and duration
    pub fn new(
        type_name: impl Into<String>,
        start_nanos: i64,
        duration_nanos: i64,
        stack_trace: Option<StackTrace>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            start_nanos,
            end_nanos: start_nanos.saturating_add(duration_nanos),
            duration_nanos,
            stack_trace,
        }
    }
}

/// Closed time interval in epoch nanoseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start_nanos: i64,
    pub end_nanos: i64,
}

impl TimeRange {
    pub fn duration_nanos(&self) -> i64 {
        self.end_nanos.saturating_sub(self.start_nanos)
    }
}

/// What the conversion pipeline needs from a loaded recording
///
/// **Public** - implemented by `Recording`, and by in-memory sources in tests
pub trait EventSource {
    /// Overall time range covered by the recording
    fn time_range(&self) -> TimeRange;

    /// Distinct event-type names present in the recording
    fn event_types(&self) -> Vec<&str>;

    /// All events, in recording order
    fn events(&self) -> Box<dyn Iterator<Item = &Event> + '_>;
}

/// A fully loaded recording
#[derive(Debug, Clone, Default)]
pub struct Recording {
    events: Vec<Event>,
    event_types: BTreeSet<String>,
    time_range: TimeRange,
}

impl Recording {
    /// Build a recording from already decoded events
    pub fn new(events: Vec<Event>) -> Self {
        let event_types = events.iter().map(|e| e.type_name.clone()).collect();

        let time_range = match (
            events.iter().map(|e| e.start_nanos).min(),
            events.iter().map(|e| e.end_nanos).max(),
        ) {
            (Some(start_nanos), Some(end_nanos)) => TimeRange {
                start_nanos,
                end_nanos,
            },
            _ => TimeRange::default(),
        };

        Self {
            events,
            event_types,
            time_range,
        }
    }

    /// Parse a JSON event dump
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let dump: RecordingDump = serde_json::from_reader(reader)?;
        let raw_events = dump.into_events();

        let events = raw_events
            .into_iter()
            .enumerate()
            .map(|(index, raw)| convert_event(index, raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(events))
    }

    /// Parse a JSON event dump held in memory
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::from_reader(json.as_bytes())
    }

    /// Open and parse a dump file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        debug!("Reading recording from: {}", path.display());

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Number of events whose stack trace was cut at the depth limit
    pub fn truncated_stacks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.stack_trace.as_ref().is_some_and(|s| s.truncated))
            .count()
    }
}

impl EventSource for Recording {
    fn time_range(&self) -> TimeRange {
        self.time_range
    }

    fn event_types(&self) -> Vec<&str> {
        self.event_types.iter().map(String::as_str).collect()
    }

    fn events(&self) -> Box<dyn Iterator<Item = &Event> + '_> {
        Box::new(self.events.iter())
    }
}

/// Load a recording from disk, gunzipping it first if requested
///
/// **Public** - main entry point for loading
///
/// # Errors
/// * `LoadError::Io` - file cannot be opened
/// * `LoadError::Decompress` - gzip stream is invalid
/// * `LoadError::Json` / `LoadError::InvalidFormat` - dump cannot be decoded
pub fn load_recording(path: impl AsRef<Path>, decompress: bool) -> Result<Recording, LoadError> {
    let path = path.as_ref();

    let recording = if decompress {
        // Removed when dropped at the end of this scope
        let temp = decompress_to_temp(path)?;
        Recording::from_path(temp.path())?
    } else {
        Recording::from_path(path)?
    };

    info!(
        "Loaded {} events ({} event types) from {}",
        recording.len(),
        recording.event_types.len(),
        path.display()
    );

    let truncated = recording.truncated_stacks();
    if truncated > 0 {
        debug!(
            "{} stack traces are truncated; their root frames are missing",
            truncated
        );
    }

    Ok(recording)
}

/// Convert a dump event into the model
///
/// **Private** - internal helper for from_reader
fn convert_event(index: usize, raw: RawEvent) -> Result<Event, LoadError> {
    let start_time = raw.values.start_time.as_ref().ok_or_else(|| {
        LoadError::InvalidFormat(format!(
            "event {} ({}) has no startTime",
            index, raw.event_type
        ))
    })?;
    let start_nanos = parse_instant(start_time)?;

    let duration_nanos = match &raw.values.duration {
        Some(duration) => parse_duration(duration)?,
        None => 0,
    };

    let stack_trace = raw.values.stack_trace.map(convert_stack_trace);

    Ok(Event::new(
        raw.event_type,
        start_nanos,
        duration_nanos,
        stack_trace,
    ))
}

fn convert_stack_trace(raw: RawStackTrace) -> StackTrace {
    StackTrace {
        frames: raw.frames.into_iter().map(convert_frame).collect(),
        truncated: raw.truncated,
    }
}

fn convert_frame(raw: RawFrame) -> Frame {
    let method = Method::new(
        raw.method.class.name.replace('/', "."),
        raw.method.name,
        raw.method.descriptor,
    );
    // Native and unknown frames report a negative line
    let line_number = raw.line_number.and_then(|line| u32::try_from(line).ok());
    Frame::new(method, line_number)
}

/// Parse an instant as epoch nanoseconds
///
/// **Public** - accepts RFC 3339 text or integer nanoseconds
pub fn parse_instant(value: &TimeValue) -> Result<i64, LoadError> {
    match value {
        TimeValue::Nanos(nanos) => Ok(*nanos),
        TimeValue::Text(text) => DateTime::parse_from_rfc3339(text)
            .ok()
            .and_then(|instant| instant.timestamp_nanos_opt())
            .ok_or_else(|| LoadError::InvalidFormat(format!("Invalid timestamp: {}", text))),
    }
}

/// Parse a duration as nanoseconds
///
/// **Public** - accepts ISO-8601 text (`PT1.5S`) or integer nanoseconds
pub fn parse_duration(value: &TimeValue) -> Result<i64, LoadError> {
    match value {
        TimeValue::Nanos(nanos) => Ok(*nanos),
        TimeValue::Text(text) => parse_iso_duration(text)
            .ok_or_else(|| LoadError::InvalidFormat(format!("Invalid duration: {}", text))),
    }
}

/// Parse the `PnDTnHnMn.nS` form produced by `java.time.Duration`
fn parse_iso_duration(text: &str) -> Option<i64> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let rest = rest.strip_prefix('P')?;
    let (date_part, time_part) = rest.split_once('T').unwrap_or((rest, ""));

    let mut nanos: i64 = 0;
    if !date_part.is_empty() {
        let days: i64 = date_part.strip_suffix('D')?.parse().ok()?;
        nanos = days.checked_mul(86_400 * NANOS_PER_SECOND)?;
    }

    let mut number = String::new();
    for c in time_part.chars() {
        let unit_nanos = match c {
            '0'..='9' | '.' | '-' => {
                number.push(c);
                continue;
            }
            'H' => 3_600 * NANOS_PER_SECOND,
            'M' => 60 * NANOS_PER_SECOND,
            'S' => {
                nanos = nanos.checked_add(parse_seconds(&number)?)?;
                number.clear();
                continue;
            }
            _ => return None,
        };
        let whole: i64 = number.parse().ok()?;
        nanos = nanos.checked_add(whole.checked_mul(unit_nanos)?)?;
        number.clear();
    }

    if !number.is_empty() {
        return None;
    }

    Some(if negative { -nanos } else { nanos })
}

/// Parse decimal seconds ("1.5", "-0.000000001") into nanoseconds
fn parse_seconds(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
    if whole.is_empty() || fraction.len() > 9 {
        return None;
    }

    let whole: i64 = whole.parse().ok()?;
    let fraction: i64 = if fraction.is_empty() {
        0
    } else {
        format!("{:0<9}", fraction).parse().ok()?
    };

    let nanos = whole.checked_mul(NANOS_PER_SECOND)?.checked_add(fraction)?;
    Some(if negative { -nanos } else { nanos })
}
