//! Recording details: overall time range and the span of matched events.

use crate::aggregator::EventTypeSet;
use crate::parser::EventSource;
use crate::utils::config::{DETAILS_DATE_FORMAT, DETAILS_LABEL_WIDTH, NANOS_PER_SECOND};
use chrono::{DateTime, Local, Utc};
use std::io::{self, Write};

const NANOS_PER_MINUTE: i64 = 60 * NANOS_PER_SECOND;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MINUTE;

/// Time span summary of a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordingDetails {
    pub start_nanos: i64,
    pub end_nanos: i64,

    /// Earliest start among matched events
    pub min_event_start: Option<i64>,

    /// Latest end among matched events
    pub max_event_end: Option<i64>,
}

impl RecordingDetails {
    /// Scan the recording once for the matched events' span
    pub fn collect(source: &dyn EventSource, event_types: &EventTypeSet) -> Self {
        let range = source.time_range();
        let mut min_event_start: Option<i64> = None;
        let mut max_event_end: Option<i64> = None;

        for event in source.events() {
            if !event_types.contains(&event.type_name) {
                continue;
            }
            let (start, end) = (event.start_nanos, event.end_nanos);
            min_event_start = Some(min_event_start.map_or(start, |m| m.min(start)));
            max_event_end = Some(max_event_end.map_or(end, |m| m.max(end)));
        }

        Self {
            start_nanos: range.start_nanos,
            end_nanos: range.end_nanos,
            min_event_start,
            max_event_end,
        }
    }

    /// Write the details table
    ///
    /// With `raw_timestamps` instants print as epoch seconds, otherwise as
    /// local date-times.
    pub fn write(&self, raw_timestamps: bool, out: &mut dyn Write) -> io::Result<()> {
        let instant = |nanos: i64| format_instant(nanos, raw_timestamps);

        writeln!(out, "JFR Details")?;
        write_row(out, "Start", &instant(self.start_nanos))?;
        write_row(out, "End", &instant(self.end_nanos))?;
        write_row(
            out,
            "Min Start Event",
            &self.min_event_start.map_or_else(|| "-".to_string(), instant),
        )?;
        write_row(
            out,
            "Max End Event",
            &self.max_event_end.map_or_else(|| "-".to_string(), instant),
        )?;
        write_row(
            out,
            "JFR Duration",
            &format_duration(self.end_nanos.saturating_sub(self.start_nanos)),
        )?;

        let events_duration = match (self.min_event_start, self.max_event_end) {
            (Some(start), Some(end)) => format_duration(end.saturating_sub(start)),
            _ => "-".to_string(),
        };
        write_row(out, "Events Duration", &events_duration)
    }
}

/// Print recording details for the selected event types
///
/// **Public** - the details branch of the convert command
pub fn print_details(
    source: &dyn EventSource,
    event_types: &EventTypeSet,
    raw_timestamps: bool,
    out: &mut dyn Write,
) -> io::Result<()> {
    RecordingDetails::collect(source, event_types).write(raw_timestamps, out)?;
    out.flush()
}

fn write_row(out: &mut dyn Write, label: &str, value: &str) -> io::Result<()> {
    writeln!(out, "{:<width$}: {}", label, value, width = DETAILS_LABEL_WIDTH)
}

/// Format an epoch-nanosecond instant, truncated to whole seconds
fn format_instant(nanos: i64, raw_timestamps: bool) -> String {
    let seconds = nanos / NANOS_PER_SECOND;
    if raw_timestamps {
        return seconds.to_string();
    }

    match DateTime::<Utc>::from_timestamp(seconds, 0) {
        Some(instant) => instant
            .with_timezone(&Local)
            .format(DETAILS_DATE_FORMAT)
            .to_string(),
        None => seconds.to_string(),
    }
}

/// Format a duration as "{h} h {m} min"
fn format_duration(nanos: i64) -> String {
    let hours = nanos / NANOS_PER_HOUR;
    let minutes = (nanos % NANOS_PER_HOUR) / NANOS_PER_MINUTE;
    format!("{} h {} min", hours, minutes)
}
