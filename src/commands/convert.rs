//! Convert command implementation.
//!
//! The convert command:
//! 1. Validates the profile type and builds the event type set
//! 2. Loads the recording (decompressing first if requested)
//! 3. Prints recording details and stops, if requested
//! 4. Checks the recording has matching event types
//! 5. Selects, normalizes and accumulates every matching event
//! 6. Writes the output

use super::details::print_details;
use super::models::ConvertArgs;
use crate::aggregator::{
    accept, check_event_types, normalize, EventTypeSet, ProfileType, TimeWindow,
};
use crate::output::{write_output, OutputWriter};
use crate::parser::{load_recording, EventSource, RenderOptions};
use crate::utils::config::{DECOMPRESS_HINT, DEFAULT_EVENT_WEIGHT};
use crate::utils::error::{ConfigError, SelectionError};
use anyhow::{Context, Result};
use log::{debug, info};
use std::io;
use std::time::Instant;

/// Everything fixed at startup, plus the run's bookkeeping
///
/// **Public** - built once from the CLI arguments, owned by the driver
#[derive(Debug, Clone)]
pub struct PipelineState {
    pub profile: ProfileType,
    pub event_types: EventTypeSet,
    pub window: Option<TimeWindow>,
    pub render_options: RenderOptions,
    pub omit_packages: Vec<String>,

    /// Events accepted so far
    pub processed_events: u64,
}

impl PipelineState {
    /// Validate the arguments and resolve them into pipeline settings
    ///
    /// # Errors
    /// * `ConfigError::InvalidProfileType` - profile type is not 1 or 2
    /// * `ConfigError::InvalidTimeWindow` - start is after end
    pub fn from_args(args: &ConvertArgs) -> Result<Self, ConfigError> {
        let profile = ProfileType::try_from(args.profile_type)?;
        let window = TimeWindow::from_seconds(args.start_timestamp, args.end_timestamp)?;
        let render_options = RenderOptions::resolve(
            args.show_return_value,
            args.use_simple_names,
            args.hide_arguments,
            args.ignore_line_numbers,
        );

        Ok(Self {
            profile,
            event_types: EventTypeSet::for_profile(profile),
            window,
            render_options,
            omit_packages: args.omit_packages.clone(),
            processed_events: 0,
        })
    }
}

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Invalid profile type or time window
/// * Recording cannot be loaded (with a decompression hint)
/// * No events match the selected event types
/// * Output cannot be written
pub fn execute_convert(args: ConvertArgs) -> Result<()> {
    let start_time = Instant::now();

    let mut state = PipelineState::from_args(&args)?;
    info!("{}: [{}]", state.profile.description(), state.event_types);
    if let Some(window) = &state.window {
        debug!(
            "Filtering events between {} and {} ns",
            window.start_nanos, window.end_nanos
        );
    }

    let recording = load_recording(&args.jfr_dump, args.decompress).with_context(|| {
        if args.decompress {
            "Could not load the JFR file".to_string()
        } else {
            format!("Could not load the JFR file. {}", DECOMPRESS_HINT)
        }
    })?;

    if args.print_details {
        print_details(
            &recording,
            &state.event_types,
            args.print_timestamp,
            &mut io::stdout().lock(),
        )
        .context("Failed to print recording details")?;
        return Ok(());
    }

    let mut writer = args.output_type.create_writer(&args.output_config);
    run_pipeline(&recording, &mut state, &mut *writer)?;

    write_output(&*writer, args.output.as_deref()).context("Failed to write output")?;

    let elapsed = start_time.elapsed();
    info!(
        "Processed {} events in {:.2}s",
        state.processed_events,
        elapsed.as_secs_f64()
    );

    Ok(())
}

/// Feed every selected event through normalization into the writer
///
/// **Public** - the conversion core, independent of files and the CLI
///
/// # Returns
/// Number of events accepted
///
/// # Errors
/// * `SelectionError::NoMatchingEventTypes` - recording has none of the
///   selected event types; no event is visited
/// * `SelectionError::NoEvents` - no event survived filtering
pub fn run_pipeline(
    source: &dyn EventSource,
    state: &mut PipelineState,
    writer: &mut dyn OutputWriter,
) -> Result<u64, SelectionError> {
    check_event_types(source, &state.event_types)?;

    for event in source.events() {
        if !accept(event, &state.event_types, state.window.as_ref()) {
            continue;
        }

        let stack = normalize(event, &state.render_options, &state.omit_packages);
        writer.accept(
            event.start_nanos,
            event.end_nanos,
            event.duration_nanos,
            stack,
            DEFAULT_EVENT_WEIGHT,
        );
        state.processed_events += 1;
    }

    debug!("Accepted {} events", state.processed_events);

    if state.processed_events == 0 {
        return Err(SelectionError::NoEvents(state.event_types.to_string()));
    }

    Ok(state.processed_events)
}
