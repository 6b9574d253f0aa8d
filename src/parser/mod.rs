//! Recording loading and frame rendering.
//!
//! This module handles:
//! - Parsing JSON event dumps (`jfr print --json`)
//! - Decompressing gzip recordings
//! - Rendering JVM methods as frame labels

pub mod decompress;
pub mod descriptor;
pub mod recording;
pub mod schema;

// Re-export main types
pub use descriptor::{parse_descriptor, render_method, RenderOptions};
pub use recording::{
    load_recording, EventSource, Event, Frame, Method, Recording, StackTrace, TimeRange,
};
