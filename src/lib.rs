//! JFR Flame Graph
//!
//! Converts Java Flight Recorder event dumps into collapsed stacks for
//! flame graph rendering.
//!
//! The conversion runs as a single pass:
//! recording -> event selection -> stack normalization -> output writer.
//!
//! ## Getting Started
//!
//! ```bash
//! jfr print --json recording.jfr > recording.json
//! jfr-flame-graph -f recording.json -e 1 -o recording.folded
//! flamegraph.pl recording.folded > recording.svg
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
