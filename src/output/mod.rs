//! Output writers for collapsed stacks.
//!
//! Every output type implements the same three steps:
//! - `init` once with the run's output configuration
//! - `accept` once per counted event
//! - `render` once at the end, the only time the sink is touched
//!
//! Supported types:
//! - `folded` - one `frame;frame;frame weight` line per distinct stack
//! - `json` - d3-flame-graph hierarchy

pub mod folded;
pub mod json;
pub mod sink;

// Re-export main types and functions
pub use folded::FoldedWriter;
pub use json::JsonWriter;
pub use sink::{open_sink, validate_path, write_output};

use crate::aggregator::Stack;
use crate::utils::config::DEFAULT_JSON_ROOT_NAME;
use crate::utils::error::OutputError;
use clap::ValueEnum;
use std::io::Write;

/// Output-specific options, applied by `OutputWriter::init`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Name of the root node in the JSON hierarchy
    pub json_root_name: String,

    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_root_name: DEFAULT_JSON_ROOT_NAME.to_string(),
            pretty: false,
        }
    }
}

/// Accumulates stacks over one run and renders the final artifact
///
/// **Public** - implemented once per output type
pub trait OutputWriter {
    /// One-time setup before any event is accepted
    fn init(&mut self, config: &OutputConfig);

    /// Record one counted event with its normalized stack
    fn accept(
        &mut self,
        start_nanos: i64,
        end_nanos: i64,
        duration_nanos: i64,
        stack: Stack,
        weight: u64,
    );

    /// Write the accumulated result to the sink
    fn render(&self, sink: &mut dyn Write) -> Result<(), OutputError>;
}

/// Output flavor selected with `--output-type`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// Folded stacks for FlameGraph and inferno
    #[default]
    Folded,
    /// JSON hierarchy for d3-flame-graph
    Json,
}

impl OutputType {
    /// Create a fresh, initialized writer for this output type
    pub fn create_writer(&self, config: &OutputConfig) -> Box<dyn OutputWriter> {
        let mut writer: Box<dyn OutputWriter> = match self {
            OutputType::Folded => Box::new(FoldedWriter::new()),
            OutputType::Json => Box::new(JsonWriter::new()),
        };
        writer.init(config);
        writer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stack(frames: &[&str]) -> Stack {
        frames.iter().map(|f| f.to_string()).collect()
    }

    #[test]
    fn test_create_writer_folded() {
        let mut writer = OutputType::Folded.create_writer(&OutputConfig::default());
        writer.accept(0, 0, 0, stack(&["a", "b"]), 1);

        let mut out = Vec::new();
        writer.render(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a;b 1\n");
    }

    #[test]
    fn test_create_writer_json_uses_root_name() {
        let config = OutputConfig {
            json_root_name: "all".to_string(),
            pretty: false,
        };
        let mut writer = OutputType::Json.create_writer(&config);
        writer.accept(0, 0, 0, stack(&["a"]), 2);

        let mut out = Vec::new();
        writer.render(&mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "all");
        assert_eq!(value["value"], 2);
    }

    #[test]
    fn test_default_output_type() {
        assert_eq!(OutputType::default(), OutputType::Folded);
    }
}
