//! CLI command implementations.
//!
//! Commands orchestrate the library components: load the recording,
//! select and normalize events, and write the output.

pub mod convert;
pub mod details;
pub mod models;

// Re-export main command functions
pub use convert::{execute_convert, run_pipeline, PipelineState};
pub use details::{print_details, RecordingDetails};
pub use models::ConvertArgs;
