use crate::output::{OutputConfig, OutputType};
use std::path::PathBuf;

/// Arguments for a conversion run
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Recording dump to read
    pub jfr_dump: PathBuf,

    /// Output flavor
    pub output_type: OutputType,

    /// Output file (None = standard output)
    pub output: Option<PathBuf>,

    /// Gunzip the recording before loading
    pub decompress: bool,

    /// Drop `:<line>` suffixes from frame labels
    pub ignore_line_numbers: bool,

    /// Prefix frame labels with the method return type
    pub show_return_value: bool,

    /// Use simple class names (also hides arguments and return type)
    pub use_simple_names: bool,

    /// Drop argument lists from frame labels
    pub hide_arguments: bool,

    /// Print recording details instead of converting
    pub print_details: bool,

    /// Print details timestamps as epoch seconds
    pub print_timestamp: bool,

    /// Window start in epoch seconds (0 = not given)
    pub start_timestamp: i64,

    /// Window end in epoch seconds (0 = not given)
    pub end_timestamp: i64,

    /// 1 = on-CPU, 2 = off-CPU; validated by the driver
    pub profile_type: i64,

    /// Prefixes for the omit-first-seen-package rule
    pub omit_packages: Vec<String>,

    /// Output-specific options
    pub output_config: OutputConfig,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            jfr_dump: PathBuf::new(),
            output_type: OutputType::Folded,
            output: None,
            decompress: false,
            ignore_line_numbers: false,
            show_return_value: false,
            use_simple_names: false,
            hide_arguments: false,
            print_details: false,
            print_timestamp: false,
            start_timestamp: 0,
            end_timestamp: 0,
            profile_type: 1,
            omit_packages: Vec::new(),
            output_config: OutputConfig::default(),
        }
    }
}
