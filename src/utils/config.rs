//! Configuration and constants for the CLI.

/// Frame label used when an event carries no usable stack trace
pub const IGNORED_FRAME: &str = "Ignored";

/// Separator between frames in a folded stack line
pub const FRAME_SEPARATOR: &str = ";";

/// Weight attributed to every accepted event
pub const DEFAULT_EVENT_WEIGHT: u64 = 1;

/// Default root node name for the JSON tree output
pub const DEFAULT_JSON_ROOT_NAME: &str = "root";

/// Label column width for the recording details table
pub const DETAILS_LABEL_WIDTH: usize = 16;

/// Long localized date-time form used in recording details
pub const DETAILS_DATE_FORMAT: &str = "%B %-d, %Y %-I:%M:%S %p %Z";

/// Nanoseconds per second, for window and details conversions
pub const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Shown on load failure when decompression was not requested
pub const DECOMPRESS_HINT: &str = "If the JFR file is compressed, try the decompress option";
