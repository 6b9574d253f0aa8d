//! JFR Flame Graph CLI
//!
//! Converts a Java Flight Recorder event dump into folded stacks (or a
//! d3-flame-graph JSON tree) for flame graph rendering.

use anyhow::Result;
use clap::{CommandFactory, Parser};
use env_logger::Env;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use jfr_flame_graph::commands::{execute_convert, ConvertArgs};
use jfr_flame_graph::output::{OutputConfig, OutputType};
use jfr_flame_graph::utils::config::DEFAULT_JSON_ROOT_NAME;

/// Multi-letter short flags and the long flags they stand for
const LEGACY_FLAGS: &[(&str, &str)] = &[
    ("-ot", "--output-type"),
    ("-rv", "--show-return-value"),
    ("-sn", "--use-simple-names"),
    ("-ha", "--hide-arguments"),
    ("-st", "--start-timestamp"),
    ("-et", "--end-timestamp"),
    ("-op", "--omit-first-seen-package"),
];

/// JFR Flame Graph - folded stacks from Java Flight Recorder events
#[derive(Parser, Debug)]
#[command(name = "jfr-flame-graph")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Java Flight Recorder dump (JSON from `jfr print --json`)
    #[arg(short = 'f', long = "jfrdump")]
    jfrdump: PathBuf,

    /// Output type (-ot)
    #[arg(long, value_enum, default_value_t = OutputType::Folded)]
    output_type: OutputType,

    /// Output file (standard output if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Decompress the JFR file
    #[arg(short, long)]
    decompress: bool,

    /// Ignore line numbers in stack frames
    #[arg(short, long)]
    ignore_line_numbers: bool,

    /// Show return value for methods in the stack (-rv)
    #[arg(long)]
    show_return_value: bool,

    /// Use simple names instead of qualified names in the stack (-sn)
    #[arg(long)]
    use_simple_names: bool,

    /// Hide arguments in methods (-ha)
    #[arg(long)]
    hide_arguments: bool,

    /// Print JFR details and exit
    #[arg(short = 'j', long = "print-jfr-details")]
    print_jfr_details: bool,

    /// Print timestamps in JFR details as epoch seconds
    #[arg(short = 't', long)]
    print_timestamp: bool,

    /// Start timestamp in seconds for filtering (-st)
    #[arg(long, default_value_t = 0)]
    start_timestamp: i64,

    /// End timestamp in seconds for filtering (-et)
    #[arg(long, default_value_t = 0)]
    end_timestamp: i64,

    /// Profile type: 1. CPU profile 2. Off-CPU profile
    #[arg(short = 'e', long, allow_negative_numbers = true)]
    profile_type: i64,

    /// Omit packages if they are first seen at the bottom of the stack (-op)
    #[arg(long = "omit-first-seen-package", value_delimiter = ',')]
    omit_first_seen_package: Vec<String>,

    /// Root node name for JSON output
    #[arg(long, default_value = DEFAULT_JSON_ROOT_NAME)]
    json_root_name: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_convert_args(self) -> ConvertArgs {
        ConvertArgs {
            jfr_dump: self.jfrdump,
            output_type: self.output_type,
            output: self.output,
            decompress: self.decompress,
            ignore_line_numbers: self.ignore_line_numbers,
            show_return_value: self.show_return_value,
            use_simple_names: self.use_simple_names,
            hide_arguments: self.hide_arguments,
            print_details: self.print_jfr_details,
            print_timestamp: self.print_timestamp,
            start_timestamp: self.start_timestamp,
            end_timestamp: self.end_timestamp,
            profile_type: self.profile_type,
            omit_packages: self.omit_first_seen_package,
            output_config: OutputConfig {
                json_root_name: self.json_root_name,
                pretty: self.pretty,
            },
        }
    }
}

/// Rewrite multi-letter short flags (`-ot`) to their long forms
///
/// Only standalone legacy flags are rewritten. Values of options that take
/// one (`-o -st` writes to a file named `-st`) and everything after a `--`
/// separator are left alone. Attached forms such as `-ot=json` are not
/// supported.
fn expand_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let value_flags = value_taking_flags();
    let mut expanded = Vec::new();
    let mut expects_value = false;
    let mut after_separator = false;

    for arg in args {
        if after_separator || expects_value {
            expects_value = false;
            expanded.push(arg);
            continue;
        }
        if arg == "--" {
            after_separator = true;
            expanded.push(arg);
            continue;
        }

        let arg = LEGACY_FLAGS
            .iter()
            .find(|(short, _)| arg.as_os_str() == OsStr::new(short))
            .map(|&(_, long)| OsString::from(long))
            .unwrap_or(arg);

        expects_value = value_flags.iter().any(|flag| arg == flag.as_str());
        expanded.push(arg);
    }

    expanded
}

/// Short and long spellings of every option that consumes the next argument
fn value_taking_flags() -> Vec<String> {
    Cli::command()
        .get_arguments()
        .filter(|arg| !arg.is_positional() && arg.get_action().takes_values())
        .flat_map(|arg| {
            let short = arg.get_short().map(|s| format!("-{}", s));
            let long = arg.get_long().map(|l| format!("--{}", l));
            short.into_iter().chain(long)
        })
        .collect()
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_from(expand_legacy_flags(std::env::args_os()));

    // Setup logging (stderr, so folded output on stdout stays clean)
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    execute_convert(cli.into_convert_args())
}
