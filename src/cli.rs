use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Keyframe script tool: inspect, bake and round-trip pose scripts
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print keyframe and node counts of a script file
    Info {
        /// Script file (one pose per line), absent file = empty timeline
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,
    },

    /// Render the interpolated in-between sequence to a pose file
    Bake {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output file (one baked pose per line)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: PathBuf,

        /// Frames per keyframe segment (in-betweens = steps - 1)
        #[arg(short = 's', long = "steps", default_value_t = 8)]
        steps: u32,
    },

    /// Load a script and save it back out (codec check)
    Roundtrip {
        #[arg(value_name = "SCRIPT")]
        script: PathBuf,

        /// Output file; defaults to rewriting the input in place
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

/// Map -v count to a log level filter.
pub fn log_level(verbosity: u8) -> log::LevelFilter {
    match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    }
}
