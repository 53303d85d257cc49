use crate::pathlib::FilePath;

use colored::{Color, ColoredString, Colorize};
use log::Level;
use std::io;
use std::str::FromStr;
use structopt::StructOpt;

mod highlight;

/// How a failure is presented on stdout.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OnError {
    /// An empty JSON array.
    Empty,
    /// A single `{"error": ...}` object.
    Diagnostic,
}

impl FromStr for OnError {
    type Err = String;

    fn from_str(s: &str) -> Result<OnError, String> {
        match s {
            "empty" => Ok(OnError::Empty),
            "diagnostic" => Ok(OnError::Diagnostic),
            _ => Err(format!("unknown error presentation `{}`", s)),
        }
    }
}

#[derive(Debug, StructOpt)]
#[structopt(name = "highlighter", about = "Prints the highlight tokens of a Swift source file")]
pub struct Cli {
    #[structopt(
        long, env = "LOG_LEVEL",
        help = "Sets the log level",
        default_value = "warn",
        possible_values = &["off", "error", "warn", "info", "debug", "trace"]
    )]
    log_level: log::LevelFilter,

    #[structopt(
        long, env = "HIGHLIGHTER_ON_ERROR",
        help = "What to print when the file cannot be highlighted",
        long_help = "`empty` prints `[]`. `diagnostic` prints a single `{\"error\": ...}` object. The error is reported on stderr either way.",
        default_value = "empty",
        possible_values = &["empty", "diagnostic"]
    )]
    on_error: OnError,

    #[structopt(long, help = "Prints a colored listing instead of JSON")]
    pretty: bool,

    #[structopt(name = "FILE", help = "The Swift file to highlight")]
    file: FilePath,
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Blue,
        Level::Debug => Color::Magenta,
        Level::Trace => Color::Green,
    }
}

pub fn run() {
    let cli: Cli = Cli::from_args();

    // set up logging
    let logger = fern::Dispatch::new()
        .format(move |out, message, record| {
            let level = record.level();
            out.finish(format_args!(
                "{} {}",
                ColoredString::from((level.to_string().to_lowercase() + ":").as_str())
                    .color(level_color(level)),
                message
            ))
        })
        .level(cli.log_level)
        .chain(io::stderr())
        .apply();
    if let Err(err) = logger {
        eprintln!("{} {}", "warning:".yellow(), err);
    }

    highlight::action(&cli.file, cli.on_error, cli.pretty);
}
