//! Module with the logging subsystem.
//!
//! The heavy lifting is done by the slog-* crates; what's here is the
//! wiring that hooks them up to the standard `log` macros used
//! throughout the codebase.

use std::env;
use std::io;

use ansi_term::Colour;
use isatty;
use log::SetLoggerError;
use slog::{self, DrainExt, FilterLevel, Level, OwnedKeyValueList, Record};
use slog_envlogger::LogBuilder;
use slog_stdlog;
use slog_stream;
use time;


/// Environment variable that can override the default logging filters.
const ENV_VAR: &'static str = "RUST_LOG";


/// Initialize logging with given verbosity.
///
/// Verbosity is the cumulative count of -v (positive) and -q (negative)
/// flags; zero means the regular Info level.
pub fn init(verbosity: isize) -> Result<(), SetLoggerError> {
    let istty = isatty::stderr_isatty();
    let stderr = slog_stream::stream(io::stderr(), LogFormat{tty: istty});

    // Determine the log filtering level based on the verbosity,
    // unless the levels are overridden through the environment.
    let mut builder = LogBuilder::new(stderr);
    match env::var(ENV_VAR) {
        Ok(filters) => {
            builder = builder.parse(&filters);
        }
        Err(_) => {
            let level = match verbosity {
                v if v < -2 => FilterLevel::Off,
                -2 => FilterLevel::Error,
                -1 => FilterLevel::Warning,
                0 => FilterLevel::Info,
                1 => FilterLevel::Debug,
                _ => FilterLevel::Trace,
            };
            builder = builder.filter(None, level);
        }
    }
    let drain = builder.build();

    let logger = slog::Logger::root(drain.ignore_err(), o!());
    slog_stdlog::set_logger(logger)
}


/// Log message formatter used by the application.
struct LogFormat {
    tty: bool,
}

impl slog_stream::Format for LogFormat {
    /// Format a single log Record and write it to given output.
    fn format(&self, output: &mut io::Write,
              record: &Record,
              _logger_kvp: &OwnedKeyValueList) -> io::Result<()> {
        let now = time::now();
        let timestamp = now.strftime("%H:%M:%S").unwrap();  // format is valid

        let level = record.level();
        let line = format!("{} {} {}#{}] {}",
            timestamp, level.as_short_str(),
            record.module(), record.line(), record.msg());

        match level_color(level) {
            Some(color) if self.tty => writeln!(output, "{}", color.paint(line)),
            _ => writeln!(output, "{}", line),
        }
    }
}

/// Color that messages of given level are printed in on a terminal.
fn level_color(level: Level) -> Option<Colour> {
    match level {
        Level::Critical | Level::Error => Some(Colour::Red),
        Level::Warning => Some(Colour::Yellow),
        Level::Info => Some(Colour::Green),
        Level::Debug => Some(Colour::Cyan),
        Level::Trace => None,
    }
}
