//! Data structures for command-line arguments.

use std::error::Error;
use std::fmt;
use std::io;
use std::path::PathBuf;

use clap;
use lulzpad::MemeSpec;
use serde_json;


/// Structure to hold options received from the command line.
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Verbosity of the logging output.
    ///
    /// Corresponds to the number of times the -v flag has been passed.
    /// If -q has been used instead, this will be negative.
    pub verbosity: isize,

    /// The meme to compose.
    pub spec: MemeSpec,
    /// Path to write the finished meme to.
    ///
    /// If absent, it shall be written to standard output.
    pub output_path: Option<PathBuf>,
}

#[allow(dead_code)]
impl Options {
    #[inline]
    pub fn verbose(&self) -> bool { self.verbosity > 0 }
    #[inline]
    pub fn quiet(&self) -> bool { self.verbosity < 0 }
}


macro_attr! {
    /// Error that can occur while parsing of command line arguments.
    #[derive(Debug, EnumFromInner!)]
    pub enum ArgsError {
        /// General error when parsing the arguments.
        Parse(clap::Error),
        /// Error while reading the meme spec from standard input.
        SpecIo(io::Error),
        /// Meme spec --json parsing error.
        SpecJson(serde_json::Error),
        /// Invalid --size argument.
        Size(String),
    }
}

impl Error for ArgsError {
    fn description(&self) -> &str { "command line argument error" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            ArgsError::Parse(ref e) => Some(e),
            ArgsError::SpecIo(ref e) => Some(e),
            ArgsError::SpecJson(ref e) => Some(e),
            ArgsError::Size(_) => None,
        }
    }
}

impl fmt::Display for ArgsError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ArgsError::Parse(ref e) => write!(fmt, "invalid arguments: {}", e),
            ArgsError::SpecIo(ref e) => {
                write!(fmt, "error reading the meme spec: {}", e)
            }
            ArgsError::SpecJson(ref e) => {
                write!(fmt, "meme spec JSON error: {}", e)
            }
            ArgsError::Size(ref s) => {
                write!(fmt, "invalid size (expected WxH): {}", s)
            }
        }
    }
}
