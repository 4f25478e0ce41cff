//! Scene flattening error.

use std::error::Error;
use std::fmt;

use model::Size;


/// Error that may occur while flattening a scene.
#[derive(Debug)]
pub enum ComposeError {
    /// The viewport spans zero area, so there is nothing to rasterize.
    EmptyViewport(Size),
    /// A caption font could not be loaded.
    Font(String),
}

impl Error for ComposeError {
    fn description(&self) -> &str { "scene flattening error" }
    fn cause(&self) -> Option<&Error> { None }
}

impl fmt::Display for ComposeError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ComposeError::EmptyViewport(size) =>
                write!(fmt, "cannot rasterize an empty viewport ({})", size),
            ComposeError::Font(ref f) => write!(fmt, "cannot load font `{}`", f),
        }
    }
}
