//! Editor error.

use std::error::Error;
use std::fmt;
use std::io;

use compose::ComposeError;


/// Error that may occur in the editor flows.
#[derive(Debug)]
pub enum EditorError {
    /// Composing was attempted with no photo selected.
    ///
    /// This is a programming error on the host's side: UIs are expected
    /// to prevent it by keeping the share action disabled.
    NoImage,
    /// The scene could not be flattened.
    Compose(ComposeError),
    /// The flattened image could not be encoded for sharing.
    Encode(io::Error),
    /// The share surface itself failed.
    Share(io::Error),
}

impl Error for EditorError {
    fn description(&self) -> &str { "editor error" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            EditorError::NoImage => None,
            EditorError::Compose(ref e) => Some(e),
            EditorError::Encode(ref e) => Some(e),
            EditorError::Share(ref e) => Some(e),
        }
    }
}

impl fmt::Display for EditorError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EditorError::NoImage => write!(fmt, "no photo selected to compose"),
            EditorError::Compose(ref e) => write!(fmt, "cannot flatten the scene: {}", e),
            EditorError::Encode(ref e) => write!(fmt, "cannot encode the meme for sharing: {}", e),
            EditorError::Share(ref e) => write!(fmt, "share surface failed: {}", e),
        }
    }
}

impl From<ComposeError> for EditorError {
    fn from(e: ComposeError) -> Self {
        EditorError::Compose(e)
    }
}
