//! Module handling the sources of editor photos.

pub mod camera;
mod library;

pub use self::library::{PhotoLibrary, PhotoLoader, list as list_photos, PHOTO_EXTENSIONS};


use std::error::Error;
use std::fmt;
use std::io;

use image::{DynamicImage, GenericImage, ImageError};


/// Where a photo can be picked from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MediaSource {
    /// A capture device present on the machine.
    Camera,
    /// The photo library.
    Library,
}


/// Outcome of asking the user to pick a photo.
#[must_use = "unused pick outcome which must be used"]
pub enum PickOutcome {
    /// The user picked a photo.
    Picked(DynamicImage),
    /// The user dismissed the picker without choosing anything.
    Cancelled,
}

impl fmt::Debug for PickOutcome {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PickOutcome::Picked(ref img) => {
                let (width, height) = img.dimensions();
                write!(fmt, "PickOutcome::Picked({}x{})", width, height)
            }
            PickOutcome::Cancelled => write!(fmt, "PickOutcome::Cancelled"),
        }
    }
}


/// A surface that lets the user pick a photo for the meme.
///
/// One call corresponds to one presentation of the picker;
/// there is no retry logic anywhere around it.
pub trait MediaPicker {
    /// Ask the user to pick a photo from given source.
    fn request_image(&mut self, source: MediaSource) -> Result<PickOutcome, MediaError>;
}


/// Error that may occur while obtaining a photo.
#[derive(Debug)]
pub enum MediaError {
    /// Camera was requested but no capture capability is present.
    NoCamera,
    /// The source doesn't know a photo of given name.
    NotFound(String),
    /// The source exists but could not be accessed.
    Access(io::Error),
    /// The photo file could not be decoded.
    Decode(ImageError),
}

impl Error for MediaError {
    fn description(&self) -> &str { "media access error" }
    fn cause(&self) -> Option<&Error> {
        match *self {
            MediaError::Access(ref e) => Some(e),
            MediaError::Decode(ref e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for MediaError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            MediaError::NoCamera => write!(fmt, "no capture device is available"),
            MediaError::NotFound(ref name) => write!(fmt, "cannot find photo `{}`", name),
            MediaError::Access(ref e) => write!(fmt, "cannot access the photo source: {}", e),
            MediaError::Decode(ref e) => write!(fmt, "cannot decode the photo: {}", e),
        }
    }
}
