//! Module implementing the filesystem-backed photo library.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use glob;
use image::{self, DynamicImage};
use itertools::Itertools;

use resources::{CachingLoader, Loader, PathLoader};
use super::{MediaError, MediaPicker, MediaSource, PickOutcome};


/// File extensions of the photos the library recognizes.
pub const PHOTO_EXTENSIONS: &'static [&'static str] = &["jpg", "jpeg", "png"];

/// How many decoded photos to keep in memory.
const PHOTO_CACHE_SIZE: usize = 8;


/// Loader for photos stored as image files in a directory.
#[derive(Debug)]
pub struct PhotoLoader {
    inner: PathLoader<'static>,
}

impl PhotoLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        PhotoLoader{
            inner: PathLoader::for_extensions(directory, PHOTO_EXTENSIONS.iter()),
        }
    }
}

impl Loader for PhotoLoader {
    type Item = DynamicImage;
    type Err = MediaError;

    fn load<'n>(&self, name: &'n str) -> Result<DynamicImage, MediaError> {
        let path = self.inner.load(name).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => MediaError::NotFound(name.to_owned()),
            _ => MediaError::Access(e),
        })?;
        trace!("Opening photo {}", path.display());
        image::open(&path).map_err(MediaError::Decode)
    }
}


/// The user's photo library: a directory of image files.
///
/// Picking is modeled explicitly: the host stages the user's choice
/// with `select`, and the next `request_image` call consumes it.
/// With nothing staged, the picker reports cancellation.
///
/// Photos load through an in-memory LRU cache, so re-picking
/// a recent one doesn't decode it again.
pub struct PhotoLibrary {
    directory: PathBuf,
    loader: CachingLoader<PhotoLoader>,
    selection: Option<String>,
}

impl PhotoLibrary {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        let directory = directory.as_ref().to_owned();
        PhotoLibrary{
            loader: CachingLoader::new(PhotoLoader::new(&directory), PHOTO_CACHE_SIZE),
            directory: directory,
            selection: None,
        }
    }
}

impl PhotoLibrary {
    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Stage the photo the user chose in the picker.
    #[inline]
    pub fn select<N: Into<String>>(&mut self, name: N) {
        self.selection = Some(name.into());
    }

    /// Drop whatever choice was staged.
    #[inline]
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// List the names of all photos in the library, sorted.
    #[inline]
    pub fn list(&self) -> io::Result<Vec<String>> {
        list(&self.directory)
    }

    /// Load a photo of given name.
    pub fn load(&self, name: &str) -> Result<DynamicImage, MediaError> {
        self.loader.load(name).map(|img| (*img).clone())
    }
}

impl MediaPicker for PhotoLibrary {
    fn request_image(&mut self, source: MediaSource) -> Result<PickOutcome, MediaError> {
        if source == MediaSource::Camera {
            // The library knows nothing of capture devices.
            return Err(MediaError::NoCamera);
        }
        match self.selection.take() {
            Some(name) => {
                debug!("Photo `{}` picked from the library", name);
                self.load(&name).map(PickOutcome::Picked)
            }
            None => Ok(PickOutcome::Cancelled),
        }
    }
}

impl fmt::Debug for PhotoLibrary {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("PhotoLibrary")
            .field("directory", &self.directory)
            .field("selection", &self.selection)
            .finish()
    }
}


/// List the names of all photos in given directory, sorted.
pub fn list<D: AsRef<Path>>(directory: D) -> io::Result<Vec<String>> {
    let directory = directory.as_ref();
    trace!("Listing photos in {}", directory.display());

    let pattern = format!("{}", directory.join("*.*").display());
    let glob_iter = glob::glob(&pattern)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

    Ok(glob_iter
        .filter_map(Result::ok)
        .filter(|path| {
            let ext = path.extension().and_then(|e| e.to_str())
                .map(|s| s.trim().to_lowercase());
            PHOTO_EXTENSIONS.iter().any(|&e| Some(e) == ext.as_ref().map(|s| s.as_str()))
        })
        .filter_map(|path| path.file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_owned()))
        .sorted())
}
