//! Module implementing the share gateway.

mod payload;

pub use self::payload::{format_for_path, SharePayload, DEFAULT_SHARE_FORMAT};


use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};


/// Outcome of presenting a share surface to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShareOutcome {
    /// The payload was handed off successfully.
    Completed,
    /// The user dismissed the surface without sharing.
    Cancelled,
}


/// A surface that can take a flattened meme off the editor's hands.
///
/// The gateway holds no state of its own and is safe to present
/// any number of times.
pub trait ShareSurface {
    /// Present the surface with the payload as its sole item.
    fn present(&mut self, payload: &SharePayload) -> io::Result<ShareOutcome>;
}


/// Share surface that writes the payload into a file.
#[derive(Clone, Debug)]
pub struct FileShareSurface {
    path: PathBuf,
}

impl FileShareSurface {
    #[inline]
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileShareSurface{path: path.into()}
    }

    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ShareSurface for FileShareSurface {
    fn present(&mut self, payload: &SharePayload) -> io::Result<ShareOutcome> {
        trace!("Opening share target file {}...", self.path.display());
        let mut file = OpenOptions::new()
            .create(true).write(true).truncate(true)
            .open(&self.path)?;

        file.write_all(payload.bytes())?;
        info!("Shared {} bytes into {}", payload.bytes().len(), self.path.display());
        Ok(ShareOutcome::Completed)
    }
}


/// Share surface that hands the payload to an arbitrary writer.
pub struct StreamShareSurface<W: Write> {
    sink: W,
}

impl<W: Write> StreamShareSurface<W> {
    #[inline]
    pub fn new(sink: W) -> Self {
        StreamShareSurface{sink: sink}
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.sink
    }
}

impl<W: Write> ShareSurface for StreamShareSurface<W> {
    fn present(&mut self, payload: &SharePayload) -> io::Result<ShareOutcome> {
        trace!("Writing {} payload bytes...", payload.bytes().len());
        self.sink.write_all(payload.bytes())?;
        Ok(ShareOutcome::Completed)
    }
}


#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use time;
    use super::{FileShareSurface, SharePayload, ShareOutcome, ShareSurface,
                StreamShareSurface};

    fn payload() -> SharePayload {
        let img = DynamicImage::ImageRgba8(
            ImageBuffer::from_pixel(4, 4, Rgba{data: [0xab, 0xcd, 0xef, 0xff]}));
        SharePayload::encode(&img, ImageFormat::PNG, 85).unwrap()
    }

    #[test]
    fn sharing_into_a_file() {
        let path = env::temp_dir()
            .join(format!("lulzpad-share-{}.png", time::precise_time_ns()));
        let mut surface = FileShareSurface::new(&path);

        let outcome = surface.present(&payload()).unwrap();
        assert_eq!(ShareOutcome::Completed, outcome);

        let written = fs::metadata(&path).unwrap().len();
        assert!(written > 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn sharing_into_a_writer() {
        let mut surface = StreamShareSurface::new(Vec::new());
        let payload = payload();

        let outcome = surface.present(&payload).unwrap();
        assert_eq!(ShareOutcome::Completed, outcome);
        assert_eq!(payload.bytes(), &surface.into_inner()[..]);
    }
}
