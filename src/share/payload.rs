//! Defines the payload handed over to a share surface.

use std::collections::HashMap;
use std::io;
use std::ops::Deref;
use std::path::Path;

use image::{self, ColorType, DynamicImage, GenericImage, ImageFormat};
use mime::{self, Mime};


/// Default format payloads are encoded in.
pub const DEFAULT_SHARE_FORMAT: ImageFormat = ImageFormat::PNG;

lazy_static! {
    /// Map of file extensions to formats a payload can be encoded in.
    static ref SHARE_FORMAT_EXTENSIONS: HashMap<&'static str, ImageFormat> = hashmap!{
        "jpeg" => ImageFormat::JPEG,
        "jpg" => ImageFormat::JPEG,
        "png" => ImageFormat::PNG,
    };
}

/// Pick the payload format matching given file path, if any.
pub fn format_for_path<P: AsRef<Path>>(path: P) -> Option<ImageFormat> {
    let extension = try_opt!(path.as_ref().extension());
    let extension = try_opt!(extension.to_str()).trim().to_lowercase();
    SHARE_FORMAT_EXTENSIONS.get(extension.as_str()).map(|f| *f)
}


/// A flattened meme, encoded & ready for a share surface.
#[derive(Clone, Debug)]
#[must_use = "unused share payload which must be used"]
pub struct SharePayload {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl SharePayload {
    /// Encode a flattened bitmap into a payload of given format.
    pub fn encode(img: &DynamicImage,
                  format: ImageFormat, jpeg_quality: u8) -> io::Result<SharePayload> {
        let (width, height) = img.dimensions();
        debug!("Encoding {}x{} image as {:?}...", width, height, format);

        let mut bytes = vec![];
        match format {
            ImageFormat::PNG => {
                trace!("Writing PNG image");
                image::png::PNGEncoder::new(&mut bytes)
                    .encode(&*img.raw_pixels(), width, height, img.color())?;
            }
            ImageFormat::JPEG => {
                trace!("Writing JPEG with quality {}", jpeg_quality);
                // JPEG has no alpha channel to speak of, so flatten to RGB.
                let rgb = img.to_rgb();
                image::jpeg::JPEGEncoder::new_with_quality(&mut bytes, jpeg_quality)
                    .encode(&*rgb, width, height, ColorType::RGB(8))?;
            }
            f => {
                return Err(io::Error::new(io::ErrorKind::InvalidInput,
                    format!("unsupported share format: {:?}", f)));
            }
        }

        Ok(SharePayload{format: format, bytes: bytes})
    }
}

impl SharePayload {
    /// Image format of the payload.
    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Raw bytes of the payload.
    ///
    /// See `SharePayload::format` for how to interpret them.
    #[inline]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes[..]
    }

    /// Convert the payload into a vector of bytes.
    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// The MIME type that matches payload's format.
    pub fn mime_type(&self) -> Option<Mime> {
        match self.format {
            ImageFormat::JPEG => Some(mime::IMAGE_JPEG),
            ImageFormat::PNG => Some(mime::IMAGE_PNG),
            _ => None,
        }
    }
}

impl Deref for SharePayload {
    type Target = [u8];

    fn deref(&self) -> &Self::Target {
        self.bytes()
    }
}

impl Into<Vec<u8>> for SharePayload {
    fn into(self) -> Vec<u8> {
        self.into_bytes()
    }
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use mime;
    use super::{format_for_path, SharePayload};

    fn image() -> DynamicImage {
        DynamicImage::ImageRgba8(
            ImageBuffer::from_pixel(4, 4, Rgba{data: [0x12, 0x34, 0x56, 0xff]}))
    }

    #[test]
    fn png_payload() {
        let payload = SharePayload::encode(&image(), ImageFormat::PNG, 85).unwrap();
        assert_eq!(Some(mime::IMAGE_PNG), payload.mime_type());
        assert_eq!(&b"PNG"[..], &payload.bytes()[1..4]);
    }

    #[test]
    fn jpeg_payload() {
        let payload = SharePayload::encode(&image(), ImageFormat::JPEG, 85).unwrap();
        assert_eq!(Some(mime::IMAGE_JPEG), payload.mime_type());
        assert!(payload.bytes().len() > 0);
    }

    #[test]
    fn unsupported_format() {
        assert!(SharePayload::encode(&image(), ImageFormat::BMP, 85).is_err());
    }

    #[test]
    fn formats_from_paths() {
        assert_eq!(Some(ImageFormat::JPEG), format_for_path("meme.JPG"));
        assert_eq!(Some(ImageFormat::PNG), format_for_path("/some/where/meme.png"));
        assert_eq!(None, format_for_path("meme.txt"));
        assert_eq!(None, format_for_path("meme"));
    }
}
