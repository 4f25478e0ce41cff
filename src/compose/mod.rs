//! Module implementing the scene compositor.

mod config;
mod error;
mod scene;
mod task;
mod text;

pub use self::config::ComposeConfig;
pub use self::error::ComposeError;
pub use self::scene::{Bar, BarKind, Chrome, ChromeGuard, Scene};


use std::fmt;
use std::io;
use std::path::Path;

use image::{DynamicImage, ImageFormat};

use resources::{CachingLoader, Font, FontLoader, Loader};
use share::SharePayload;
use util::cache::ThreadSafeCache;
use self::task::ComposeTask;


/// How many fonts to keep loaded in memory.
const FONT_CACHE_SIZE: usize = 16;


/// Flattens editor scenes into single bitmaps.
///
/// The compositor is stateless apart from its configuration and
/// a cache of the fonts it has loaded, so one instance can serve
/// any number of flattening calls.
pub struct Composer<Fl = FontLoader>
    where Fl: Loader<Item=Font>
{
    pub(in compose) font_loader: CachingLoader<Fl>,
    pub(in compose) config: ComposeConfig,
}

// Constructors.
impl Composer<FontLoader> {
    /// Create a Composer that loads fonts from given directory path.
    ///
    /// When loaded, the fonts are cached in memory (LRU cache).
    #[inline]
    pub fn new<D: AsRef<Path>>(font_directory: D) -> Self {
        Self::with_loader(FontLoader::new(font_directory))
    }
}
impl<Fl> Composer<Fl>
    where Fl: Loader<Item=Font>
{
    /// Create a Composer that uses given loader for fonts.
    #[inline]
    pub fn with_loader(font_loader: Fl) -> Self {
        Composer{
            font_loader: CachingLoader::new(font_loader, FONT_CACHE_SIZE),
            config: ComposeConfig::default(),
        }
    }
}

// Configuration.
impl<Fl> Composer<Fl>
    where Fl: Loader<Item=Font>
{
    /// Read the `Composer`'s configuration.
    #[inline]
    pub fn config(&self) -> &ComposeConfig {
        &self.config
    }

    /// Modify the `Composer`'s configuration.
    ///
    /// Changes will affect all future flattening calls.
    #[inline]
    pub fn config_mut(&mut self) -> &mut ComposeConfig {
        &mut self.config
    }

    /// Return a reference to the internal font cache.
    /// This can be used to examine cache statistics (hits & misses).
    #[inline]
    pub fn font_cache(&self) -> &ThreadSafeCache<String, Font> {
        self.font_loader.cache()
    }
}

// Flattening.
impl<Fl> Composer<Fl>
    where Fl: Loader<Item=Font>
{
    /// Flatten given scene into a single bitmap of the viewport's dimensions.
    ///
    /// Chrome is concealed for the duration of the rasterization and its
    /// visibility put back afterwards, on success and failure alike.
    pub fn compose(&self, scene: &Scene) -> Result<DynamicImage, ComposeError> {
        let viewport = scene.viewport();
        if viewport.is_empty() {
            warn!("Attempted to flatten an empty viewport ({})", viewport);
            return Err(ComposeError::EmptyViewport(viewport));
        }

        let _chrome = ChromeGuard::conceal(scene.chrome());
        ComposeTask::new(scene, self).perform()
    }

    /// Encode a flattened bitmap for handing over to a share surface.
    #[inline]
    pub fn encode(&self, img: &DynamicImage, format: ImageFormat) -> io::Result<SharePayload> {
        SharePayload::encode(img, format, self.config.jpeg_quality)
    }
}

impl<Fl> fmt::Debug for Composer<Fl>
    where Fl: Loader<Item=Font>
{
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("Composer")
            .field("font_loader", &self.font_loader)
            .field("config", &self.config)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use image::{DynamicImage, GenericImage, ImageBuffer, Rgba};
    use model::{Presentation, Size};
    use model::constants::{BACKGROUND_COLOR, CHROME_COLOR, DEFAULT_TEXT_COLOR};
    use super::{Chrome, ComposeError, Composer, Scene};
    use super::task::ComposeTask;

    const FONT_DIR: &'static str = "data/fonts";

    fn solid_photo(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
        DynamicImage::ImageRgba8(
            ImageBuffer::from_pixel(width, height, Rgba{data: rgba}))
    }

    #[test]
    fn output_has_viewport_dimensions() {
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::none();
        let scene = Scene::new(Size::new(48, 32), None, "", "", &chrome);
        let img = composer.compose(&scene).unwrap();
        assert_eq!((48, 32), img.dimensions());
    }

    #[test]
    fn empty_viewport_is_an_error() {
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        let scene = Scene::new(Size::new(0, 100), None, "", "", &chrome);
        match composer.compose(&scene) {
            Err(ComposeError::EmptyViewport(size)) => assert_eq!(Size::new(0, 100), size),
            r => panic!("unexpected compose result: {:?}", r.map(|_| "<image>")),
        }
        // The failure must leave chrome visibility untouched.
        assert!(chrome.any_visible());
    }

    #[test]
    fn chrome_is_restored_after_a_font_failure() {
        let composer = Composer::new("no/such/directory");
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        let scene = Scene::new(Size::new(64, 64), None, "HI", "", &chrome);
        match composer.compose(&scene) {
            Err(ComposeError::Font(..)) => {},
            r => panic!("unexpected compose result: {:?}", r.map(|_| "<image>")),
        }
        assert!(chrome.any_visible());
    }

    #[test]
    fn flattening_excludes_chrome() {
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        let scene = Scene::new(Size::new(64, 64), None, "", "", &chrome);

        let img = composer.compose(&scene).unwrap();
        assert_eq!(BACKGROUND_COLOR.to_rgba(0xff), img.get_pixel(0, 0));
        // ...and the bars are visible again once flattening is done.
        assert!(chrome.any_visible());
    }

    #[test]
    fn rasterization_draws_visible_chrome() {
        // Unlike compose(), a raw rasterization pass renders the screen
        // as-is, chrome included.
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        let scene = Scene::new(Size::new(128, 128), None, "", "", &chrome);

        let img = ComposeTask::new(&scene, &composer).perform().unwrap();
        assert_eq!(CHROME_COLOR.to_rgba(0xff), img.get_pixel(0, 0));      // navigation bar
        assert_eq!(CHROME_COLOR.to_rgba(0xff), img.get_pixel(0, 127));    // toolbar
        assert_eq!(BACKGROUND_COLOR.to_rgba(0xff), img.get_pixel(0, 64)); // content
    }

    #[test]
    fn photo_at_viewport_size_is_blitted_verbatim() {
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::none();
        let photo = solid_photo(8, 8, [0xff, 0x00, 0x00, 0xff]);
        let scene = Scene::new(Size::new(8, 8), Some(&photo), "", "", &chrome);

        let img = composer.compose(&scene).unwrap();
        assert_eq!(photo.get_pixel(4, 4), img.get_pixel(4, 4));
    }

    #[test]
    fn smaller_photo_is_letterboxed() {
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::none();
        let photo = solid_photo(4, 4, [0xff, 0x00, 0x00, 0xff]);
        let scene = Scene::new(Size::new(8, 4), Some(&photo), "", "", &chrome);

        let img = composer.compose(&scene).unwrap();
        // Letterbox margin on the left, photo in the middle.
        assert_eq!(BACKGROUND_COLOR.to_rgba(0xff), img.get_pixel(0, 0));
        let Rgba{data: center} = img.get_pixel(4, 2);
        assert!(center[0] > 0xc0, "photo pixel not red enough: {:?}", center);
    }

    #[test]
    fn captions_leave_visible_text() {
        let composer = Composer::new(FONT_DIR);
        let chrome = Chrome::none();
        let scene = Scene::new(Size::new(200, 200), None, "HI", "LOL", &chrome);

        let img = composer.compose(&scene).unwrap();
        let fill = DEFAULT_TEXT_COLOR.to_rgba(0xff);
        let filled = (0..200).flat_map(|y| (0..200).map(move |x| (x, y)))
            .filter(|&(x, y)| img.get_pixel(x, y) == fill)
            .count();
        assert!(filled > 0, "no caption pixels rendered");
    }
}
