//! Module implementing the actual scene flattening.
//! Most if not all rasterization logic lives here.

use std::ops::Deref;

use image::{DynamicImage, FilterType, GenericImage, ImageBuffer};
use rusttype::{point, Rect, vector};

use model::{HAlign, Size, VAlign};
use model::constants::{BACKGROUND_COLOR, CHROME_COLOR, OUTLINE_WIDTH};
use resources::{Font, Loader};
use super::Composer;
use super::error::ComposeError;
use super::scene::Scene;
use super::text::{self, Style};


/// Represents a single flattening task and contains all the relevant logic.
///
/// This is a separate struct so that the rasterization steps can share
/// the scene & the compositor state between its methods.
///
/// All the code here is synchronous; the task borrows the scene for
/// exactly as long as the flattening takes.
pub(super) struct ComposeTask<'a, Fl: 'a>
    where Fl: Loader<Item=Font>
{
    scene: &'a Scene<'a>,
    composer: &'a Composer<Fl>,
}

impl<'a, Fl> Deref for ComposeTask<'a, Fl>
    where Fl: Loader<Item=Font>
{
    type Target = Scene<'a>;
    fn deref(&self) -> &Self::Target {
        self.scene  // makes the rasterization code a little terser
    }
}

impl<'a, Fl> ComposeTask<'a, Fl>
    where Fl: Loader<Item=Font>
{
    #[inline]
    pub fn new(scene: &'a Scene<'a>, composer: &'a Composer<Fl>) -> Self {
        ComposeTask{scene: scene, composer: composer}
    }
}

impl<'a, Fl> ComposeTask<'a, Fl>
    where Fl: Loader<Item=Font>
{
    /// Perform the flattening task.
    pub fn perform(self) -> Result<DynamicImage, ComposeError> {
        debug!("Rasterizing {:?}", self.scene);

        let Size{width, height} = self.viewport();
        let canvas = ImageBuffer::from_pixel(
            width, height, BACKGROUND_COLOR.to_rgba(0xff));
        let mut img = DynamicImage::ImageRgba8(canvas);

        match self.background() {
            Some(photo) => img = self.draw_background(img, photo),
            None => debug!("No photo in the scene, rasterizing the bare viewport"),
        }

        if !self.top_text().is_empty() {
            img = self.draw_caption(img, VAlign::Top, self.top_text())?;
        }
        if !self.bottom_text().is_empty() {
            img = self.draw_caption(img, VAlign::Bottom, self.bottom_text())?;
        }

        img = self.draw_chrome(img);
        Ok(img)
    }

    /// Draw the photo, aspect-fit & centered within the viewport.
    /// Returns a new image.
    fn draw_background(&self, img: DynamicImage, photo: &DynamicImage) -> DynamicImage {
        let mut img = img;
        let Size{width, height} = self.viewport();

        let (orig_width, orig_height) = photo.dimensions();
        trace!("Original size of the photo: {}x{}", orig_width, orig_height);

        // Note that resizing preserves the original aspect,
        // which is exactly the letterboxed fit we want here.
        let fitted;
        let photo = if (orig_width, orig_height) != (width, height) {
            debug!("Fitting photo from {}x{} into {}x{}",
                orig_width, orig_height, width, height);
            fitted = photo.resize(width, height, FilterType::Lanczos3);
            &fitted
        } else {
            debug!("Using the photo at its original size of {}x{}",
                orig_width, orig_height);
            photo
        };

        let (fit_width, fit_height) = photo.dimensions();
        let dx = (width - fit_width) / 2;
        let dy = (height - fit_height) / 2;
        trace!("Blitting the {}x{} photo at ({}, {})", fit_width, fit_height, dx, dy);
        for y in 0..fit_height {
            for x in 0..fit_width {
                let pixel = photo.get_pixel(x, y);
                img.blend_pixel(dx + x, dy + y, pixel);
            }
        }
        img
    }

    /// Draws a single caption text at given vertical edge of the viewport.
    /// Returns a new image.
    fn draw_caption(&self, img: DynamicImage,
                    valign: VAlign, text: &str) -> Result<DynamicImage, ComposeError> {
        let mut img = img;
        let style = &self.composer.config.style;

        debug!("Rendering {v} text: {text:?}", text = text,
            v = format!("{:?}", valign).to_lowercase());

        trace!("Loading font `{}`...", style.font);
        let font = self.composer.font_loader.load(&style.font)
            .map_err(|_| ComposeError::Font(style.font.clone()))?;

        let Size{width, height} = self.viewport();
        let width = width as f32;
        let height = height as f32;

        // Make sure the vertical margin isn't too large by limiting it
        // to a small percentage of the viewport height.
        let max_vmargin: f32 = 16.0;
        let vmargin = max_vmargin.min(height * 0.02);
        trace!("Vertical text margin computed as {}", vmargin);

        // Similarly for the horizontal margin.
        let max_hmargin: f32 = 16.0;
        let hmargin = max_hmargin.min(width * 0.02);
        trace!("Horizontal text margin computed as {}", hmargin);

        let margin_vector = vector(hmargin, vmargin);
        let rect: Rect<f32> = Rect{
            min: point(0.0, 0.0) + margin_vector,
            max: point(width, height) - margin_vector,
        };

        // Captions are always centered; only the vertical edge varies.
        let alignment = (HAlign::Center, valign);

        // Draw four copies of the text, shifted in four diagonal directions,
        // to create the basis for an outline.
        if let Some(outline_color) = style.outline {
            for &v in [vector(-OUTLINE_WIDTH, -OUTLINE_WIDTH),
                       vector(OUTLINE_WIDTH, -OUTLINE_WIDTH),
                       vector(OUTLINE_WIDTH, OUTLINE_WIDTH),
                       vector(-OUTLINE_WIDTH, OUTLINE_WIDTH)].iter() {
                let outline_style = Style::new(&**font, style.size, outline_color);
                let rect = Rect{min: rect.min + v, max: rect.max + v};
                img = text::render_text(img, text, alignment, rect, outline_style);
            }
        }

        // Now render the fill text in the original position,
        // so that it paints over the outline copies.
        let fill_style = Style::new(&**font, style.size, style.color);
        img = text::render_text(img, text, alignment, rect, fill_style);

        Ok(img)
    }

    /// Draw whatever chrome bars are currently visible.
    /// Returns a new image.
    fn draw_chrome(&self, img: DynamicImage) -> DynamicImage {
        let mut img = img;
        let Size{width, height} = self.viewport();

        for bar in self.chrome().bars() {
            if !bar.is_visible() {
                continue;
            }
            let bar_height = bar.height().min(height);
            let (y_min, y_max) = if bar.is_at_top() {
                (0, bar_height)
            } else {
                (height - bar_height, height)
            };
            trace!("Drawing {:?} over rows {}..{}", bar.kind(), y_min, y_max);
            for y in y_min..y_max {
                for x in 0..width {
                    img.put_pixel(x, y, CHROME_COLOR.to_rgba(0xff));
                }
            }
        }
        img
    }
}
