//! Module implementing the editor state and the `Meme` value object.

use std::fmt;

use image::{DynamicImage, GenericImage};

use compose::{Chrome, Composer, Scene};
use model::Size;
use model::constants::{DEFAULT_BOTTOM_TEXT, DEFAULT_TOP_TEXT};
use resources::{Font, Loader};
use super::error::EditorError;
use super::fields::{CaptionField, Slot};


/// A finished meme: the caption texts, the photo they were rendered over,
/// and the flattened result.
///
/// Immutable once constructed; saving again replaces the whole value.
/// The flattened image is always the rasterization of the photo plus
/// the captions at the moment of composition -- it is never patched up
/// after the fact.
#[derive(Clone)]
#[must_use = "unused meme which must be used"]
pub struct Meme {
    top_text: String,
    bottom_text: String,
    original_image: DynamicImage,
    memed_image: DynamicImage,
}

impl Meme {
    #[inline]
    pub fn top_text(&self) -> &str {
        &self.top_text
    }

    #[inline]
    pub fn bottom_text(&self) -> &str {
        &self.bottom_text
    }

    /// The photo the meme was composed from.
    #[inline]
    pub fn original_image(&self) -> &DynamicImage {
        &self.original_image
    }

    /// The flattened meme.
    #[inline]
    pub fn memed_image(&self) -> &DynamicImage {
        &self.memed_image
    }

    /// Consume the meme, keeping only the flattened image.
    #[inline]
    pub fn into_memed_image(self) -> DynamicImage {
        self.memed_image
    }
}

impl fmt::Debug for Meme {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let (orig_width, orig_height) = self.original_image.dimensions();
        let (memed_width, memed_height) = self.memed_image.dimensions();
        write!(fmt, "Meme({:?}/{:?} over {}x{}, flattened to {}x{})",
            self.top_text, self.bottom_text,
            orig_width, orig_height, memed_width, memed_height)
    }
}


/// State of the meme editor screen.
///
/// Holds everything the screen can mutate: the selected photo, the two
/// caption fields and the most recently saved meme. Dies with the screen;
/// nothing here persists across sessions.
pub struct EditorState {
    viewport: Size,
    chrome: Chrome,
    selected_image: Option<DynamicImage>,
    top: CaptionField,
    bottom: CaptionField,
    last_meme: Option<Meme>,
}

impl EditorState {
    /// Create the state a freshly opened editor screen starts with.
    pub fn new(viewport: Size, chrome: Chrome) -> Self {
        EditorState{
            viewport: viewport,
            chrome: chrome,
            selected_image: None,
            top: CaptionField::new(DEFAULT_TOP_TEXT),
            bottom: CaptionField::new(DEFAULT_BOTTOM_TEXT),
            last_meme: None,
        }
    }
}

impl EditorState {
    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    pub fn chrome(&self) -> &Chrome {
        &self.chrome
    }

    #[inline]
    pub fn field(&self, slot: Slot) -> &CaptionField {
        match slot {
            Slot::Top => &self.top,
            Slot::Bottom => &self.bottom,
        }
    }

    #[inline]
    pub fn field_mut(&mut self, slot: Slot) -> &mut CaptionField {
        match slot {
            Slot::Top => &mut self.top,
            Slot::Bottom => &mut self.bottom,
        }
    }

    #[inline]
    pub fn selected_image(&self) -> Option<&DynamicImage> {
        self.selected_image.as_ref()
    }

    #[inline]
    pub fn last_meme(&self) -> Option<&Meme> {
        self.last_meme.as_ref()
    }

    /// Whether the share action should be available.
    #[inline]
    pub fn share_enabled(&self) -> bool {
        self.selected_image.is_some()
    }
}

// Mutations.
impl EditorState {
    /// Put the editor back into its default configuration:
    /// placeholder captions, no photo, sharing disabled.
    pub fn reset(&mut self) {
        debug!("Resetting editor to the default configuration");
        self.top.reset();
        self.bottom.reset();
        self.selected_image = None;
    }

    /// Adopt a photo picked by the user. Enables sharing.
    pub fn set_image(&mut self, image: DynamicImage) {
        let (width, height) = image.dimensions();
        debug!("Photo of {}x{} selected", width, height);
        self.selected_image = Some(image);
    }

    /// Store a meme as the most recently saved one.
    pub(super) fn remember(&mut self, meme: Meme) {
        debug!("Saving {:?}", meme);
        self.last_meme = Some(meme);
    }
}

// Composing.
impl EditorState {
    /// The current visual state as a compositor scene.
    pub fn scene(&self) -> Scene {
        Scene::new(self.viewport,
                   self.selected_image.as_ref(),
                   self.top.text(), self.bottom.text(),
                   &self.chrome)
    }

    /// Flatten the current state into a `Meme`, without saving it.
    ///
    /// Requires a photo; fails with `EditorError::NoImage` otherwise.
    pub fn generate<Fl>(&self, composer: &Composer<Fl>) -> Result<Meme, EditorError>
        where Fl: Loader<Item=Font>
    {
        let original = match self.selected_image {
            Some(ref image) => image,
            None => return Err(EditorError::NoImage),
        };
        let memed = composer.compose(&self.scene())?;
        Ok(Meme{
            top_text: self.top.text().to_owned(),
            bottom_text: self.bottom.text().to_owned(),
            original_image: original.clone(),
            memed_image: memed,
        })
    }

    /// Flatten the current state and save the result as the last meme.
    ///
    /// On failure nothing is saved and the previous meme stays around.
    pub fn compose<Fl>(&mut self, composer: &Composer<Fl>) -> Result<Meme, EditorError>
        where Fl: Loader<Item=Font>
    {
        let meme = self.generate(composer)?;
        self.remember(meme.clone());
        Ok(meme)
    }
}

impl fmt::Debug for EditorState {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("EditorState");
        ds.field("viewport", &self.viewport);
        match self.selected_image {
            Some(ref image) => {
                let (width, height) = image.dimensions();
                ds.field("selected_image", &format!("{}x{}", width, height));
            }
            None => { ds.field("selected_image", &"<none>"); }
        }
        ds.field("top", &self.top);
        ds.field("bottom", &self.bottom);
        if let Some(ref meme) = self.last_meme {
            ds.field("last_meme", meme);
        }
        ds.finish()
    }
}
