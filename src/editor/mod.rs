//! Module implementing the meme editor screen.

mod error;
mod fields;
mod keyboard;
mod signals;
mod state;

pub use self::error::EditorError;
pub use self::fields::{CaptionField, FieldDelegate, Slot};
pub use self::keyboard::{KeyboardAvoidance, ViewportState};
pub use self::signals::{Signal, SignalBus, Subscription};
pub use self::state::{EditorState, Meme};


use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use image::ImageFormat;

use compose::{Chrome, ComposeConfig, Composer};
use model::{Presentation, Size};
use model::constants::DEFAULT_VIEWPORT;
use share::{ShareOutcome, ShareSurface, DEFAULT_SHARE_FORMAT};
use source::{camera, MediaError, MediaPicker, MediaSource, PickOutcome};


/// Structure holding configuration for the editor screen.
#[derive(Clone, Debug)]
pub struct EditorConfig {
    /// Directory to load caption fonts from.
    pub font_directory: PathBuf,
    /// Dimensions of the editor viewport.
    pub viewport: Size,
    /// Presentation context the screen is shown in.
    pub presentation: Presentation,
    /// Compositor configuration.
    pub compose: ComposeConfig,
    /// Format the flattened meme is encoded in for sharing.
    pub share_format: ImageFormat,
}

impl Default for EditorConfig {
    /// Initialize EditorConfig with default values.
    fn default() -> Self {
        EditorConfig{
            font_directory: PathBuf::from("data/fonts"),
            viewport: DEFAULT_VIEWPORT,
            presentation: Presentation::Standalone,
            compose: ComposeConfig::default(),
            share_format: DEFAULT_SHARE_FORMAT,
        }
    }
}


/// The meme editor screen.
///
/// A thin orchestrator over the editor state, the compositor and the
/// picker/share/keyboard seams. One type parameterized by `Presentation`
/// replaces what used to be two near-identical screens.
pub struct MemeEditor {
    config: EditorConfig,
    composer: Composer,
    state: EditorState,
    /// One delegate instance shared by both caption fields.
    delegate: FieldDelegate,
    keyboard: Rc<RefCell<KeyboardAvoidance>>,
    subscription: Option<Subscription>,
    camera_available: bool,
    closed: bool,
}

impl MemeEditor {
    /// Create the editor screen with given configuration.
    pub fn new(config: EditorConfig) -> Self {
        let mut composer = Composer::new(&config.font_directory);
        *composer.config_mut() = config.compose.clone();
        let state = EditorState::new(
            config.viewport, Chrome::for_presentation(config.presentation));
        MemeEditor{
            config: config,
            composer: composer,
            state: state,
            delegate: FieldDelegate::default(),
            keyboard: Rc::new(RefCell::new(KeyboardAvoidance::new())),
            subscription: None,
            camera_available: false,
            closed: false,
        }
    }
}

// Screen lifecycle.
impl MemeEditor {
    /// The screen became visible.
    ///
    /// Probes for a camera capability and subscribes to the keyboard
    /// & lifecycle signals for as long as the screen stays up.
    pub fn activate(&mut self, bus: &mut SignalBus) {
        self.camera_available = camera::is_available();
        debug!("Editor screen activated (camera available: {})",
            self.camera_available);

        if self.subscription.is_some() {
            warn!("Editor activated twice without deactivation");
            self.deactivate(bus);
        }
        let keyboard = self.keyboard.clone();
        self.subscription = Some(bus.subscribe(move |signal| {
            keyboard.borrow_mut().handle(signal)
        }));
    }

    /// The screen is going away. Unsubscribes from the signal bus.
    pub fn deactivate(&mut self, bus: &mut SignalBus) {
        if let Some(subscription) = self.subscription.take() {
            bus.unsubscribe(subscription);
        }
        debug!("Editor screen deactivated");
    }

    /// Whether the camera action should be offered.
    #[inline]
    pub fn camera_enabled(&self) -> bool {
        self.camera_available
    }

    /// Whether the screen has finished its job & should be dismissed.
    #[inline]
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Vertical origin of the viewport (0 unless dodging the keyboard).
    #[inline]
    pub fn viewport_origin_y(&self) -> f32 {
        self.keyboard.borrow().origin_y()
    }
}

// State access.
impl MemeEditor {
    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    #[inline]
    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    #[inline]
    pub fn is_share_enabled(&self) -> bool {
        self.state.share_enabled()
    }
}

// Caption editing.
impl MemeEditor {
    /// A caption field gained input focus.
    pub fn begin_editing(&mut self, slot: Slot) {
        self.delegate.editing_began(self.state.field_mut(slot));
        if slot == Slot::Bottom {
            self.keyboard.borrow_mut().set_bottom_focused(true);
        }
    }

    /// Replace the text of a caption field, as if typed by the user.
    #[inline]
    pub fn set_caption(&mut self, slot: Slot, text: &str) {
        self.state.field_mut(slot).set_text(text);
    }

    /// A caption field lost input focus.
    pub fn end_editing(&mut self, slot: Slot) {
        self.delegate.editing_ended(self.state.field_mut(slot));
        if slot == Slot::Bottom {
            self.keyboard.borrow_mut().set_bottom_focused(false);
        }
    }
}

// Picking a photo.
impl MemeEditor {
    /// Ask given picker for a photo from given source.
    ///
    /// Returns whether a photo was actually adopted
    /// (`Ok(false)` on user cancellation, which changes nothing).
    pub fn pick_image<P>(&mut self,
                         picker: &mut P, source: MediaSource) -> Result<bool, MediaError>
        where P: MediaPicker + ?Sized
    {
        if source == MediaSource::Camera && !self.camera_available {
            warn!("Camera requested but no capture capability is present");
            return Err(MediaError::NoCamera);
        }
        match picker.request_image(source)? {
            PickOutcome::Picked(image) => {
                self.state.set_image(image);
                Ok(true)
            }
            PickOutcome::Cancelled => {
                debug!("Photo picking cancelled");
                Ok(false)
            }
        }
    }
}

// Composing & sharing.
impl MemeEditor {
    /// Flatten the current state and save the result as the last meme.
    #[inline]
    pub fn compose(&mut self) -> Result<Meme, EditorError> {
        self.state.compose(&self.composer)
    }

    /// Flatten the current state and present it on given share surface.
    ///
    /// On completion the just-shared meme is saved & the editor closes.
    /// Cancellation is deliberately a no-op: nothing is saved and the
    /// editor stays open.
    pub fn share<S>(&mut self, surface: &mut S) -> Result<ShareOutcome, EditorError>
        where S: ShareSurface + ?Sized
    {
        let meme = self.state.generate(&self.composer)?;
        let payload = self.composer
            .encode(meme.memed_image(), self.config.share_format)
            .map_err(EditorError::Encode)?;

        match surface.present(&payload).map_err(EditorError::Share)? {
            ShareOutcome::Completed => {
                info!("Share completed successfully");
                self.state.remember(meme);
                self.closed = true;
                Ok(ShareOutcome::Completed)
            }
            ShareOutcome::Cancelled => {
                info!("Share was cancelled");
                Ok(ShareOutcome::Cancelled)
            }
        }
    }

    /// Discard the work in progress & go back to the default configuration.
    pub fn cancel(&mut self) {
        self.state.reset();
    }
}


#[cfg(test)]
mod tests {
    use std::io;
    use image::{DynamicImage, ImageBuffer, Rgba};
    use model::Size;
    use share::{SharePayload, ShareOutcome, ShareSurface};
    use source::{MediaError, MediaPicker, MediaSource, PickOutcome};
    use super::{EditorConfig, MemeEditor, Signal, SignalBus, Slot};

    fn editor(viewport: Size) -> MemeEditor {
        MemeEditor::new(EditorConfig{viewport: viewport, ..EditorConfig::default()})
    }

    fn photo(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(
            ImageBuffer::from_pixel(width, height, Rgba{data: [0x00, 0x00, 0xff, 0xff]}))
    }

    /// Picker whose user always dismisses the surface.
    struct AlwaysCancelPicker;
    impl MediaPicker for AlwaysCancelPicker {
        fn request_image(&mut self, _: MediaSource) -> Result<PickOutcome, MediaError> {
            Ok(PickOutcome::Cancelled)
        }
    }

    /// Share surface whose user always dismisses the share sheet.
    struct CancellingSurface;
    impl ShareSurface for CancellingSurface {
        fn present(&mut self, _: &SharePayload) -> io::Result<ShareOutcome> {
            Ok(ShareOutcome::Cancelled)
        }
    }

    /// Share surface that always goes through, recording the payload size.
    struct CompletingSurface {
        shared_bytes: usize,
    }
    impl ShareSurface for CompletingSurface {
        fn present(&mut self, payload: &SharePayload) -> io::Result<ShareOutcome> {
            self.shared_bytes = payload.bytes().len();
            Ok(ShareOutcome::Completed)
        }
    }

    #[test]
    fn activation_manages_the_subscription() {
        let mut bus = SignalBus::new();
        let mut editor = editor(Size::new(64, 64));

        editor.activate(&mut bus);
        assert_eq!(1, bus.subscriber_count());

        editor.deactivate(&mut bus);
        assert_eq!(0, bus.subscriber_count());
    }

    #[test]
    fn keyboard_signals_shift_the_viewport() {
        let mut bus = SignalBus::new();
        let mut editor = editor(Size::new(64, 64));
        editor.activate(&mut bus);

        editor.begin_editing(Slot::Bottom);
        bus.emit(Signal::KeyboardWillShow{height: 216.0});
        assert_eq!(-216.0, editor.viewport_origin_y());

        bus.emit(Signal::KeyboardWillHide);
        assert_eq!(0.0, editor.viewport_origin_y());
        editor.end_editing(Slot::Bottom);

        // The top field never collides with the keyboard.
        editor.begin_editing(Slot::Top);
        bus.emit(Signal::KeyboardWillShow{height: 216.0});
        assert_eq!(0.0, editor.viewport_origin_y());

        editor.deactivate(&mut bus);
    }

    #[test]
    fn signals_are_ignored_after_deactivation() {
        let mut bus = SignalBus::new();
        let mut editor = editor(Size::new(64, 64));

        editor.activate(&mut bus);
        editor.begin_editing(Slot::Bottom);
        editor.deactivate(&mut bus);

        bus.emit(Signal::KeyboardWillShow{height: 216.0});
        assert_eq!(0.0, editor.viewport_origin_y());
    }

    #[test]
    fn camera_is_gated_on_the_capability() {
        // A freshly created (not yet activated) editor has no camera.
        let mut editor = editor(Size::new(64, 64));
        let mut picker = AlwaysCancelPicker;
        match editor.pick_image(&mut picker, MediaSource::Camera) {
            Err(MediaError::NoCamera) => {},
            r => panic!("unexpected pick result: {:?}", r),
        }
    }

    #[test]
    fn cancelled_pick_changes_nothing() {
        let mut editor = editor(Size::new(64, 64));
        let mut picker = AlwaysCancelPicker;

        let picked = editor.pick_image(&mut picker, MediaSource::Library).unwrap();
        assert!(!picked);
        assert!(!editor.is_share_enabled());
    }

    #[test]
    fn completed_share_saves_and_closes() {
        let mut editor = editor(Size::new(64, 64));
        editor.state_mut().set_image(photo(64, 64));

        let mut surface = CompletingSurface{shared_bytes: 0};
        let outcome = editor.share(&mut surface).unwrap();
        assert_eq!(ShareOutcome::Completed, outcome);
        assert!(surface.shared_bytes > 0);
        assert!(editor.state().last_meme().is_some());
        assert!(editor.is_closed());
    }

    #[test]
    fn cancelled_share_is_a_noop() {
        let mut editor = editor(Size::new(64, 64));
        editor.state_mut().set_image(photo(64, 64));

        let outcome = editor.share(&mut CancellingSurface).unwrap();
        assert_eq!(ShareOutcome::Cancelled, outcome);
        assert!(editor.state().last_meme().is_none());
        assert!(!editor.is_closed());
    }

    #[test]
    fn cancel_resets_the_editor() {
        let mut editor = editor(Size::new(64, 64));
        editor.state_mut().set_image(photo(8, 8));
        editor.set_caption(Slot::Top, "WIP");

        editor.cancel();
        assert!(!editor.is_share_enabled());
        assert_eq!("TOP", editor.state().field(Slot::Top).text());
    }
}
