//! Module defining constants relevant to the data model.

use super::types::{Color, Size};


/// Placeholder text of the top caption field.
pub const DEFAULT_TOP_TEXT: &'static str = "TOP";
/// Placeholder text of the bottom caption field.
pub const DEFAULT_BOTTOM_TEXT: &'static str = "BOTTOM";

/// Name of the default caption font.
pub const DEFAULT_FONT: &'static str = "DejaVuSansCondensed-Bold";
/// Default size of the caption text, in pixels.
pub const DEFAULT_TEXT_SIZE: f32 = 40.0;

/// Default fill color of the caption text.
pub const DEFAULT_TEXT_COLOR: Color = Color(0xff, 0xff, 0xff);
/// Default color of the text outline.
/// This should be the inversion of DEFAULT_TEXT_COLOR.
pub const DEFAULT_OUTLINE_COLOR: Color = Color(0x0, 0x0, 0x0);
/// Width of the text outline, in pixels.
pub const OUTLINE_WIDTH: f32 = 3.0;

/// Fill color of the viewport behind the photo.
pub const BACKGROUND_COLOR: Color = Color(0x0, 0x0, 0x0);
/// Fill color of the chrome bars.
pub const CHROME_COLOR: Color = Color(0x1c, 0x1c, 0x1e);

/// Height of the navigation bar chrome, in pixels.
pub const NAVIGATION_BAR_HEIGHT: u32 = 44;
/// Height of the toolbar chrome, in pixels.
pub const TOOL_BAR_HEIGHT: u32 = 44;

/// Default dimensions of the editor viewport.
pub const DEFAULT_VIEWPORT: Size = Size{width: 375, height: 667};

/// Maximum length (in Unicode codepoints) of a single caption text.
pub const MAX_CAPTION_LENGTH: usize = 256;
