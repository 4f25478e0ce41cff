//! Module defining the model types.

use std::fmt;

use image::{Rgb, Rgba};

use super::constants::{DEFAULT_FONT, DEFAULT_OUTLINE_COLOR,
                       DEFAULT_TEXT_COLOR, DEFAULT_TEXT_SIZE};


/// Horizontal alignment of text within a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

/// Vertical alignment of text within a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VAlign {
    Top,
    Middle,
    Bottom,
}


/// Presentation context an editor screen is shown in.
///
/// This decides which chrome the screen itself owns: a standalone
/// screen carries its own navigation bar, an embedded one inherits it
/// from the containing navigation flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    Standalone,
    NavigationEmbedded,
}


/// RGB color of a rendered element.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    #[inline]
    pub fn gray(value: u8) -> Self {
        Color(value, value, value)
    }

    #[inline]
    pub fn invert(self) -> Self {
        let Color(r, g, b) = self;
        Color(0xff - r, 0xff - g, 0xff - b)
    }

    #[inline]
    pub fn to_rgb(&self) -> Rgb<u8> {
        let &Color(r, g, b) = self;
        Rgb{data: [r, g, b]}
    }

    #[inline]
    pub fn to_rgba(&self, alpha: u8) -> Rgba<u8> {
        let &Color(r, g, b) = self;
        Rgba{data: [r, g, b, alpha]}
    }
}

impl From<Color> for Rgb<u8> {
    #[inline]
    fn from(color: Color) -> Rgb<u8> {
        color.to_rgb()
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let &Color(r, g, b) = self;
        write!(fmt, "#{:0>2x}{:0>2x}{:0>2x}", r, g, b)
    }
}


/// Pixel dimensions of a viewport or an image.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    #[inline]
    pub fn new(width: u32, height: u32) -> Self {
        Size{width: width, height: height}
    }

    /// Whether the size spans zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<(u32, u32)> for Size {
    #[inline]
    fn from((width, height): (u32, u32)) -> Self {
        Size::new(width, height)
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Size({}x{})", self.width, self.height)
    }
}

impl fmt::Display for Size {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{}x{}", self.width, self.height)
    }
}


/// Style that caption text is rendered with.
///
/// There is exactly one style for the whole editor;
/// the defaults here are the classic image macro look.
#[derive(Clone, PartialEq)]
pub struct CaptionStyle {
    /// Name of the font to render captions with.
    pub font: String,  // TODO: this could be a Cow, but needs lifetime param
    /// Size of the caption text, in pixels.
    pub size: f32,
    /// Fill color of the text.
    pub color: Color,
    /// Color of the text outline, if any.
    ///
    /// Pass `None` to draw the captions without an outline.
    pub outline: Option<Color>,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        CaptionStyle{
            font: DEFAULT_FONT.into(),
            size: DEFAULT_TEXT_SIZE,
            color: DEFAULT_TEXT_COLOR,
            outline: Some(DEFAULT_OUTLINE_COLOR),
        }
    }
}

impl fmt::Debug for CaptionStyle {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "{{{font:?}@{size} {outline}[{color:?}]}}",
            font = self.font,
            size = self.size,
            color = self.color,
            outline = self.outline.map(|o| format!("{:?}", o)).unwrap_or_else(String::new))
    }
}


#[cfg(test)]
mod tests {
    use model::constants::DEFAULT_TEXT_COLOR;
    use super::{CaptionStyle, Color, Size};

    #[test]
    fn color_invert() {
        assert_eq!(Color(0, 0, 0), Color(0xff, 0xff, 0xff).invert());
        assert_eq!(Color(0xff, 0x00, 0xff), Color(0x00, 0xff, 0x00).invert());
    }

    #[test]
    fn color_to_rgba() {
        let rgba = Color(1, 2, 3).to_rgba(42);
        assert_eq!([1, 2, 3, 42], rgba.data);
    }

    #[test]
    fn size_emptiness() {
        assert!(Size::new(0, 0).is_empty());
        assert!(Size::new(0, 100).is_empty());
        assert!(Size::new(100, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }

    #[test]
    fn default_style_is_the_meme_look() {
        let style = CaptionStyle::default();
        assert_eq!(DEFAULT_TEXT_COLOR, style.color);
        assert_eq!(Some(style.color.invert()), style.outline);
    }
}
