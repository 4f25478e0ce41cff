//! Module with the compositor configuration.

use model::CaptionStyle;


/// Structure holding configuration for the `Composer`.
#[derive(Clone, Debug)]
pub struct ComposeConfig {
    /// Style that both captions are rendered with.
    pub style: CaptionStyle,
    /// Quality of the generated JPEG images (in %).
    pub jpeg_quality: u8,
}

impl Default for ComposeConfig {
    /// Initialize ComposeConfig with default values.
    fn default() -> Self {
        ComposeConfig{
            style: CaptionStyle::default(),
            jpeg_quality: 85,
        }
    }
}
