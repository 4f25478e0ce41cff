//! Module for loading the fonts that captions are rendered with.

use std::error::Error;
use std::fmt;
use std::path::Path;

use rusttype::{self, FontCollection};

use super::Loader;
use super::filesystem::{BytesLoader, FileLoader};


pub const FILE_EXTENSION: &'static str = "ttf";


/// Font that can be used to render caption text.
macro_attr! {
    #[derive(NewtypeDeref!, NewtypeFrom!)]
    pub struct Font(rusttype::Font<'static>);
}
impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Font(...)")
    }
}


/// Loader for fonts stored as TTF files in a directory.
#[derive(Debug)]
pub struct FontLoader {
    inner: BytesLoader<'static>,
}

impl FontLoader {
    pub fn new<D: AsRef<Path>>(directory: D) -> Self {
        FontLoader{
            inner: BytesLoader::new(
                FileLoader::for_extension(directory, FILE_EXTENSION))
        }
    }
}

impl Loader for FontLoader {
    type Item = Font;
    type Err = Box<Error>;

    fn load<'n>(&self, name: &'n str) -> Result<Font, Self::Err> {
        let bytes = self.inner.load(name)?;

        let fonts: Vec<_> = FontCollection::from_bytes(bytes).into_fonts().collect();
        match fonts.len() {
            0 => {
                error!("No fonts in a file for `{}` font resource", name);
                Err("0 fonts".into())
            }
            1 => {
                debug!("Font `{}` loaded successfully", name);
                Ok(fonts.into_iter().next().unwrap().into())
            }
            _ => {
                error!("Font file for `{}` resource contains {} fonts, expected one",
                    name, fonts.len());
                Err(">1 font".into())
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use model::constants::DEFAULT_FONT;
    use resources::Loader;
    use super::FontLoader;

    const FONT_DIR: &'static str = "data/fonts";

    #[test]
    fn load_bundled_font() {
        let loader = FontLoader::new(FONT_DIR);
        let font = loader.load(DEFAULT_FONT).unwrap();
        // Ensure the font actually carries glyphs for caption text.
        assert!(font.glyph('A').is_some());
    }

    #[test]
    fn missing_font() {
        let loader = FontLoader::new(FONT_DIR);
        assert!(loader.load("NoSuchFont").is_err());
    }
}
