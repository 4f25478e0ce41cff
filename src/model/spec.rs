//! Module defining the meme specification type.

use std::fmt;
use std::path::PathBuf;


/// Describes a meme to compose. Used as an input structure.
///
/// This is the batch-mode counterpart of interactive editing:
/// a photo, the two optional caption texts, and (optionally)
/// the dimensions of the viewport to flatten them within.
#[derive(Clone, Deserialize, PartialEq)]
pub struct MemeSpec {
    /// Path to the photo used as the meme background.
    pub image: PathBuf,
    /// Top caption text. The placeholder is used if absent.
    #[serde(default)]
    pub top_text: Option<String>,
    /// Bottom caption text. The placeholder is used if absent.
    #[serde(default)]
    pub bottom_text: Option<String>,
    /// Width of the composed meme (if different from the photo's).
    #[serde(default)]
    pub width: Option<u32>,
    /// Height of the composed meme (if different from the photo's).
    #[serde(default)]
    pub height: Option<u32>,
}

impl MemeSpec {
    /// Create a spec that composes given photo as-is,
    /// with both captions left to their placeholders.
    #[inline]
    pub fn for_image<P: Into<PathBuf>>(path: P) -> Self {
        MemeSpec{
            image: path.into(),
            top_text: None,
            bottom_text: None,
            width: None,
            height: None,
        }
    }

    /// Whether the spec carries any explicit caption text.
    #[inline]
    pub fn has_text(&self) -> bool {
        self.top_text.as_ref().map(|t| !t.is_empty()).unwrap_or(false) ||
        self.bottom_text.as_ref().map(|t| !t.is_empty()).unwrap_or(false)
    }
}

impl fmt::Debug for MemeSpec {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("MemeSpec");
        ds.field("image", &self.image);

        macro_rules! fmt_opt_field {
            ($name:ident) => (
                if let Some(ref $name) = self.$name {
                    ds.field(stringify!($name), $name);
                }
            );
        }
        fmt_opt_field!(top_text);
        fmt_opt_field!(bottom_text);
        fmt_opt_field!(width);
        fmt_opt_field!(height);

        ds.finish()
    }
}


#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use serde_json;
    use super::MemeSpec;

    #[test]
    fn minimal_json() {
        let spec: MemeSpec = serde_json::from_str(r#"{"image": "cat.jpg"}"#).unwrap();
        assert_eq!(PathBuf::from("cat.jpg"), spec.image);
        assert_eq!(None, spec.top_text);
        assert_eq!(None, spec.bottom_text);
        assert!(!spec.has_text());
    }

    #[test]
    fn full_json() {
        let spec: MemeSpec = serde_json::from_str(r#"{
            "image": "cat.jpg",
            "top_text": "HI",
            "bottom_text": "BYE",
            "width": 640,
            "height": 480
        }"#).unwrap();
        assert_eq!(Some("HI".to_owned()), spec.top_text);
        assert_eq!(Some("BYE".to_owned()), spec.bottom_text);
        assert_eq!(Some(640), spec.width);
        assert!(spec.has_text());
    }
}
