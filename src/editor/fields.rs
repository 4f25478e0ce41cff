//! Module implementing the caption text fields.

use model::constants::MAX_CAPTION_LENGTH;


/// Which caption field of the editor is being referred to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    Top,
    Bottom,
}


/// A single editable caption field.
///
/// The field starts out showing its placeholder; the placeholder text
/// is real content as far as composing is concerned (an untouched editor
/// produces the classic TOP/BOTTOM meme).
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionField {
    placeholder: String,
    text: String,
    editing: bool,
}

impl CaptionField {
    /// Create a field showing given placeholder.
    pub fn new<S: Into<String>>(placeholder: S) -> Self {
        let placeholder = placeholder.into();
        CaptionField{
            text: placeholder.clone(),
            placeholder: placeholder,
            editing: false,
        }
    }
}

impl CaptionField {
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    #[inline]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Whether the field still shows its placeholder rather than user text.
    #[inline]
    pub fn shows_placeholder(&self) -> bool {
        self.text == self.placeholder
    }

    /// Replace the field's content, as if typed by the user.
    pub fn set_text<S: Into<String>>(&mut self, text: S) {
        let mut text = text.into();
        let length = text.chars().count();
        if length > MAX_CAPTION_LENGTH {
            warn!("Caption text of {} codepoints truncated to {}",
                length, MAX_CAPTION_LENGTH);
            text = text.chars().take(MAX_CAPTION_LENGTH).collect();
        }
        self.text = text;
    }

    /// Put the field back into its pristine placeholder state.
    pub fn reset(&mut self) {
        self.text = self.placeholder.clone();
        self.editing = false;
    }
}


/// Delegate implementing the placeholder behavior of caption fields.
///
/// One instance is shared by both fields: the behavior is identical,
/// only the placeholder (carried by the field itself) differs.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldDelegate;

impl FieldDelegate {
    /// The field gained input focus.
    ///
    /// A pristine placeholder is cleared out of the user's way;
    /// anything the user has typed before stays untouched.
    pub fn editing_began(&self, field: &mut CaptionField) {
        field.editing = true;
        if field.shows_placeholder() {
            trace!("Clearing placeholder {:?} on focus", field.placeholder);
            field.text.clear();
        }
    }

    /// The field lost input focus.
    ///
    /// A field left empty gets its placeholder back.
    pub fn editing_ended(&self, field: &mut CaptionField) {
        field.editing = false;
        if field.text.is_empty() {
            trace!("Restoring placeholder {:?} on blur", field.placeholder);
            field.text = field.placeholder.clone();
        }
    }
}


#[cfg(test)]
mod tests {
    use model::constants::{DEFAULT_BOTTOM_TEXT, DEFAULT_TOP_TEXT, MAX_CAPTION_LENGTH};
    use super::{CaptionField, FieldDelegate};

    #[test]
    fn focusing_clears_the_placeholder() {
        let delegate = FieldDelegate::default();
        let mut field = CaptionField::new(DEFAULT_TOP_TEXT);

        delegate.editing_began(&mut field);
        assert!(field.is_editing());
        assert_eq!("", field.text());
    }

    #[test]
    fn blurring_an_empty_field_restores_the_placeholder() {
        let delegate = FieldDelegate::default();
        let mut field = CaptionField::new(DEFAULT_BOTTOM_TEXT);

        delegate.editing_began(&mut field);
        delegate.editing_ended(&mut field);
        assert!(!field.is_editing());
        assert_eq!(DEFAULT_BOTTOM_TEXT, field.text());
    }

    #[test]
    fn user_text_is_never_clobbered() {
        let delegate = FieldDelegate::default();
        let mut field = CaptionField::new(DEFAULT_TOP_TEXT);

        delegate.editing_began(&mut field);
        field.set_text("ACTUAL LULZ");
        delegate.editing_ended(&mut field);
        assert_eq!("ACTUAL LULZ", field.text());

        // Refocusing must keep the user's text around, too.
        delegate.editing_began(&mut field);
        assert_eq!("ACTUAL LULZ", field.text());
    }

    #[test]
    fn one_delegate_serves_both_fields() {
        let delegate = FieldDelegate::default();
        let mut top = CaptionField::new(DEFAULT_TOP_TEXT);
        let mut bottom = CaptionField::new(DEFAULT_BOTTOM_TEXT);

        delegate.editing_began(&mut top);
        delegate.editing_began(&mut bottom);
        assert_eq!("", top.text());
        assert_eq!("", bottom.text());

        delegate.editing_ended(&mut top);
        delegate.editing_ended(&mut bottom);
        assert_eq!(DEFAULT_TOP_TEXT, top.text());
        assert_eq!(DEFAULT_BOTTOM_TEXT, bottom.text());
    }

    #[test]
    fn overlong_captions_are_truncated() {
        let mut field = CaptionField::new(DEFAULT_TOP_TEXT);
        let long: String = ::std::iter::repeat('A').take(MAX_CAPTION_LENGTH + 42).collect();
        field.set_text(long);
        assert_eq!(MAX_CAPTION_LENGTH, field.text().chars().count());
    }
}
