//! Module implementing keyboard avoidance for the editor viewport.

use super::signals::Signal;


/// Position of the editor viewport relative to its natural origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewportState {
    /// The viewport sits at its natural origin.
    Neutral,
    /// The viewport is shifted upward by the stored keyboard height.
    Shifted(f32),
}


/// State machine that moves the viewport out of the keyboard's way.
///
/// Only the bottom caption field can collide with the keyboard
/// (the top one sits nowhere near it), so the machine tracks whether
/// that particular field holds input focus.
#[derive(Debug)]
pub struct KeyboardAvoidance {
    state: ViewportState,
    bottom_focused: bool,
}

impl KeyboardAvoidance {
    #[inline]
    pub fn new() -> Self {
        KeyboardAvoidance{
            state: ViewportState::Neutral,
            bottom_focused: false,
        }
    }
}

impl KeyboardAvoidance {
    #[inline]
    pub fn state(&self) -> ViewportState {
        self.state
    }

    /// Vertical origin of the viewport: 0 when neutral, negative when shifted.
    pub fn origin_y(&self) -> f32 {
        match self.state {
            ViewportState::Neutral => 0.0,
            ViewportState::Shifted(height) => -height,
        }
    }

    /// Record whether the bottom caption field holds input focus.
    #[inline]
    pub fn set_bottom_focused(&mut self, focused: bool) {
        self.bottom_focused = focused;
    }

    /// Advance the machine with a signal from the bus.
    pub fn handle(&mut self, signal: &Signal) {
        match *signal {
            Signal::KeyboardWillShow{height} => {
                if self.bottom_focused {
                    debug!("Shifting viewport up by {}px for the keyboard", height);
                    // The shift is the reported height, not an adjustment
                    // of the previous origin, so repeated signals cannot
                    // accumulate into drift.
                    self.state = ViewportState::Shifted(height);
                }
            }
            Signal::KeyboardWillHide => {
                if self.bottom_focused {
                    debug!("Keyboard hiding, viewport back at its origin");
                    self.state = ViewportState::Neutral;
                }
            }
            Signal::AppEnteredBackground => {
                // Restore unconditionally: the screen must never come back
                // from the background half-shifted.
                self.state = ViewportState::Neutral;
            }
        }
    }
}

impl Default for KeyboardAvoidance {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use editor::signals::Signal;
    use super::{KeyboardAvoidance, ViewportState};

    #[test]
    fn show_shifts_when_bottom_field_focused() {
        let mut keyboard = KeyboardAvoidance::new();
        keyboard.set_bottom_focused(true);
        keyboard.handle(&Signal::KeyboardWillShow{height: 216.0});
        assert_eq!(ViewportState::Shifted(216.0), keyboard.state());
        assert_eq!(-216.0, keyboard.origin_y());
    }

    #[test]
    fn show_does_nothing_for_the_top_field() {
        let mut keyboard = KeyboardAvoidance::new();
        keyboard.handle(&Signal::KeyboardWillShow{height: 216.0});
        assert_eq!(ViewportState::Neutral, keyboard.state());
        assert_eq!(0.0, keyboard.origin_y());
    }

    #[test]
    fn repeated_shows_use_the_last_height() {
        let mut keyboard = KeyboardAvoidance::new();
        keyboard.set_bottom_focused(true);
        keyboard.handle(&Signal::KeyboardWillShow{height: 216.0});
        keyboard.handle(&Signal::KeyboardWillShow{height: 260.0});
        // Assignment semantics: no accumulation across signals.
        assert_eq!(ViewportState::Shifted(260.0), keyboard.state());
    }

    #[test]
    fn hide_restores_the_origin_exactly() {
        let mut keyboard = KeyboardAvoidance::new();
        keyboard.set_bottom_focused(true);
        keyboard.handle(&Signal::KeyboardWillShow{height: 216.0});
        keyboard.handle(&Signal::KeyboardWillHide);
        assert_eq!(0.0, keyboard.origin_y());
        // Hiding again must be idempotent.
        keyboard.handle(&Signal::KeyboardWillHide);
        assert_eq!(0.0, keyboard.origin_y());
    }

    #[test]
    fn backgrounding_restores_regardless_of_focus() {
        let mut keyboard = KeyboardAvoidance::new();
        keyboard.set_bottom_focused(true);
        keyboard.handle(&Signal::KeyboardWillShow{height: 301.5});
        keyboard.set_bottom_focused(false);
        keyboard.handle(&Signal::AppEnteredBackground);
        assert_eq!(ViewportState::Neutral, keyboard.state());
    }
}
