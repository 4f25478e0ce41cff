//! Module defining the visual scene that gets flattened into a meme.

use std::cell::Cell;
use std::fmt;

use image::{DynamicImage, GenericImage};

use model::{Presentation, Size};
use model::constants::{NAVIGATION_BAR_HEIGHT, TOOL_BAR_HEIGHT};


/// Kind of a chrome bar laid over the editor viewport.
///
/// Chrome is never part of the meme content; it exists so that the
/// rasterizer can draw exactly what the screen shows, and so that
/// flattening can prove the bars were concealed for its duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BarKind {
    /// Bar with the editor actions, at the top of the viewport.
    NavigationBar,
    /// Bar with the photo sources, at the bottom of the viewport.
    ToolBar,
}

/// A single chrome bar and its visibility.
#[derive(Debug)]
pub struct Bar {
    kind: BarKind,
    // The screen model is single-threaded event wiring,
    // hence a Cell rather than any synchronization.
    visible: Cell<bool>,
}

impl Bar {
    #[inline]
    fn new(kind: BarKind) -> Self {
        Bar{kind: kind, visible: Cell::new(true)}
    }

    #[inline]
    pub fn kind(&self) -> BarKind {
        self.kind
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visible.get()
    }

    /// Height of the bar, in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        match self.kind {
            BarKind::NavigationBar => NAVIGATION_BAR_HEIGHT,
            BarKind::ToolBar => TOOL_BAR_HEIGHT,
        }
    }

    /// Whether the bar sits at the top edge of the viewport.
    #[inline]
    pub fn is_at_top(&self) -> bool {
        self.kind == BarKind::NavigationBar
    }
}


/// The set of chrome bars a particular editor screen owns.
#[derive(Debug)]
pub struct Chrome {
    bars: Vec<Bar>,
}

impl Chrome {
    /// Chrome owned by a screen shown in given presentation context.
    ///
    /// A standalone screen carries both its bars; a screen embedded in
    /// a navigation flow only owns the toolbar (the navigation bar
    /// belongs to the containing flow and is not part of this viewport).
    pub fn for_presentation(presentation: Presentation) -> Self {
        let bars = match presentation {
            Presentation::Standalone => vec![
                Bar::new(BarKind::NavigationBar),
                Bar::new(BarKind::ToolBar),
            ],
            Presentation::NavigationEmbedded => vec![
                Bar::new(BarKind::ToolBar),
            ],
        };
        Chrome{bars: bars}
    }

    /// Chrome-less variant, mostly useful in tests.
    #[inline]
    pub fn none() -> Self {
        Chrome{bars: vec![]}
    }

    #[inline]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Whether any chrome would currently be drawn.
    pub fn any_visible(&self) -> bool {
        self.bars.iter().any(|b| b.is_visible())
    }
}


/// Guard that conceals the chrome for as long as it lives.
///
/// Visibility is restored when the guard is dropped, which makes the
/// restoration happen regardless of how rasterization went.
#[must_use = "unused guard which will restore chrome immediately"]
pub struct ChromeGuard<'c> {
    chrome: &'c Chrome,
    saved: Vec<bool>,
}

impl<'c> ChromeGuard<'c> {
    pub fn conceal(chrome: &'c Chrome) -> Self {
        let saved: Vec<_> = chrome.bars.iter()
            .map(|b| b.visible.replace(false))
            .collect();
        trace!("Concealed {} chrome bar(s)", saved.len());
        ChromeGuard{chrome: chrome, saved: saved}
    }
}

impl<'c> Drop for ChromeGuard<'c> {
    fn drop(&mut self) {
        for (bar, &was_visible) in self.chrome.bars.iter().zip(self.saved.iter()) {
            bar.visible.set(was_visible);
        }
        trace!("Restored visibility of {} chrome bar(s)", self.saved.len());
    }
}


/// The visual state of the editor screen at a point in time:
/// everything the rasterizer needs to flatten it into a single image.
pub struct Scene<'s> {
    viewport: Size,
    background: Option<&'s DynamicImage>,
    top_text: &'s str,
    bottom_text: &'s str,
    chrome: &'s Chrome,
}

impl<'s> Scene<'s> {
    #[inline]
    pub fn new(viewport: Size,
               background: Option<&'s DynamicImage>,
               top_text: &'s str,
               bottom_text: &'s str,
               chrome: &'s Chrome) -> Self {
        Scene{
            viewport: viewport,
            background: background,
            top_text: top_text,
            bottom_text: bottom_text,
            chrome: chrome,
        }
    }
}

impl<'s> Scene<'s> {
    #[inline]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    #[inline]
    pub fn background(&self) -> Option<&DynamicImage> {
        self.background
    }

    #[inline]
    pub fn top_text(&self) -> &str {
        self.top_text
    }

    #[inline]
    pub fn bottom_text(&self) -> &str {
        self.bottom_text
    }

    #[inline]
    pub fn chrome(&self) -> &Chrome {
        self.chrome
    }

    /// Whether the scene includes any caption text.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.top_text.is_empty() || !self.bottom_text.is_empty()
    }
}

impl<'s> fmt::Debug for Scene<'s> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut ds = fmt.debug_struct("Scene");
        ds.field("viewport", &self.viewport);
        if let Some(bg) = self.background {
            let (width, height) = bg.dimensions();
            ds.field("background", &format!("{}x{}", width, height));
        }
        if !self.top_text.is_empty() {
            ds.field("top_text", &self.top_text);
        }
        if !self.bottom_text.is_empty() {
            ds.field("bottom_text", &self.bottom_text);
        }
        ds.field("chrome", &self.chrome.bars.len());
        ds.finish()
    }
}


#[cfg(test)]
mod tests {
    use model::Presentation;
    use super::{BarKind, Chrome, ChromeGuard};

    #[test]
    fn standalone_chrome() {
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        let kinds: Vec<_> = chrome.bars().iter().map(|b| b.kind()).collect();
        assert_eq!(vec![BarKind::NavigationBar, BarKind::ToolBar], kinds);
        assert!(chrome.any_visible());
    }

    #[test]
    fn embedded_chrome_has_no_navigation_bar() {
        let chrome = Chrome::for_presentation(Presentation::NavigationEmbedded);
        assert!(chrome.bars().iter().all(|b| b.kind() != BarKind::NavigationBar));
    }

    #[test]
    fn guard_conceals_and_restores() {
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        {
            let _guard = ChromeGuard::conceal(&chrome);
            assert!(!chrome.any_visible());
        }
        assert!(chrome.any_visible());
    }

    #[test]
    fn guard_restores_prior_state_not_blanket_visibility() {
        let chrome = Chrome::for_presentation(Presentation::Standalone);
        chrome.bars()[0].visible.set(false);
        {
            let _guard = ChromeGuard::conceal(&chrome);
            assert!(!chrome.any_visible());
        }
        assert!(!chrome.bars()[0].is_visible());
        assert!(chrome.bars()[1].is_visible());
    }
}
