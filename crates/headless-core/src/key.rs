//! Keyboard model for the widget controllers.
//!
//! The recognized navigation keys form a closed set taken from the ARIA
//! Authoring Practices menu pattern. Everything else a host might dispatch
//! arrives as [`Key::Char`], which is what feeds typeahead search.

use bitflags::bitflags;

/// A key press as seen by a widget controller.
///
/// Hosts translate their raw keyboard events into this enum before
/// dispatching commands; keys outside this set are simply not dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Tab,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    /// Any printable character; feeds typeahead search.
    Char(char),
}

impl Key {
    /// The character this key contributes to a typeahead buffer, if any.
    ///
    /// Control characters never feed search. `Space` is not printable here;
    /// the menu controller special-cases it because Space only extends an
    /// already-started search and otherwise activates/closes.
    #[must_use]
    pub fn printable(self) -> Option<char> {
        match self {
            Self::Char(c) if !c.is_control() => Some(c),
            _ => None,
        }
    }
}

bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const SHIFT = 1 << 0;
        const CTRL = 1 << 1;
        const ALT = 1 << 2;
    }
}

/// A key press plus its modifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers.
    #[must_use]
    pub const fn new(code: Key) -> Self {
        Self {
            code,
            modifiers: Modifiers::empty(),
        }
    }

    /// Attach modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether Shift was held (Shift+Tab handling).
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        Self::new(code)
    }
}
