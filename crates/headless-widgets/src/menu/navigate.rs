//! Pure active-item navigation over an [`ItemRegistry`].

use headless_core::Key;

use crate::menu::ItemRegistry;

/// A navigation command resolved from a key press while the menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    /// Home / PageUp.
    First,
    /// End / PageDown.
    Last,
    /// ArrowDown.
    Next,
    /// ArrowUp.
    Prev,
}

impl NavCommand {
    /// Map a navigation key to its command, if it is one.
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowDown => Some(Self::Next),
            Key::ArrowUp => Some(Self::Prev),
            Key::Home | Key::PageUp => Some(Self::First),
            Key::End | Key::PageDown => Some(Self::Last),
            _ => None,
        }
    }
}

/// Compute the next active item id for a command.
///
/// "Enabled" is evaluated at the instant of the command; disabled items are
/// always skipped. `Next`/`Prev` do not wrap: at the last/first enabled item
/// the active item is unchanged. A `current` id that no longer resolves in
/// the registry is treated as no active item. Empty and all-disabled
/// registries resolve every command to `None`.
#[must_use]
pub fn next_active<'a>(
    items: &'a ItemRegistry,
    current: Option<&str>,
    command: NavCommand,
) -> Option<&'a str> {
    let current = current.and_then(|id| items.index_of(id));
    match command {
        NavCommand::First => items.first_enabled().map(|item| item.id.as_str()),
        NavCommand::Last => items.last_enabled().map(|item| item.id.as_str()),
        NavCommand::Next => match current {
            None => items.first_enabled().map(|item| item.id.as_str()),
            Some(position) => items
                .next_enabled(position)
                .or_else(|| items.at(position))
                .map(|item| item.id.as_str()),
        },
        NavCommand::Prev => match current {
            None => items.last_enabled().map(|item| item.id.as_str()),
            Some(position) => items
                .prev_enabled(position)
                .or_else(|| items.at(position))
                .map(|item| item.id.as_str()),
        },
    }
}
