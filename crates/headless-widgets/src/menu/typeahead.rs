//! Typeahead search: printable keys accumulate into a debounced buffer that
//! resolves to the nearest matching enabled item by text prefix.

use web_time::{Duration, Instant};

use crate::menu::ItemRegistry;

/// How long the search buffer survives without further input.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(350);

/// Accumulating search buffer with a reset deadline.
///
/// The controller is headless, so the reset timer is modeled as a deadline:
/// the host schedules a wakeup for [`deadline`](Self::deadline) and calls
/// [`expire`](Self::expire) when it fires. A new keystroke moves the
/// deadline (cancel-and-restart), and expiring an already-empty buffer is a
/// no-op, so a stale timer firing late is harmless.
#[derive(Debug, Clone, Default)]
pub struct Typeahead {
    buffer: String,
    deadline: Option<Instant>,
}

impl Typeahead {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current search buffer (lowercased).
    #[inline]
    #[must_use]
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Whether a search is in progress.
    #[inline]
    #[must_use]
    pub fn is_searching(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// When the buffer should be cleared absent further input.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Append a printable character and restart the reset deadline.
    ///
    /// If the previous deadline already passed (the host's timer may not
    /// have fired yet), the stale buffer is dropped first so the keystroke
    /// starts a fresh search.
    pub fn push(&mut self, c: char, now: Instant) {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            self.buffer.clear();
        }
        self.buffer.extend(c.to_lowercase());
        self.deadline = Some(now + SEARCH_DEBOUNCE);
    }

    /// Clear the buffer if the deadline has passed. Returns whether anything
    /// was cleared. Idempotent.
    pub fn expire(&mut self, now: Instant) -> bool {
        if self.deadline.is_some_and(|deadline| now >= deadline) {
            let had_buffer = !self.buffer.is_empty();
            self.clear();
            had_buffer
        } else {
            false
        }
    }

    /// Drop the buffer and deadline unconditionally.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }
}

/// Find the first enabled item whose text starts with `buffer`.
///
/// The scan starts just after the current active item and wraps to the
/// start, so repeated narrowing keeps the current match active while a fresh
/// search moves forward from it. Matching is case-insensitive on
/// whitespace-trimmed text; disabled items never match. No match leaves the
/// active item unchanged, which callers express by ignoring a `None`.
#[must_use]
pub fn search<'a>(items: &'a ItemRegistry, current: Option<&str>, buffer: &str) -> Option<&'a str> {
    if buffer.is_empty() || items.is_empty() {
        return None;
    }
    let start = current
        .and_then(|id| items.index_of(id))
        .map_or(0, |position| position + 1);
    let len = items.len();
    (0..len)
        .map(|offset| items.at((start + offset) % len).expect("index in range"))
        .find(|item| !item.disabled && item.text_value.trim().to_lowercase().starts_with(buffer))
        .map(|item| item.id.as_str())
}
