//! Stable per-instance widget identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique widget IDs.
static WIDGET_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// A process-unique identifier for one widget instance.
///
/// The derived ARIA element ids (`aria-controls`, `aria-activedescendant`,
/// `aria-labelledby` wiring) are pure functions of this value, so they stay
/// stable across re-renders of the same instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate the next unique ID.
    #[must_use]
    pub fn next() -> Self {
        Self(WIDGET_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw ID value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}
