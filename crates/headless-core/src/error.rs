//! Error taxonomy for the widget controllers.
//!
//! Only integrator bugs surface as errors: a dialog missing its controlled
//! props, or a host registering items inconsistently. Expected empty states
//! (no items, everything disabled, no search match) resolve to `None` or a
//! no-op and never appear here.

use thiserror::Error;

/// Construction-time configuration errors for a dialog.
///
/// An uncontrollable dialog is a programming error, not a runtime condition,
/// so these fail fast and loud instead of degrading to a silent no-op.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither `is_open` nor `on_close` was supplied.
    #[error("a dialog requires both an `is_open` state and an `on_close` handler")]
    MissingBoth,
    /// `on_close` was supplied without `is_open`.
    #[error("an `on_close` handler was provided to the dialog, but `is_open` is missing")]
    MissingOpenState,
    /// `is_open` was supplied without `on_close`.
    #[error("an `is_open` state was provided to the dialog, but `on_close` is missing")]
    MissingCloseHandler,
}

/// Invariant violations against the menu item registry.
///
/// These indicate a host-layer bug (double mount, unmount of something never
/// mounted) and are not suppressed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An item with this id is already registered.
    #[error("an item with id `{0}` is already registered")]
    DuplicateId(String),
    /// No item with this id is registered.
    #[error("no item with id `{0}` is registered")]
    UnknownId(String),
}
