#![forbid(unsafe_code)]

//! Headless interaction state machines for accessible widgets.
//!
//! Two widgets live here: a disclosure [`menu`] (ARIA `menu`/`menuitem`) and
//! a modal [`dialog`]. Both are pure interaction cores: they own open/closed
//! state, active-item tracking, typeahead search, and stacked-dialog
//! coordination, and they describe focus/scroll side effects as values for
//! an imperative host shell to apply. Rendering, DOM event plumbing, and the
//! focus trap itself are the host's job.
//!
//! All state transitions are synchronous; the only scheduled operation is
//! the typeahead reset timer, which the host drives by passing timestamps
//! in and firing [`menu::MenuController::expire_typeahead`].

pub mod dialog;
pub mod menu;

pub use headless_core::{
    ConfigError, FocusTarget, Key, KeyEvent, Modifiers, NodeId, RegistryError, WidgetId,
};
