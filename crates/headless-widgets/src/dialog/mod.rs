#![forbid(unsafe_code)]

//! Modal dialog interaction core and stacked-dialog coordination.
//!
//! A [`DialogController`] is the per-instance open/close gate: it validates
//! its controlled props at construction, registers with a [`DialogStack`]
//! for the lifetime of the mount, and decides who owns Escape, outside
//! clicks, and the scroll lock when several dialogs are mounted at once.
//!
//! # Invariants
//!
//! - A stack entry exists exactly while its dialog is mounted, open or not;
//!   stacking order is mount order. Registration is released by an RAII
//!   guard on every exit path, including abrupt teardown.
//! - "Open" is read live from the owning controller through a shared flag,
//!   never duplicated into the stack entry.
//! - Escape and `on_close` are swallowed while a later-mounted dialog is
//!   open: the innermost open dialog wins.
//! - Only the first dialog to open holds the scroll lock; later dialogs do
//!   not re-lock, so scrollbar-width compensation is applied once.
//!
//! # Failure Modes
//!
//! - Missing `is_open`/`on_close` configuration fails loudly at
//!   construction, before any stack registration; sibling widgets are
//!   unaffected.
//! - A captured outside-click element that unmounts before focus
//!   restoration fails over to the trigger, then the body, never an error.
//! - A controller dropped without [`DialogController::unmount`] still
//!   removes its stack entry, but a drop cannot deliver a final
//!   `UnlockScroll` effect; a host that applied the lock must route
//!   teardown through `unmount` or the lock styling is stranded.

mod controller;
mod stack;

pub use controller::{DialogConfig, DialogController, DialogEffect, DialogIds, FocusTrapOptions};
pub use stack::{DialogId, DialogStack, OpenFlag, StackRegistration};
