#![forbid(unsafe_code)]

//! Disclosure menu (ARIA `menu`/`menuitem`) interaction core.
//!
//! The [`MenuController`] state machine owns open/closed state, the active
//! item, and the [`ItemRegistry`]; it routes keyboard commands through the
//! pure [`navigate`] functions and the [`Typeahead`] matcher, and emits
//! [`MenuEffect`] values for the host shell to apply.
//!
//! # Invariants
//!
//! - The active item, when set, always references a registered, enabled item.
//!   Unregistering or disabling the active item clears it; it is never left
//!   dangling and never silently reassigned to a neighbor.
//! - Arrow navigation does not wrap; Home/End/PageUp/PageDown jump to the
//!   first/last enabled item.
//! - The search buffer is empty whenever the menu is closed.
//!
//! # Failure Modes
//!
//! - Empty registry or all items disabled: every navigation command resolves
//!   to no active item, never an error.
//! - Opening via a disabled trigger is silently rejected (platform
//!   convention for disabled controls), not an error.
//! - Duplicate registration / unknown-id operations return
//!   [`RegistryError`](headless_core::RegistryError); they indicate a host
//!   bug and are not suppressed.

mod controller;
mod navigate;
mod registry;
mod typeahead;

pub use controller::{MenuController, MenuEffect, MenuIds, OpenSource};
pub use navigate::{NavCommand, next_active};
pub use registry::{ItemDescriptor, ItemRegistry};
pub use typeahead::{SEARCH_DEBOUNCE, Typeahead, search};
