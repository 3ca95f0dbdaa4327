#![forbid(unsafe_code)]

//! Shared primitives for the headless widget state machines.
//!
//! This crate holds the pieces every widget controller needs and nothing a
//! host rendering layer would: the closed keyboard registry, opaque handles
//! to host elements, stable per-instance identifiers for ARIA wiring, and
//! the error taxonomy. It knows nothing about menus or dialogs.

pub mod error;
pub mod id;
pub mod key;
pub mod node;

pub use error::{ConfigError, RegistryError};
pub use id::WidgetId;
pub use key::{Key, KeyEvent, Modifiers};
pub use node::{FocusTarget, NodeId, resolve_return_focus};
