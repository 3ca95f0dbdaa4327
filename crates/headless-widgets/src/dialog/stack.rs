//! Registry of mounted dialogs, ordered by mount time.
//!
//! The stack is an explicitly owned, cheaply clonable object that each
//! controller receives at construction; there is no ambient global. All
//! mutation is synchronous `push`/`remove`/read, which is safe in the
//! single-threaded, event-driven hosts this crate targets; a multi-threaded
//! host would need to wrap the registry in a lock before mount/unmount can
//! race with Escape or outside-click handling.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for unique dialog IDs.
static DIALOG_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a mounted dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DialogId(u64);

impl DialogId {
    pub(crate) fn next() -> Self {
        Self(DIALOG_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw ID value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Live open/closed state shared between a controller and the stack.
///
/// The stack entry reads through this flag instead of copying the value, so
/// "open" always reflects the owning dialog.
#[derive(Debug, Clone, Default)]
pub struct OpenFlag(Rc<Cell<bool>>);

impl OpenFlag {
    /// Create a flag with an initial state.
    #[must_use]
    pub fn new(open: bool) -> Self {
        Self(Rc::new(Cell::new(open)))
    }

    /// Current state.
    #[inline]
    #[must_use]
    pub fn get(&self) -> bool {
        self.0.get()
    }

    pub(crate) fn set(&self, open: bool) {
        self.0.set(open);
    }
}

struct StackEntry {
    id: DialogId,
    open: OpenFlag,
}

/// Ordered registry of currently-mounted dialogs.
///
/// Clones share the same underlying registry.
#[derive(Clone, Default)]
pub struct DialogStack {
    entries: Rc<RefCell<Vec<StackEntry>>>,
}

impl DialogStack {
    /// Create an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mounting dialog.
    ///
    /// The entry lives until the returned guard is dropped, which removes it
    /// on every exit path.
    #[must_use]
    pub fn register(&self, id: DialogId, open: OpenFlag) -> StackRegistration {
        self.entries.borrow_mut().push(StackEntry { id, open });
        tracing::debug!(dialog = id.raw(), depth = self.depth(), "dialog mounted");
        StackRegistration {
            stack: self.clone(),
            id,
        }
    }

    fn remove(&self, id: DialogId) {
        self.entries.borrow_mut().retain(|entry| entry.id != id);
        tracing::debug!(dialog = id.raw(), depth = self.depth(), "dialog unmounted");
    }

    /// Number of mounted dialogs, open or not.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether no dialogs are mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Whether this dialog is currently mounted.
    #[must_use]
    pub fn contains(&self, id: DialogId) -> bool {
        self.entries.borrow().iter().any(|entry| entry.id == id)
    }

    /// Whether any dialog mounted after `id` reports open.
    ///
    /// Used to swallow Escape/`on_close` aimed at an outer dialog while an
    /// inner one should handle it first. An unmounted `id` has no children.
    #[must_use]
    pub fn has_open_child(&self, id: DialogId) -> bool {
        let entries = self.entries.borrow();
        let Some(position) = entries.iter().position(|entry| entry.id == id) else {
            return false;
        };
        entries[position + 1..].iter().any(|entry| entry.open.get())
    }

    /// Whether any mounted dialog reports open.
    ///
    /// A dialog about to open checks this first: only the first opener takes
    /// the scroll lock.
    #[must_use]
    pub fn any_open(&self) -> bool {
        self.entries.borrow().iter().any(|entry| entry.open.get())
    }
}

/// RAII guard for a dialog's stack entry.
///
/// Dropping the guard unregisters the dialog, so teardown of any kind keeps
/// the stack consistent with what is actually mounted.
pub struct StackRegistration {
    stack: DialogStack,
    id: DialogId,
}

impl StackRegistration {
    /// The registered dialog's ID.
    #[must_use]
    pub fn id(&self) -> DialogId {
        self.id
    }
}

impl Drop for StackRegistration {
    fn drop(&mut self) {
        self.stack.remove(self.id);
    }
}
