//! Per-instance dialog controller.

use std::fmt;

use headless_core::{ConfigError, FocusTarget, NodeId};

use crate::dialog::{DialogId, DialogStack, OpenFlag, StackRegistration};

type CloseHandler = Box<dyn FnMut()>;

/// Side effect the host shell applies after a dialog transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEffect {
    /// Apply `overflow: hidden` plus scrollbar-width compensation to the
    /// portal root. Emitted only by the dialog that took the scroll lock.
    LockScroll,
    /// Revert the scroll lock.
    UnlockScroll,
}

/// Stable element ids for ARIA attribute wiring (`role="dialog"` root,
/// overlay, title, description). Pure derivation from the instance id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogIds {
    root: String,
}

impl DialogIds {
    fn new(id: DialogId) -> Self {
        Self {
            root: format!("headlessui-dialog-{}", id.raw()),
        }
    }

    /// Element id of the dialog root.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// CSS selector for the dialog root; the focus trap's fallback target.
    #[must_use]
    pub fn root_selector(&self) -> String {
        format!("#{}", self.root)
    }

    /// Element id of the backdrop overlay.
    #[must_use]
    pub fn overlay(&self) -> String {
        format!("{}-overlay", self.root)
    }

    /// Element id of the title, for `aria-labelledby`.
    #[must_use]
    pub fn title(&self) -> String {
        format!("{}-title", self.root)
    }

    /// Element id of the description, for `aria-describedby`.
    #[must_use]
    pub fn description(&self) -> String {
        format!("{}-description", self.root)
    }
}

/// Parameters handed to the external focus-trap collaborator.
///
/// The collaborator owns Tab/Shift+Tab cycling entirely. Its contract: call
/// [`DialogController::resolve_return_focus`] exactly once, at the moment it
/// releases the trap, to obtain the element to refocus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusTrapOptions {
    /// Element to focus when the trap engages, if the integrator named one.
    pub initial_focus: Option<NodeId>,
    /// Selector to focus when no initial target is supplied or focusable.
    pub fallback_focus: String,
}

/// Controlled-prop configuration for a dialog.
///
/// `is_open` and `on_close` must be supplied together; a dialog that cannot
/// be closed again is a programming error, so [`DialogController::new`]
/// fails fast on any missing combination. The wrong-type failures of the
/// original dynamic API are unrepresentable here.
#[derive(Default)]
pub struct DialogConfig {
    open: Option<bool>,
    on_close: Option<CloseHandler>,
    initial_focus: Option<NodeId>,
}

impl DialogConfig {
    /// Start an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Supply the controlled open state.
    #[must_use]
    pub fn open(mut self, open: bool) -> Self {
        self.open = Some(open);
        self
    }

    /// Supply the close handler the controller invokes when it decides this
    /// dialog should close.
    #[must_use]
    pub fn on_close(mut self, handler: impl FnMut() + 'static) -> Self {
        self.on_close = Some(Box::new(handler));
        self
    }

    /// Name the element the focus trap should focus first.
    #[must_use]
    pub fn initial_focus(mut self, node: NodeId) -> Self {
        self.initial_focus = Some(node);
        self
    }
}

impl fmt::Debug for DialogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogConfig")
            .field("open", &self.open)
            .field("on_close", &self.on_close.as_ref().map(|_| "FnMut"))
            .field("initial_focus", &self.initial_focus)
            .finish()
    }
}

/// Per-instance open/close gate for one modal dialog.
///
/// Holds its stack registration for exactly as long as it lives; dropping
/// the controller unregisters it. The host drives the controlled `is_open`
/// state through [`set_open`](Self::set_open) and applies the returned
/// effects.
///
/// Teardown must go through [`unmount`](Self::unmount): effects are return
/// values, so a plain drop keeps the stack consistent but cannot hand the
/// host the `UnlockScroll` it may still owe.
pub struct DialogController {
    ids: DialogIds,
    stack: DialogStack,
    registration: StackRegistration,
    open: OpenFlag,
    on_close: CloseHandler,
    initial_focus: Option<NodeId>,
    /// Last element an outside click landed on; wins over the trigger when
    /// restoring focus. Persists until overwritten.
    outside_click: Option<NodeId>,
    holds_scroll_lock: bool,
}

impl DialogController {
    /// Validate the configuration and mount into the stack.
    ///
    /// Fails before any registration occurs, so a misconfigured dialog
    /// leaves the stack and sibling widgets untouched.
    pub fn new(config: DialogConfig, stack: &DialogStack) -> Result<Self, ConfigError> {
        let (is_open, on_close) = match (config.open, config.on_close) {
            (Some(open), Some(on_close)) => (open, on_close),
            (None, Some(_)) => return Err(ConfigError::MissingOpenState),
            (Some(_), None) => return Err(ConfigError::MissingCloseHandler),
            (None, None) => return Err(ConfigError::MissingBoth),
        };

        // Scroll-lock ownership is decided against the dialogs mounted
        // before this one, so the probe happens before registration.
        let holds_scroll_lock = is_open && !stack.any_open();

        let id = DialogId::next();
        let open = OpenFlag::new(is_open);
        let registration = stack.register(id, open.clone());

        Ok(Self {
            ids: DialogIds::new(id),
            stack: stack.clone(),
            registration,
            open,
            on_close,
            initial_focus: config.initial_focus,
            outside_click: None,
            holds_scroll_lock,
        })
    }

    /// This instance's stack identifier.
    #[must_use]
    pub fn id(&self) -> DialogId {
        self.registration.id()
    }

    /// Derived ARIA element ids.
    #[must_use]
    pub fn ids(&self) -> &DialogIds {
        &self.ids
    }

    /// Whether the dialog is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Whether a later-mounted dialog is currently open.
    #[must_use]
    pub fn has_open_child(&self) -> bool {
        self.stack.has_open_child(self.id())
    }

    /// Effects to apply right after mounting (the initial scroll lock, when
    /// this dialog mounted open as the first open dialog).
    #[must_use]
    pub fn mount_effects(&self) -> Vec<DialogEffect> {
        if self.holds_scroll_lock {
            vec![DialogEffect::LockScroll]
        } else {
            Vec::new()
        }
    }

    /// Sync the controlled open state from the host.
    pub fn set_open(&mut self, open: bool) -> Vec<DialogEffect> {
        if open == self.open.get() {
            return Vec::new();
        }
        if open {
            // Only the first dialog to open locks scroll; re-locking would
            // double-compensate the scrollbar width.
            let take_lock = !self.stack.any_open();
            self.open.set(true);
            if take_lock {
                self.holds_scroll_lock = true;
                tracing::debug!(dialog = self.id().raw(), "scroll lock taken");
                return vec![DialogEffect::LockScroll];
            }
            Vec::new()
        } else {
            self.open.set(false);
            self.release_scroll_lock()
        }
    }

    /// Escape key: close, unless an inner open dialog should handle it.
    ///
    /// Returns whether `on_close` was invoked.
    pub fn handle_escape(&mut self) -> bool {
        if !self.open.get() {
            return false;
        }
        self.request_close()
    }

    /// Click outside the dialog root: capture the target as the preferred
    /// return-focus element, then close.
    ///
    /// Returns whether `on_close` was invoked.
    pub fn handle_outside_click(&mut self, target: Option<NodeId>) -> bool {
        if !self.open.get() {
            return false;
        }
        if let Some(node) = target {
            self.outside_click = Some(node);
        }
        self.request_close()
    }

    /// Ask this dialog to close; swallowed while an inner dialog is open.
    pub fn request_close(&mut self) -> bool {
        if self.has_open_child() {
            tracing::trace!(
                dialog = self.id().raw(),
                "close swallowed, inner dialog open"
            );
            return false;
        }
        (self.on_close)();
        true
    }

    /// Resolve the return-focus target at the moment the focus trap
    /// releases.
    ///
    /// The captured outside-click element wins over the trigger; `live`
    /// reports whether a node is still mounted, and stale handles fail over
    /// down the [`FocusTarget`] chain instead of erroring.
    pub fn resolve_return_focus(
        &self,
        trigger: Option<NodeId>,
        live: impl Fn(NodeId) -> bool,
    ) -> FocusTarget {
        headless_core::resolve_return_focus(self.outside_click, trigger, live)
    }

    /// Options for the external focus-trap collaborator.
    #[must_use]
    pub fn trap_options(&self) -> FocusTrapOptions {
        FocusTrapOptions {
            initial_focus: self.initial_focus,
            fallback_focus: self.ids.root_selector(),
        }
    }

    /// Unmount: release the scroll lock if held and drop the registration.
    ///
    /// This is the only exit path that can emit `UnlockScroll`; hosts must
    /// use it instead of dropping the controller whenever the dialog may
    /// hold the lock.
    pub fn unmount(mut self) -> Vec<DialogEffect> {
        self.open.set(false);
        self.release_scroll_lock()
        // `self.registration` drops here, removing the stack entry.
    }

    fn release_scroll_lock(&mut self) -> Vec<DialogEffect> {
        if self.holds_scroll_lock {
            self.holds_scroll_lock = false;
            tracing::debug!(dialog = self.id().raw(), "scroll lock released");
            vec![DialogEffect::UnlockScroll]
        } else {
            Vec::new()
        }
    }
}

impl fmt::Debug for DialogController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialogController")
            .field("id", &self.id())
            .field("open", &self.open.get())
            .field("holds_scroll_lock", &self.holds_scroll_lock)
            .field("outside_click", &self.outside_click)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_close() -> (Rc<Cell<u32>>, impl FnMut() + 'static) {
        let count = Rc::new(Cell::new(0));
        let inner = Rc::clone(&count);
        (count, move || inner.set(inner.get() + 1))
    }

    fn open_dialog(stack: &DialogStack) -> (DialogController, Rc<Cell<u32>>) {
        let (count, on_close) = counting_close();
        let dialog = DialogController::new(
            DialogConfig::new().open(true).on_close(on_close),
            stack,
        )
        .unwrap();
        (dialog, count)
    }

    #[test]
    fn missing_on_close_fails_before_registration() {
        let stack = DialogStack::new();
        let err = DialogController::new(DialogConfig::new().open(true), &stack).unwrap_err();
        assert_eq!(err, ConfigError::MissingCloseHandler);
        assert!(stack.is_empty());
    }

    #[test]
    fn missing_is_open_fails() {
        let stack = DialogStack::new();
        let err = DialogController::new(DialogConfig::new().on_close(|| {}), &stack).unwrap_err();
        assert_eq!(err, ConfigError::MissingOpenState);
    }

    #[test]
    fn missing_both_fails() {
        let stack = DialogStack::new();
        let err = DialogController::new(DialogConfig::new(), &stack).unwrap_err();
        assert_eq!(err, ConfigError::MissingBoth);
    }

    #[test]
    fn construction_registers_and_drop_unregisters() {
        let stack = DialogStack::new();
        let (dialog, _) = open_dialog(&stack);
        assert_eq!(stack.depth(), 1);
        assert!(stack.contains(dialog.id()));
        drop(dialog);
        assert!(stack.is_empty());
    }

    #[test]
    fn escape_invokes_on_close() {
        let stack = DialogStack::new();
        let (mut dialog, count) = open_dialog(&stack);
        assert!(dialog.handle_escape());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn escape_while_closed_is_ignored() {
        let stack = DialogStack::new();
        let (count, on_close) = counting_close();
        let mut dialog = DialogController::new(
            DialogConfig::new().open(false).on_close(on_close),
            &stack,
        )
        .unwrap();
        assert!(!dialog.handle_escape());
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn escape_is_swallowed_while_inner_dialog_is_open() {
        let stack = DialogStack::new();
        let (mut outer, outer_count) = open_dialog(&stack);
        let (mut inner, inner_count) = open_dialog(&stack);

        assert!(!outer.handle_escape());
        assert_eq!(outer_count.get(), 0);

        assert!(inner.handle_escape());
        assert_eq!(inner_count.get(), 1);

        drop(inner);
        assert!(outer.handle_escape());
        assert_eq!(outer_count.get(), 1);
    }

    #[test]
    fn first_opener_takes_the_scroll_lock() {
        let stack = DialogStack::new();
        let (first, _) = open_dialog(&stack);
        let (second, _) = open_dialog(&stack);
        assert_eq!(first.mount_effects(), [DialogEffect::LockScroll]);
        assert!(second.mount_effects().is_empty());
    }

    #[test]
    fn lock_is_released_on_close_not_by_later_dialogs() {
        let stack = DialogStack::new();
        let (mut first, _) = open_dialog(&stack);
        let (mut second, _) = open_dialog(&stack);
        assert!(second.set_open(false).is_empty());
        assert_eq!(first.set_open(false), [DialogEffect::UnlockScroll]);
    }

    #[test]
    fn reopening_after_all_closed_takes_the_lock_again() {
        let stack = DialogStack::new();
        let (_count, on_close) = counting_close();
        let mut dialog = DialogController::new(
            DialogConfig::new().open(false).on_close(on_close),
            &stack,
        )
        .unwrap();
        assert!(dialog.mount_effects().is_empty());
        assert_eq!(dialog.set_open(true), [DialogEffect::LockScroll]);
        assert_eq!(dialog.set_open(false), [DialogEffect::UnlockScroll]);
        assert_eq!(dialog.set_open(true), [DialogEffect::LockScroll]);
    }

    #[test]
    fn set_open_is_idempotent() {
        let stack = DialogStack::new();
        let (mut dialog, _) = open_dialog(&stack);
        assert!(dialog.set_open(true).is_empty());
    }

    #[test]
    fn unmount_releases_the_lock_and_the_registration() {
        let stack = DialogStack::new();
        let (dialog, _) = open_dialog(&stack);
        assert_eq!(dialog.unmount(), [DialogEffect::UnlockScroll]);
        assert!(stack.is_empty());
    }

    #[test]
    fn plain_drop_keeps_the_stack_consistent_but_cannot_unlock() {
        let stack = DialogStack::new();
        let (first, _) = open_dialog(&stack);
        assert_eq!(first.mount_effects(), [DialogEffect::LockScroll]);
        drop(first);

        // The registration is gone, but no UnlockScroll was emitted; the
        // next opener takes a fresh lock and must release it via unmount.
        assert!(stack.is_empty());
        let (second, _) = open_dialog(&stack);
        assert_eq!(second.mount_effects(), [DialogEffect::LockScroll]);
        assert_eq!(second.unmount(), [DialogEffect::UnlockScroll]);
    }

    #[test]
    fn outside_click_captures_target_and_closes() {
        let stack = DialogStack::new();
        let (mut dialog, count) = open_dialog(&stack);
        let clicked = NodeId::new(42);
        assert!(dialog.handle_outside_click(Some(clicked)));
        assert_eq!(count.get(), 1);

        let trigger = NodeId::new(1);
        assert_eq!(
            dialog.resolve_return_focus(Some(trigger), |_| true),
            FocusTarget::Node(clicked)
        );
    }

    #[test]
    fn captured_element_persists_until_overwritten() {
        let stack = DialogStack::new();
        let (mut dialog, _) = open_dialog(&stack);
        dialog.handle_outside_click(Some(NodeId::new(42)));
        dialog.set_open(false);
        dialog.set_open(true);
        dialog.handle_outside_click(Some(NodeId::new(43)));
        assert_eq!(
            dialog.resolve_return_focus(None, |_| true),
            FocusTarget::Node(NodeId::new(43))
        );
    }

    #[test]
    fn return_focus_fails_over_when_capture_is_gone() {
        let stack = DialogStack::new();
        let (mut dialog, _) = open_dialog(&stack);
        let clicked = NodeId::new(42);
        let trigger = NodeId::new(1);
        dialog.handle_outside_click(Some(clicked));
        assert_eq!(
            dialog.resolve_return_focus(Some(trigger), |n| n != clicked),
            FocusTarget::Node(trigger)
        );
        assert_eq!(
            dialog.resolve_return_focus(Some(trigger), |_| false),
            FocusTarget::Body
        );
    }

    #[test]
    fn return_focus_defaults_to_trigger() {
        let stack = DialogStack::new();
        let (dialog, _) = open_dialog(&stack);
        let trigger = NodeId::new(1);
        assert_eq!(
            dialog.resolve_return_focus(Some(trigger), |_| true),
            FocusTarget::Node(trigger)
        );
    }

    #[test]
    fn trap_options_fall_back_to_the_dialog_root() {
        let stack = DialogStack::new();
        let (dialog, _) = open_dialog(&stack);
        let options = dialog.trap_options();
        assert_eq!(options.initial_focus, None);
        assert_eq!(options.fallback_focus, dialog.ids().root_selector());
    }

    #[test]
    fn trap_options_carry_the_initial_focus_target() {
        let stack = DialogStack::new();
        let initial = NodeId::new(5);
        let dialog = DialogController::new(
            DialogConfig::new()
                .open(true)
                .on_close(|| {})
                .initial_focus(initial),
            &stack,
        )
        .unwrap();
        assert_eq!(dialog.trap_options().initial_focus, Some(initial));
    }

    #[test]
    fn derived_ids_are_stable_and_related() {
        let stack = DialogStack::new();
        let (dialog, _) = open_dialog(&stack);
        let ids = dialog.ids();
        assert!(ids.overlay().starts_with(ids.root()));
        assert!(ids.title().ends_with("-title"));
        assert!(ids.description().ends_with("-description"));
        assert_eq!(ids.root_selector(), format!("#{}", ids.root()));
    }
}
