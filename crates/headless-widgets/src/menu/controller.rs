//! Menu controller state machine.

use headless_core::{FocusTarget, Key, KeyEvent, NodeId, RegistryError, WidgetId};
use web_time::Instant;

use crate::menu::{ItemDescriptor, ItemRegistry, NavCommand, Typeahead, next_active, search};

/// How the menu was asked to open. Seeds the initial active item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenSource {
    /// Pointer click on the trigger; no implicit selection.
    Pointer,
    /// Enter on the trigger; first enabled item becomes active.
    Enter,
    /// Space on the trigger; first enabled item becomes active.
    Space,
    /// ArrowDown on the trigger; first enabled item becomes active.
    ArrowDown,
    /// ArrowUp on the trigger; last enabled item becomes active.
    ArrowUp,
}

/// Side effect the host shell applies after a transition.
///
/// Transitions are pure with respect to the host: the controller mutates its
/// own state and describes focus moves and activations as values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEffect {
    /// Move host focus to the items container (the menu just opened).
    FocusItems,
    /// Invoke the activation handler bound to this item.
    Activate(String),
    /// Move host focus to this target (the menu just closed). Hosts follow
    /// the [`FocusTarget`] failover chain if the target is gone.
    ReturnFocus(FocusTarget),
}

/// Stable element ids for ARIA attribute wiring.
///
/// Derived once from the instance's [`WidgetId`], so `aria-controls`,
/// `aria-labelledby`, and `aria-activedescendant` references survive
/// re-renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuIds {
    button: String,
    items: String,
}

impl MenuIds {
    fn new(id: WidgetId) -> Self {
        Self {
            button: format!("headlessui-menu-button-{}", id.raw()),
            items: format!("headlessui-menu-items-{}", id.raw()),
        }
    }

    /// Element id for the trigger button.
    #[must_use]
    pub fn button(&self) -> &str {
        &self.button
    }

    /// Element id for the items container.
    #[must_use]
    pub fn items(&self) -> &str {
        &self.items
    }
}

/// Interaction state machine for one disclosure menu.
///
/// States are `Closed` and `Open`; every command is synchronous and either
/// leaves the state alone or completes a full transition before the next
/// command is handled. See the module docs for the invariants.
#[derive(Debug)]
pub struct MenuController {
    id: WidgetId,
    ids: MenuIds,
    open: bool,
    button_disabled: bool,
    items: ItemRegistry,
    active: Option<String>,
    typeahead: Typeahead,
    /// Future return-focus target captured when the menu opened.
    trigger: Option<NodeId>,
    /// Last element a pointer interaction landed on outside the menu; wins
    /// over the trigger when restoring focus. Persists until overwritten.
    outside_click: Option<NodeId>,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuController {
    /// Create a closed menu with an empty item registry.
    #[must_use]
    pub fn new() -> Self {
        let id = WidgetId::next();
        Self {
            id,
            ids: MenuIds::new(id),
            open: false,
            button_disabled: false,
            items: ItemRegistry::new(),
            active: None,
            typeahead: Typeahead::new(),
            trigger: None,
            outside_click: None,
        }
    }

    /// This instance's stable identifier.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Derived ARIA element ids.
    #[must_use]
    pub fn ids(&self) -> &MenuIds {
        &self.ids
    }

    /// Whether the menu is open.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The active item id, for `aria-activedescendant` and styling hooks.
    #[must_use]
    pub fn active_item(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The current typeahead buffer.
    #[must_use]
    pub fn search_buffer(&self) -> &str {
        self.typeahead.buffer()
    }

    /// When the typeahead buffer should expire, for host timer scheduling.
    #[must_use]
    pub fn search_deadline(&self) -> Option<Instant> {
        self.typeahead.deadline()
    }

    /// The item registry backing this menu.
    #[must_use]
    pub fn items(&self) -> &ItemRegistry {
        &self.items
    }

    /// Mirror the trigger button's disabled state into the controller.
    ///
    /// Open commands are rejected here, not just in the host layer, because
    /// ignoring input on a disabled control is part of the accessibility
    /// contract.
    pub fn set_button_disabled(&mut self, disabled: bool) {
        self.button_disabled = disabled;
    }

    // --- Item lifecycle ---

    /// Register a mounting item.
    pub fn register_item(&mut self, descriptor: ItemDescriptor) -> Result<(), RegistryError> {
        self.items.register(descriptor)
    }

    /// Unregister an unmounting item, clearing the active item if it was the
    /// one removed (no automatic reassignment to a neighbor).
    pub fn unregister_item(&mut self, id: &str) -> Result<ItemDescriptor, RegistryError> {
        let removed = self.items.unregister(id)?;
        if self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(removed)
    }

    /// Update an item's disabled flag, clearing the active item if it just
    /// became disabled while active.
    pub fn set_item_disabled(&mut self, id: &str, disabled: bool) -> Result<(), RegistryError> {
        self.items.set_disabled(id, disabled)?;
        if disabled && self.active.as_deref() == Some(id) {
            self.active = None;
        }
        Ok(())
    }

    // --- Open / close ---

    /// Open the menu, seeding the active item from the open source.
    ///
    /// `trigger` is captured as the future return-focus target. Rejected
    /// silently while the trigger is disabled or the menu is already open.
    pub fn open(&mut self, source: OpenSource, trigger: Option<NodeId>) -> Vec<MenuEffect> {
        if self.button_disabled || self.open {
            return Vec::new();
        }
        self.open = true;
        self.trigger = trigger;
        self.active = match source {
            OpenSource::Pointer => None,
            OpenSource::ArrowUp => self.items.last_enabled().map(|item| item.id.clone()),
            OpenSource::Enter | OpenSource::Space | OpenSource::ArrowDown => {
                self.items.first_enabled().map(|item| item.id.clone())
            }
        };
        tracing::trace!(menu = self.id.raw(), ?source, active = ?self.active, "menu opened");
        vec![MenuEffect::FocusItems]
    }

    /// Key press on the trigger button.
    pub fn on_button_key(&mut self, event: KeyEvent, trigger: Option<NodeId>) -> Vec<MenuEffect> {
        let source = match event.code {
            Key::Enter => OpenSource::Enter,
            Key::Space => OpenSource::Space,
            Key::ArrowDown => OpenSource::ArrowDown,
            Key::ArrowUp => OpenSource::ArrowUp,
            _ => return Vec::new(),
        };
        self.open(source, trigger)
    }

    /// Pointer click on the trigger button: toggles open/closed.
    pub fn on_button_click(&mut self, trigger: Option<NodeId>) -> Vec<MenuEffect> {
        if self.button_disabled {
            return Vec::new();
        }
        if self.open {
            let focus = self.close_focus();
            self.close_into(vec![MenuEffect::ReturnFocus(focus)])
        } else {
            self.open(OpenSource::Pointer, trigger)
        }
    }

    /// Escape while open: close and restore focus.
    pub fn on_escape(&mut self) -> Vec<MenuEffect> {
        if !self.open {
            return Vec::new();
        }
        let focus = self.close_focus();
        self.close_into(vec![MenuEffect::ReturnFocus(focus)])
    }

    /// Click outside the menu's button and items: close.
    ///
    /// The click target, when provided, is captured and preferred over the
    /// trigger as the return-focus target, so focus lands where the user
    /// actually clicked.
    pub fn on_outside_click(&mut self, target: Option<NodeId>) -> Vec<MenuEffect> {
        if !self.open {
            return Vec::new();
        }
        if let Some(node) = target {
            self.outside_click = Some(node);
        }
        let focus = self.close_focus();
        self.close_into(vec![MenuEffect::ReturnFocus(focus)])
    }

    /// Key press on the items container while open.
    ///
    /// `now` timestamps printable keys for the typeahead debounce window.
    pub fn on_items_key(&mut self, event: KeyEvent, now: Instant) -> Vec<MenuEffect> {
        if !self.open {
            return Vec::new();
        }
        match event.code {
            // Space extends a search in progress; otherwise it activates,
            // like Enter.
            Key::Space if self.typeahead.is_searching() => self.search_key(' ', now),
            Key::Enter | Key::Space => {
                let active = self
                    .active
                    .as_deref()
                    .and_then(|id| self.items.get(id))
                    .filter(|item| !item.disabled)
                    .map(|item| item.id.clone());
                let mut effects = Vec::new();
                if let Some(id) = active {
                    tracing::trace!(menu = self.id.raw(), item = %id, "item activated");
                    effects.push(MenuEffect::Activate(id));
                }
                effects.push(MenuEffect::ReturnFocus(self.close_focus()));
                self.close_into(effects)
            }
            Key::Escape => self.on_escape(),
            // Consumed: the focus trap keeps Tab cycling inside the widget,
            // the controller's contract is only to remain open.
            Key::Tab => Vec::new(),
            Key::ArrowDown | Key::ArrowUp | Key::Home | Key::End | Key::PageUp | Key::PageDown => {
                self.typeahead.clear();
                let command = NavCommand::from_key(event.code).expect("navigation key");
                self.active = next_active(&self.items, self.active.as_deref(), command)
                    .map(str::to_owned);
                Vec::new()
            }
            Key::Char(_) => match event.code.printable() {
                Some(c) => self.search_key(c, now),
                None => Vec::new(),
            },
        }
    }

    /// Host timer callback for the typeahead reset deadline.
    pub fn expire_typeahead(&mut self, now: Instant) {
        self.typeahead.expire(now);
    }

    // --- Item interaction ---

    /// Pointer moved over an item: an enabled item becomes active, a
    /// disabled one is ignored.
    pub fn on_item_pointer_over(&mut self, id: &str) {
        if !self.open {
            return;
        }
        if let Some(item) = self.items.get(id)
            && !item.disabled
        {
            self.active = Some(item.id.clone());
        }
    }

    /// Pointer left an item: it stops being active.
    pub fn on_item_pointer_leave(&mut self, id: &str) {
        if self.open && self.active.as_deref() == Some(id) {
            self.active = None;
        }
    }

    /// Pointer click on an item: activate it and close, unless disabled.
    pub fn on_item_click(&mut self, id: &str) -> Vec<MenuEffect> {
        if !self.open {
            return Vec::new();
        }
        match self.items.get(id) {
            Some(item) if !item.disabled => {
                let id = item.id.clone();
                tracing::trace!(menu = self.id.raw(), item = %id, "item activated");
                let focus = self.close_focus();
                self.close_into(vec![MenuEffect::Activate(id), MenuEffect::ReturnFocus(focus)])
            }
            // Disabled items swallow the click; unknown ids are a host bug
            // on the render path, but a click on a just-unmounted item can
            // legitimately race the unregister, so both are ignored here.
            _ => Vec::new(),
        }
    }

    /// Resolve the return-focus target at restoration time.
    ///
    /// `live` reports whether a node is still mounted; targets invalidated
    /// since close fail over to the trigger and then the body rather than
    /// erroring.
    pub fn resolve_return_focus(&self, live: impl Fn(NodeId) -> bool) -> FocusTarget {
        headless_core::resolve_return_focus(self.outside_click, self.trigger, live)
    }

    /// Focus target carried by every close transition: the last captured
    /// outside-click element takes precedence over the trigger, matching
    /// what [`resolve_return_focus`](Self::resolve_return_focus) reports.
    fn close_focus(&self) -> FocusTarget {
        match self.outside_click {
            Some(node) => FocusTarget::Node(node),
            None => FocusTarget::Trigger,
        }
    }

    fn search_key(&mut self, c: char, now: Instant) -> Vec<MenuEffect> {
        self.typeahead.push(c, now);
        if let Some(id) = search(&self.items, self.active.as_deref(), self.typeahead.buffer()) {
            self.active = Some(id.to_owned());
        }
        Vec::new()
    }

    /// Complete an `Open -> Closed` transition: clears the active item and
    /// the search buffer, then hands back the caller's effects.
    fn close_into(&mut self, effects: Vec<MenuEffect>) -> Vec<MenuEffect> {
        self.open = false;
        self.active = None;
        self.typeahead.clear();
        tracing::trace!(menu = self.id.raw(), "menu closed");
        effects
    }
}
