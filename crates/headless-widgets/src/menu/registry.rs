//! Ordered registry of mounted menu items.
//!
//! Registration order is DOM order and is significant: it drives
//! Home/End/Arrow semantics. Ids are unique for the registry's lifetime.

use ahash::AHashMap;
use headless_core::RegistryError;

/// One mounted menu item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    /// Unique id within the owning registry (also the ARIA element id).
    pub id: String,
    /// Disabled items are skipped by navigation and never matched by search.
    pub disabled: bool,
    /// Text content used for typeahead prefix matching.
    pub text_value: String,
}

impl ItemDescriptor {
    /// Create an enabled item.
    pub fn new(id: impl Into<String>, text_value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            disabled: false,
            text_value: text_value.into(),
        }
    }

    /// Mark the item disabled.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Ordered collection of item descriptors backing one open menu.
///
/// Mutated by item mount/unmount; read by the navigator and the typeahead
/// matcher. Holds an id → index map so id lookups stay cheap while order
/// stays authoritative.
#[derive(Debug, Clone, Default)]
pub struct ItemRegistry {
    items: Vec<ItemDescriptor>,
    index: AHashMap<String, usize>,
}

impl ItemRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered items, disabled ones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no items are registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ItemDescriptor> {
        self.items.iter()
    }

    /// Append a descriptor.
    ///
    /// Does not touch active-item state; that ownership lives one level up
    /// in the controller.
    pub fn register(&mut self, descriptor: ItemDescriptor) -> Result<(), RegistryError> {
        if self.index.contains_key(&descriptor.id) {
            return Err(RegistryError::DuplicateId(descriptor.id));
        }
        self.index.insert(descriptor.id.clone(), self.items.len());
        self.items.push(descriptor);
        Ok(())
    }

    /// Remove a descriptor, preserving the order of the rest.
    pub fn unregister(&mut self, id: &str) -> Result<ItemDescriptor, RegistryError> {
        let Some(position) = self.index.remove(id) else {
            return Err(RegistryError::UnknownId(id.to_owned()));
        };
        let removed = self.items.remove(position);
        for entry in self.index.values_mut() {
            if *entry > position {
                *entry -= 1;
            }
        }
        Ok(removed)
    }

    /// Update an item's disabled flag in place, preserving its position.
    pub fn set_disabled(&mut self, id: &str, disabled: bool) -> Result<(), RegistryError> {
        let Some(&position) = self.index.get(id) else {
            return Err(RegistryError::UnknownId(id.to_owned()));
        };
        self.items[position].disabled = disabled;
        Ok(())
    }

    /// Descriptor for an id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ItemDescriptor> {
        self.index.get(id).map(|&position| &self.items[position])
    }

    /// Descriptor at a registration-order index.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<&ItemDescriptor> {
        self.items.get(index)
    }

    /// Registration-order index of an id.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// First enabled item in order.
    #[must_use]
    pub fn first_enabled(&self) -> Option<&ItemDescriptor> {
        self.items.iter().find(|item| !item.disabled)
    }

    /// Last enabled item in order.
    #[must_use]
    pub fn last_enabled(&self) -> Option<&ItemDescriptor> {
        self.items.iter().rev().find(|item| !item.disabled)
    }

    /// First enabled item strictly after `from`.
    #[must_use]
    pub fn next_enabled(&self, from: usize) -> Option<&ItemDescriptor> {
        self.items
            .iter()
            .skip(from.saturating_add(1))
            .find(|item| !item.disabled)
    }

    /// Last enabled item strictly before `from`.
    #[must_use]
    pub fn prev_enabled(&self, from: usize) -> Option<&ItemDescriptor> {
        self.items[..from.min(self.items.len())]
            .iter()
            .rev()
            .find(|item| !item.disabled)
    }
}
