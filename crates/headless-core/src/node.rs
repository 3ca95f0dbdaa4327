//! Opaque handles to host-layer elements and focus-restoration targets.
//!
//! The controllers never touch a real element tree. The host assigns each
//! element it cares about a [`NodeId`] and keeps the mapping; controllers
//! only record and hand these handles back.

/// Opaque handle to an element owned by the host rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Wrap a host-assigned raw id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Where keyboard focus should land when a menu or dialog closes.
///
/// Targets form a failover chain: a host that finds a [`Node`](Self::Node)
/// no longer mounted must fall back to [`Trigger`](Self::Trigger), and a
/// missing trigger falls back to [`Body`](Self::Body). Restoration therefore
/// never fails, it only degrades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusTarget {
    /// A specific host element (e.g. the element an outside click landed on).
    Node(NodeId),
    /// The element that originally opened the widget.
    Trigger,
    /// The document body; the end of the chain.
    Body,
}

impl FocusTarget {
    /// The next target to try when this one cannot receive focus.
    #[must_use]
    pub const fn failover(self) -> Option<Self> {
        match self {
            Self::Node(_) => Some(Self::Trigger),
            Self::Trigger => Some(Self::Body),
            Self::Body => None,
        }
    }
}

/// Resolve a return-focus target from a captured element and a trigger.
///
/// `preferred` is the element recorded by an outside-click handler, if any;
/// it wins over the trigger so focus lands where the user actually clicked.
/// `live` reports whether a node is still mounted; a stale handle is skipped
/// rather than surfaced as an error.
pub fn resolve_return_focus(
    preferred: Option<NodeId>,
    trigger: Option<NodeId>,
    live: impl Fn(NodeId) -> bool,
) -> FocusTarget {
    if let Some(node) = preferred
        && live(node)
    {
        return FocusTarget::Node(node);
    }
    if let Some(node) = trigger
        && live(node)
    {
        return FocusTarget::Node(node);
    }
    FocusTarget::Body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failover_chain_terminates() {
        let mut target = FocusTarget::Node(NodeId::new(1));
        let mut hops = 0;
        while let Some(next) = target.failover() {
            target = next;
            hops += 1;
        }
        assert_eq!(target, FocusTarget::Body);
        assert_eq!(hops, 2);
    }

    #[test]
    fn captured_element_wins_over_trigger() {
        let captured = NodeId::new(7);
        let trigger = NodeId::new(1);
        let target = resolve_return_focus(Some(captured), Some(trigger), |_| true);
        assert_eq!(target, FocusTarget::Node(captured));
    }

    #[test]
    fn dead_captured_element_falls_back_to_trigger() {
        let captured = NodeId::new(7);
        let trigger = NodeId::new(1);
        let target = resolve_return_focus(Some(captured), Some(trigger), |n| n == trigger);
        assert_eq!(target, FocusTarget::Node(trigger));
    }

    #[test]
    fn everything_dead_resolves_to_body() {
        let target = resolve_return_focus(Some(NodeId::new(7)), Some(NodeId::new(1)), |_| false);
        assert_eq!(target, FocusTarget::Body);
    }

    #[test]
    fn no_candidates_resolves_to_body() {
        assert_eq!(resolve_return_focus(None, None, |_| true), FocusTarget::Body);
    }
}
