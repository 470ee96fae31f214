//! Cross-circle drag coordination.
//!
//! Editable circles on the same map register here. When one starts a drag
//! it publishes *suspend*, and every other registered circle unbinds the
//! listener groups that [`suspends`] selects until the matching *resume*.
//! Nothing blocks: listeners are simply detached and reattached.

use std::cell::RefCell;

use mapcircle_core::{
    BroadcastEvent, EventBus, EventBusConfig, HandleKind, InstanceId, SubscriptionId,
};

use crate::listeners::ListenerGroup;

/// Registry of editable circles plus the broadcast bus they share.
#[derive(Debug)]
pub struct BroadcastCoordinator {
    bus: EventBus,
    registry: RefCell<Vec<(InstanceId, SubscriptionId)>>,
}

impl BroadcastCoordinator {
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            bus: EventBus::with_config(config),
            registry: RefCell::new(Vec::new()),
        }
    }

    /// Register a circle. `handler` receives events from every other circle.
    ///
    /// Registering an id twice replaces its handler.
    pub fn register<F>(&self, id: InstanceId, handler: F)
    where
        F: Fn(&BroadcastEvent) + 'static,
    {
        self.unregister(id);
        let len = self.registry.borrow().len() + 1;
        self.sync_max_listeners(len);
        let sub = self.bus.subscribe(id, handler);
        self.registry.borrow_mut().push((id, sub));
        tracing::debug!("Circle {} registered ({} editable)", id, len);
    }

    /// Returns false if the circle was not registered.
    pub fn unregister(&self, id: InstanceId) -> bool {
        let removed = {
            let mut registry = self.registry.borrow_mut();
            let index = registry.iter().position(|(rid, _)| *rid == id);
            index.map(|i| registry.remove(i))
        };
        match removed {
            Some((_, sub)) => {
                self.bus.unsubscribe(sub);
                let len = self.len();
                self.sync_max_listeners(len);
                tracing::debug!("Circle {} unregistered ({} editable)", id, len);
                true
            }
            None => false,
        }
    }

    pub fn is_registered(&self, id: InstanceId) -> bool {
        self.registry.borrow().iter().any(|(rid, _)| *rid == id)
    }

    pub fn registered(&self) -> Vec<InstanceId> {
        self.registry.borrow().iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.registry.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    /// Tell every other circle that `source` started dragging `handle`.
    ///
    /// Returns the number of circles notified.
    pub fn suspend(&self, source: InstanceId, handle: HandleKind) -> usize {
        self.publish(BroadcastEvent::Suspend { source, handle })
    }

    /// Tell every other circle that `source` stopped dragging `handle`.
    pub fn resume(&self, source: InstanceId, handle: HandleKind) -> usize {
        self.publish(BroadcastEvent::Resume { source, handle })
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    fn publish(&self, event: BroadcastEvent) -> usize {
        match self.bus.publish(event) {
            Ok(delivered) => delivered,
            Err(e) => {
                tracing::trace!("{}: {}", event.description(), e);
                0
            }
        }
    }

    fn sync_max_listeners(&self, len: usize) {
        self.bus
            .set_max_listeners(len.max(self.bus.config().max_listeners));
    }
}

impl Default for BroadcastCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a drag of `dragged` on circle `source` suspends `group` on `owner`.
///
/// The fill is always suspended. A handle group stays live only on the
/// dragging circle itself, and only for the handle being dragged.
pub fn suspends(
    group: ListenerGroup,
    owner: InstanceId,
    source: InstanceId,
    dragged: HandleKind,
) -> bool {
    match group {
        ListenerGroup::Fill => true,
        ListenerGroup::CenterHandle => owner != source || dragged == HandleKind::Radius,
        ListenerGroup::RadiusHandles => owner != source || dragged == HandleKind::Center,
        ListenerGroup::Drag | ListenerGroup::Lifecycle => false,
    }
}

/// The groups [`suspends`] selects, in a fixed order.
pub fn suspended_groups(owner: InstanceId, source: InstanceId, dragged: HandleKind) -> Vec<ListenerGroup> {
    [
        ListenerGroup::Fill,
        ListenerGroup::CenterHandle,
        ListenerGroup::RadiusHandles,
    ]
    .into_iter()
    .filter(|g| suspends(*g, owner, source, dragged))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_register_and_unregister() {
        let coordinator = BroadcastCoordinator::new();
        let a = InstanceId::next();
        coordinator.register(a, |_| {});
        coordinator.register(a, |_| {});
        assert_eq!(coordinator.len(), 1);
        assert!(coordinator.is_registered(a));
        assert!(coordinator.unregister(a));
        assert!(!coordinator.unregister(a));
        assert!(coordinator.is_empty());
    }

    #[test]
    fn test_sender_is_excluded() {
        let coordinator = BroadcastCoordinator::new();
        let a = InstanceId::next();
        let b = InstanceId::next();
        let a_seen = Rc::new(Cell::new(0));
        let b_seen = Rc::new(Cell::new(0));
        let a_clone = Rc::clone(&a_seen);
        let b_clone = Rc::clone(&b_seen);
        coordinator.register(a, move |_| a_clone.set(a_clone.get() + 1));
        coordinator.register(b, move |_| b_clone.set(b_clone.get() + 1));

        assert_eq!(coordinator.suspend(a, HandleKind::Center), 1);
        assert_eq!(coordinator.resume(a, HandleKind::Center), 1);
        assert_eq!(a_seen.get(), 0);
        assert_eq!(b_seen.get(), 2);
    }

    #[test]
    fn test_publish_with_nobody_registered() {
        let coordinator = BroadcastCoordinator::new();
        assert_eq!(coordinator.suspend(InstanceId::next(), HandleKind::Radius), 0);
    }

    #[test]
    fn test_max_listeners_tracks_registry() {
        let coordinator = BroadcastCoordinator::new();
        let ids: Vec<_> = (0..12).map(|_| InstanceId::next()).collect();
        for id in &ids {
            coordinator.register(*id, |_| {});
        }
        assert_eq!(coordinator.bus().max_listeners(), 12);
        for id in &ids[..6] {
            coordinator.unregister(*id);
        }
        assert_eq!(coordinator.bus().max_listeners(), 10);
    }

    #[test]
    fn test_history_records_broadcasts() {
        let coordinator = BroadcastCoordinator::with_config(EventBusConfig {
            enable_history: true,
            ..EventBusConfig::default()
        });
        let a = InstanceId::next();
        let b = InstanceId::next();
        coordinator.register(b, |_| {});

        coordinator.suspend(a, HandleKind::Radius);
        coordinator.resume(a, HandleKind::Radius);
        assert_eq!(
            coordinator.bus().history(None),
            vec![
                BroadcastEvent::Suspend { source: a, handle: HandleKind::Radius },
                BroadcastEvent::Resume { source: a, handle: HandleKind::Radius },
            ]
        );
    }

    #[test]
    fn test_group_rule() {
        let me = InstanceId::next();
        let other = InstanceId::next();

        assert_eq!(
            suspended_groups(me, me, HandleKind::Center),
            vec![ListenerGroup::Fill, ListenerGroup::RadiusHandles]
        );
        assert_eq!(
            suspended_groups(me, me, HandleKind::Radius),
            vec![ListenerGroup::Fill, ListenerGroup::CenterHandle]
        );
        assert_eq!(suspended_groups(other, me, HandleKind::Center).len(), 3);
        assert!(!suspends(ListenerGroup::Drag, other, me, HandleKind::Center));
    }
}
