// Copyright 2025 the Drawboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed selection and movement notifications.

use core::fmt;

use drawboard_geom::WorldPoint;
use drawboard_shape::ShapeId;

/// Something a host may want to react to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StageEvent {
    /// A shape became the selection.
    Select(ShapeId),
    /// The selection was cleared.
    Unselect,
    /// A dragged shape moved; carries its new world translation.
    Move(ShapeId, WorldPoint),
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler = Box<dyn FnMut(&StageEvent)>;

/// Synchronous publish/subscribe channel for [`StageEvent`]s.
///
/// Events are delivered immediately to every current subscriber, in
/// subscription order. Nothing is buffered or replayed.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: u64,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.handlers.len())
            .finish_non_exhaustive()
    }
}

impl EventBus {
    /// An empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for every future event.
    pub fn subscribe(&mut self, handler: impl FnMut(&StageEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Drops a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(h, _)| *h != id);
        self.handlers.len() != before
    }

    /// Delivers `event` to every subscriber.
    pub fn emit(&mut self, event: &StageEvent) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use drawboard_shape::ShapeId;

    use super::{EventBus, StageEvent};

    #[test]
    fn delivers_in_subscription_order_until_unsubscribed() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut bus = EventBus::new();
        let first = {
            let log = Rc::clone(&log);
            bus.subscribe(move |e| log.borrow_mut().push((1, *e)))
        };
        {
            let log = Rc::clone(&log);
            bus.subscribe(move |e| log.borrow_mut().push((2, *e)));
        }
        let id = ShapeId::new();
        bus.emit(&StageEvent::Select(id));
        assert!(bus.unsubscribe(first));
        assert!(!bus.unsubscribe(first));
        bus.emit(&StageEvent::Unselect);

        assert_eq!(
            *log.borrow(),
            vec![
                (1, StageEvent::Select(id)),
                (2, StageEvent::Select(id)),
                (2, StageEvent::Unselect),
            ]
        );
        assert_eq!(bus.len(), 1);
    }
}
