use crate::event::{EventHandler, SurfaceEvent};

/// Fans surface events out to subscribers, in subscription order
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<Box<dyn EventHandler>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: Box<dyn EventHandler>) {
        self.subscribers.push(handler);
    }

    /// Deliver `event` to every subscriber before returning
    pub fn emit(&mut self, event: &SurfaceEvent) {
        self.subscribers
            .iter_mut()
            .for_each(|subscriber| subscriber.handle_event(event));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribers_see_events_in_order() {
        let mut bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            bus.subscribe(Box::new(move |event: &SurfaceEvent| {
                seen.borrow_mut().push((tag, event.clone()));
            }));
        }

        bus.emit(&SurfaceEvent::Undone);
        bus.emit(&SurfaceEvent::Cleared);
        assert_eq!(bus.subscriber_count(), 2);
        assert_eq!(
            *seen.borrow(),
            vec![
                ("first", SurfaceEvent::Undone),
                ("second", SurfaceEvent::Undone),
                ("first", SurfaceEvent::Cleared),
                ("second", SurfaceEvent::Cleared),
            ]
        );
    }
}
