//=========================================================================
// Message Bus
//=========================================================================
//
// Type-keyed request queues filled by gameplay code during a frame and
// drained by the engine at the next tick boundary.
//
// Architecture:
//   gameplay → push<M>() → HashMap<TypeId, Vec<M>>
//                              ↓
//   observers  ← read<M>()  (shared, non-consuming)
//   engine     ← drain<M>() (owned, in push order)
//                              ↓
//   engine ─────────────→ clear_all() at tick end
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::TypeId;
use std::collections::HashMap;

use log::warn;

//=== Internal Dependencies ===============================================

use super::message_queue::MessageQueue;

//=== Public API ==========================================================

/// Marker trait for types that can travel on the [`MessageBus`].
///
/// Implemented for every `Send + 'static` type.
pub trait Message: Send + 'static {}

impl<T: Send + 'static> Message for T {}

//=========================================================================

/// One queue per message type. Queues keep their capacity across ticks.
#[derive(Default)]
pub struct MessageBus {
    queues: HashMap<TypeId, Box<dyn MessageQueue>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Message Operations -----------------------------------------------

    /// Queues a message behind earlier ones of the same type.
    pub fn push<M: Message>(&mut self, msg: M) {
        let queue = self
            .queues
            .entry(TypeId::of::<M>())
            .or_insert_with(|| Box::new(Vec::<M>::new()));

        match queue.as_any_mut().downcast_mut::<Vec<M>>() {
            Some(queue) => queue.push(msg),
            None => warn!(
                "Message queue for {} has the wrong type, message dropped",
                std::any::type_name::<M>()
            ),
        }
    }

    /// Messages of type `M` queued so far, oldest first.
    pub fn read<M: Message>(&self) -> &[M] {
        self.queue::<M>().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Removes and returns every queued `M`, oldest first.
    pub fn drain<M: Message>(&mut self) -> Vec<M> {
        self.queues
            .get_mut(&TypeId::of::<M>())
            .and_then(|q| q.as_any_mut().downcast_mut::<Vec<M>>())
            .map(|queue| queue.drain(..).collect())
            .unwrap_or_default()
    }

    //--- Query API --------------------------------------------------------

    pub fn has_messages<M: Message>(&self) -> bool {
        self.count::<M>() > 0
    }

    pub fn count<M: Message>(&self) -> usize {
        self.queue::<M>().map_or(0, Vec::len)
    }

    /// Total messages queued across every type.
    pub fn total(&self) -> usize {
        self.queues.values().map(|q| q.len()).sum()
    }

    //--- Clearing ---------------------------------------------------------

    pub fn clear<M: Message>(&mut self) {
        if let Some(queue) = self.queues.get_mut(&TypeId::of::<M>()) {
            queue.clear_queue();
        }
    }

    /// Empties every queue, keeping their allocations.
    pub fn clear_all(&mut self) {
        for queue in self.queues.values_mut() {
            queue.clear_queue();
        }
    }

    fn queue<M: Message>(&self) -> Option<&Vec<M>> {
        self.queues
            .get(&TypeId::of::<M>())
            .and_then(|q| q.as_any().downcast_ref::<Vec<M>>())
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::requests::{ItemCollected, LoadRoom, StepRoom};

    #[test]
    fn new_bus_is_empty() {
        let bus = MessageBus::new();
        assert!(!bus.has_messages::<LoadRoom>());
        assert!(bus.read::<LoadRoom>().is_empty());
        assert_eq!(bus.total(), 0);
    }

    #[test]
    fn read_is_non_consuming() {
        let mut bus = MessageBus::new();
        bus.push(LoadRoom(2));

        assert_eq!(bus.read::<LoadRoom>(), &[LoadRoom(2)]);
        assert_eq!(bus.read::<LoadRoom>(), &[LoadRoom(2)]);
        assert_eq!(bus.count::<LoadRoom>(), 1);
    }

    #[test]
    fn drain_returns_in_push_order_and_empties() {
        let mut bus = MessageBus::new();
        bus.push(StepRoom::Next);
        bus.push(StepRoom::Previous);
        bus.push(StepRoom::Next);

        assert_eq!(
            bus.drain::<StepRoom>(),
            vec![StepRoom::Next, StepRoom::Previous, StepRoom::Next]
        );
        assert!(!bus.has_messages::<StepRoom>());
        assert!(bus.drain::<StepRoom>().is_empty());
    }

    #[test]
    fn queues_are_separate_per_type() {
        let mut bus = MessageBus::new();
        bus.push(LoadRoom(0));
        bus.push(ItemCollected("lens".into()));
        bus.push(LoadRoom(1));

        assert_eq!(bus.count::<LoadRoom>(), 2);
        assert_eq!(bus.count::<ItemCollected>(), 1);
        assert_eq!(bus.total(), 3);

        bus.clear::<LoadRoom>();
        assert_eq!(bus.count::<LoadRoom>(), 0);
        assert_eq!(bus.count::<ItemCollected>(), 1);
    }

    #[test]
    fn clear_all_empties_every_queue() {
        let mut bus = MessageBus::new();
        bus.push(LoadRoom(0));
        bus.push(ItemCollected("lens".into()));

        bus.clear_all();
        assert_eq!(bus.total(), 0);

        bus.push(LoadRoom(3));
        assert_eq!(bus.read::<LoadRoom>(), &[LoadRoom(3)]);
    }
}
