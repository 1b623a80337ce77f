//=========================================================================
// Room Events
//=========================================================================
//
// Outbound notifications and the hub that fans them out to listeners.
//
// Architecture:
//   RoomManager / Engine ──emit()──> EventHub ──channel──> Subscription
//                                                           (drain per tick)
//
// Each listener owns its `Subscription`. Dropping it disconnects the
// channel and the hub prunes the sender on the next emit, so there is no
// explicit unsubscribe call to forget.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryIter};
use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::room::{NodeId, RoomDefinition};

//=== RoomEvent ===========================================================

/// Everything the room core announces to the rest of the game.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    /// A transition was admitted; fires before the old room is destroyed.
    Loading(RoomDefinition),

    /// The new room is initialized, active and the player has been placed.
    Loaded(LoadedRoom),

    /// A request was refused. Carries a human readable reason.
    Blocked(String),

    /// The current room finished a quarter turn.
    RotationFinished,

    InspectEntered,
    InspectExited,
}

/// Summary of the room carried by [`RoomEvent::Loaded`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedRoom {
    pub index: usize,
    pub name: String,
    pub node: NodeId,
    pub wall_count: usize,
}

//=== EventHub ============================================================

/// Fan-out of events to any number of owned subscriptions.
pub struct EventHub<E: Clone> {
    senders: Vec<Sender<E>>,
}

impl<E: Clone> EventHub<E> {
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// Registers a new listener.
    ///
    /// Events emitted after this call are queued on the returned handle
    /// until drained. Dropping the handle deregisters it. The queue is
    /// unbounded, so a live handle that is never drained keeps growing.
    pub fn subscribe(&mut self) -> Subscription<E> {
        let (sender, receiver) = unbounded();
        self.senders.push(sender);
        Subscription { receiver }
    }

    /// Delivers `event` to every live subscription.
    pub fn emit(&mut self, event: E) {
        let before = self.senders.len();
        self.senders.retain(|sender| sender.send(event.clone()).is_ok());

        let pruned = before - self.senders.len();
        if pruned > 0 {
            debug!("Pruned {} dropped event subscription(s)", pruned);
        }
    }

    /// Number of registered senders, including ones not yet pruned.
    pub fn listener_count(&self) -> usize {
        self.senders.len()
    }
}

impl<E: Clone> Default for EventHub<E> {
    fn default() -> Self {
        Self::new()
    }
}

//=== Subscription ========================================================

/// Owned listener handle returned by [`EventHub::subscribe`].
pub struct Subscription<E> {
    receiver: Receiver<E>,
}

impl<E> Subscription<E> {
    /// Iterates over every event queued since the last drain.
    pub fn drain(&self) -> TryIter<'_, E> {
        self.receiver.try_iter()
    }

    /// Collects queued events into a Vec.
    pub fn collect(&self) -> Vec<E> {
        self.receiver.try_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}

//=== Tests ===============================================================
