//=========================================================================
// Message Queue Trait
//=========================================================================
//
// Type-erased view of one `Vec<M>` so the bus can store queues of any
// message type in a single map.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;

//=== Internal Dependencies ===============================================

use super::Message;

//=========================================================================

pub(super) trait MessageQueue: Send {
    /// Empties the queue, keeping its allocation.
    fn clear_queue(&mut self);

    fn len(&self) -> usize;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Message> MessageQueue for Vec<M> {
    fn clear_queue(&mut self) {
        self.clear();
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::requests::LoadRoom;

    #[test]
    fn clear_keeps_capacity() {
        let mut queue: Vec<LoadRoom> = Vec::with_capacity(32);
        queue.extend((0..20).map(LoadRoom));
        let capacity = queue.capacity();

        let erased: &mut dyn MessageQueue = &mut queue;
        erased.clear_queue();
        assert_eq!(erased.len(), 0);

        assert_eq!(queue.capacity(), capacity);
    }

    #[test]
    fn downcasts_back_to_the_vec() {
        let mut queue = vec![LoadRoom(4)];
        let erased: &mut dyn MessageQueue = &mut queue;

        erased
            .as_any_mut()
            .downcast_mut::<Vec<LoadRoom>>()
            .unwrap()
            .push(LoadRoom(5));

        assert!(erased.as_any().downcast_ref::<Vec<u8>>().is_none());
        assert_eq!(queue, vec![LoadRoom(4), LoadRoom(5)]);
    }
}
