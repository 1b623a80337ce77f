//=========================================================================
// Message Bus
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod message_queue;

//=== Public API ==========================================================

pub use bus::{Message, MessageBus};
