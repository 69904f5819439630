//! Core timeline engine - ranges, timeline state, events, session
//!
//! Independent of any rendering layer.

pub mod event_bus;
pub mod range;
pub mod session;
pub mod timeline;
pub mod timeline_events;

pub use event_bus::{EventBus, EventEmitter};
pub use range::Range;
pub use session::Session;
pub use timeline::{StreamingMode, Timeline, TimelineSnapshot};
