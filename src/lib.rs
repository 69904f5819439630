//! Profiler timeline - data/view/selection range management
//!
//! Re-exports all modules for use by binary targets.

// Core engine (ranges, timeline, events, session)
pub mod core;

// App modules
pub mod cli;
pub mod config;
pub mod shell;

pub use crate::core::event_bus::{downcast_event, BoxedEvent, EventBus, EventEmitter};
pub use crate::core::range::Range;
pub use crate::core::session::Session;
pub use crate::core::timeline::{
    StreamingMode, Timeline, TimelineSnapshot, DEFAULT_BUFFER_US, DEFAULT_VIEW_LENGTH_US,
};
pub use config::TimelineSettings;
