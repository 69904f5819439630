//! Simulated profiling session.
//!
//! Stands in for the data-ingestion side: every `tick()` extends the data
//! range and reports it to the timeline. The session owns the event bus
//! the timeline publishes to.

use log::{debug, warn};

use super::event_bus::{downcast_event, EventBus};
use super::range::Range;
use super::timeline::{StreamingMode, Timeline};
use super::timeline_events::StreamingChangedEvent;
use crate::config::TimelineSettings;

#[derive(Debug)]
pub struct Session {
    pub timeline: Timeline,
    pub event_bus: EventBus,
    ticks: u64,
    events_seen: usize,
    mode_transitions: usize,
}

impl Session {
    /// Start a session whose data covers `[start_us, start_us + initial_length_us]`.
    pub fn new(start_us: f64, initial_length_us: f64, settings: &TimelineSettings) -> Self {
        let event_bus = EventBus::new();
        let data = Range::new(start_us, start_us + initial_length_us.max(0.0));
        // Build paused and attach the bus first so the initial Live switch is published
        let paused = TimelineSettings {
            start_live: false,
            ..settings.clone()
        };
        let mut timeline = Timeline::with_settings(data, &paused);
        timeline.set_emitter(event_bus.emitter());
        if settings.start_live {
            timeline.set_mode(StreamingMode::Live);
        }
        debug!("Session started at {}us", start_us);

        Self {
            timeline,
            event_bus,
            ticks: 0,
            events_seen: 0,
            mode_transitions: 0,
        }
    }

    /// Number of accepted ticks so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events drained so far by `drain_events`
    pub fn events_seen(&self) -> usize {
        self.events_seen
    }

    /// Mode changes drained so far by `drain_events`
    pub fn mode_transitions(&self) -> usize {
        self.mode_transitions
    }

    /// Empty the bus queue into the running counts. Call once per tick so
    /// long sessions never hit the queue cap.
    pub fn drain_events(&mut self) {
        let events = self.event_bus.poll();
        self.mode_transitions += events
            .iter()
            .filter(|e| downcast_event::<StreamingChangedEvent>(e).is_some())
            .count();
        self.events_seen += events.len();
    }

    /// New samples arrived covering `delta_us` more time. Non-positive
    /// deltas are ignored.
    pub fn tick(&mut self, delta_us: f64) {
        if delta_us.is_nan() || delta_us <= 0.0 {
            warn!("Ignoring non-positive tick: {}us", delta_us);
            return;
        }
        let data = *self.timeline.data_range();
        self.timeline.on_data_range_changed(data.min(), data.max() + delta_us);
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline_events::DataRangeChangedEvent;

    #[test]
    fn test_tick_extends_data() {
        let mut session = Session::new(0.0, 1_000_000.0, &TimelineSettings::default());
        session.tick(500_000.0);
        session.tick(500_000.0);
        assert_eq!(*session.timeline.data_range(), Range::new(0.0, 2_000_000.0));
        assert_eq!(session.ticks(), 2);
    }

    #[test]
    fn test_non_positive_tick_ignored() {
        let mut session = Session::new(0.0, 10.0, &TimelineSettings::default());
        session.tick(0.0);
        session.tick(-5.0);
        session.tick(f64::NAN);
        assert_eq!(*session.timeline.data_range(), Range::new(0.0, 10.0));
        assert_eq!(session.ticks(), 0);
        assert_eq!(session.event_bus.queue_len(), 0);
    }

    #[test]
    fn test_live_session_tracks_edge() {
        let settings = TimelineSettings {
            start_live: true,
            ..TimelineSettings::default()
        };
        let mut session = Session::new(0.0, 5_000_000.0, &settings);
        for _ in 0..10 {
            session.tick(250_000.0);
            let tl = &session.timeline;
            assert_eq!(tl.view_range().max(), tl.data_range().max() - tl.view_buffer());
        }
        assert_eq!(session.timeline.data_range().max(), 7_500_000.0);
    }

    #[test]
    fn test_start_live_is_published() {
        let settings = TimelineSettings {
            start_live: true,
            ..TimelineSettings::default()
        };
        let session = Session::new(0.0, 5_000_000.0, &settings);
        assert!(session.timeline.streaming());

        let events = session.event_bus.poll();
        assert_eq!(events.len(), 1);
        assert_eq!(
            downcast_event::<StreamingChangedEvent>(&events[0]),
            Some(&StreamingChangedEvent(StreamingMode::Live))
        );
    }

    #[test]
    fn test_drain_per_tick_keeps_exact_counts() {
        let settings = TimelineSettings {
            start_live: true,
            ..TimelineSettings::default()
        };
        let mut session = Session::new(0.0, 5_000_000.0, &settings);
        session.drain_events();

        // Live ticks publish data + view each; 600 ticks would overflow an undrained queue
        for tick in 1..=600u64 {
            if tick == 300 {
                session.timeline.set_mode(StreamingMode::Paused);
            }
            if tick == 301 {
                session.timeline.set_mode(StreamingMode::Live);
            }
            session.tick(1_000.0);
            session.drain_events();
            assert_eq!(session.event_bus.queue_len(), 0);
        }

        assert_eq!(session.ticks(), 600);
        assert_eq!(session.mode_transitions(), 3);
        // 600 data events, 599 live view updates plus one resync on resume,
        // 3 mode changes
        assert_eq!(session.events_seen(), 600 + 599 + 1 + 3);
    }

    #[test]
    fn test_tick_publishes_data_event() {
        let mut session = Session::new(100.0, 0.0, &TimelineSettings::default());
        session.tick(50.0);
        let events = session.event_bus.poll();
        assert_eq!(events.len(), 1);
        assert_eq!(
            downcast_event::<DataRangeChangedEvent>(&events[0]),
            Some(&DataRangeChangedEvent(Range::new(100.0, 150.0)))
        );
    }
}
