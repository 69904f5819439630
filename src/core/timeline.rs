//! Timeline range manager - data, view and selection ranges for a profiler session.
//!
//! **Ownership**: the timeline owns all three ranges. The ingestion side
//! reports new data extents through [`Timeline::on_data_range_changed`];
//! nothing outside this type mutates the data range.
//!
//! # Modes
//!
//! - **Paused**: view is under manual control (pan/zoom gestures)
//! - **Live**: view trails the data edge, ending `buffer_us` before `data.max`
//!
//! Entering Live (or re-affirming it) snaps the view's right edge to the
//! live edge, preserving width. Leaving Live freezes the view in place.
//!
//! # Clamping
//!
//! The view is never clamped against the data range. `reset_zoom`, `pan`
//! and `zoom` may move it past either data edge.

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use super::event_bus::EventEmitter;
use super::range::Range;
use super::timeline_events::{
    DataRangeChangedEvent, SelectionChangedEvent, StreamingChangedEvent, ViewRangeChangedEvent,
};
use crate::config::TimelineSettings;

/// 30 s, the view width restored by `reset_zoom()`
pub const DEFAULT_VIEW_LENGTH_US: f64 = 30_000_000.0;

/// 1 s gap kept between the view's right edge and the data edge
pub const DEFAULT_BUFFER_US: f64 = 1_000_000.0;

/// Streaming mode of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StreamingMode {
    #[default]
    Paused,
    Live,
}

impl StreamingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            StreamingMode::Paused => "paused",
            StreamingMode::Live => "live",
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, StreamingMode::Live)
    }
}

impl From<bool> for StreamingMode {
    fn from(streaming: bool) -> Self {
        if streaming { StreamingMode::Live } else { StreamingMode::Paused }
    }
}

impl std::fmt::Display for StreamingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Point-in-time copy of the timeline state, for output and inspection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSnapshot {
    pub data: Range,
    pub view: Range,
    pub selection: Option<Range>,
    pub mode: StreamingMode,
    pub buffer_us: f64,
}

/// View/selection manager for one profiling session
#[derive(Debug, Clone)]
pub struct Timeline {
    data_range: Range,
    view_range: Range,
    selection: Option<Range>,
    buffer_us: f64,
    view_length_us: f64,
    mode: StreamingMode,
    emitter: EventEmitter,
}

impl Timeline {
    /// Timeline with the default 1 s buffer, paused.
    pub fn new(data_range: Range) -> Self {
        Self::build(data_range, DEFAULT_BUFFER_US, DEFAULT_VIEW_LENGTH_US)
    }

    /// Timeline configured from settings. `start_live` enters Live once
    /// construction is done, snapping the view like `set_streaming(true)`.
    pub fn with_settings(data_range: Range, settings: &TimelineSettings) -> Self {
        let mut timeline = Self::build(
            data_range,
            settings.buffer_us,
            settings.default_view_length_us,
        );
        if settings.start_live {
            timeline.set_mode(StreamingMode::Live);
        }
        timeline
    }

    fn build(data_range: Range, buffer_us: f64, view_length_us: f64) -> Self {
        let mut view_range = Range::new(data_range.min(), data_range.max());
        view_range.shift(-buffer_us);
        debug!(
            "Timeline created: data {} view {} buffer {}us",
            data_range, view_range, buffer_us
        );

        Self {
            data_range,
            view_range,
            selection: None,
            buffer_us,
            view_length_us,
            mode: StreamingMode::Paused,
            emitter: EventEmitter::detached(),
        }
    }

    /// Attach an emitter; subsequent changes are published through it.
    pub fn set_emitter(&mut self, emitter: EventEmitter) {
        self.emitter = emitter;
    }

    // === Accessors ===

    pub fn data_range(&self) -> &Range {
        &self.data_range
    }

    pub fn view_range(&self) -> &Range {
        &self.view_range
    }

    /// Direct view access for gesture handlers. Changes made through this
    /// reference are not published and do not leave Live mode, so the view
    /// may sit off the live edge until the next data update or
    /// `set_mode(Live)`. Use `set_view_range` for tracked edits.
    pub fn view_range_mut(&mut self) -> &mut Range {
        &mut self.view_range
    }

    pub fn selection(&self) -> Option<&Range> {
        self.selection.as_ref()
    }

    pub fn view_buffer(&self) -> f64 {
        self.buffer_us
    }

    /// Width restored by `reset_zoom()`
    pub fn default_view_length(&self) -> f64 {
        self.view_length_us
    }

    pub fn mode(&self) -> StreamingMode {
        self.mode
    }

    pub fn streaming(&self) -> bool {
        self.mode.is_live()
    }

    /// Where the view's right edge sits while Live
    pub fn live_edge(&self) -> f64 {
        self.data_range.max() - self.buffer_us
    }

    pub fn snapshot(&self) -> TimelineSnapshot {
        TimelineSnapshot {
            data: self.data_range,
            view: self.view_range,
            selection: self.selection,
            mode: self.mode,
            buffer_us: self.buffer_us,
        }
    }

    // === Mode ===

    pub fn set_streaming(&mut self, enabled: bool) {
        self.set_mode(StreamingMode::from(enabled));
    }

    /// Switch mode. Live always resyncs the view to the live edge, even if
    /// already Live; Paused leaves the view where it is.
    pub fn set_mode(&mut self, mode: StreamingMode) {
        if self.mode != mode {
            debug!("Timeline mode: {} -> {}", self.mode, mode);
            self.mode = mode;
            self.emitter.emit(StreamingChangedEvent(mode));
        }
        if mode.is_live() {
            self.snap_to_live_edge();
        }
    }

    // === View ===

    /// View spans the default length, ending at the current view max.
    pub fn reset_zoom(&mut self) {
        let current_max = self.view_range.max();
        self.update_view(current_max - self.view_length_us, current_max);
    }

    /// Replace the view bounds and publish the change. Like `pan`, moving
    /// the view while Live hands control back to the user.
    pub fn set_view_range(&mut self, min: f64, max: f64) {
        if Range::new(min, max) == self.view_range {
            return;
        }
        if self.mode.is_live() {
            self.set_mode(StreamingMode::Paused);
        }
        self.update_view(min, max);
    }

    /// Move the view by `delta_us`. A non-zero pan while Live hands control
    /// back to the user (mode drops to Paused).
    pub fn pan(&mut self, delta_us: f64) {
        if delta_us == 0.0 {
            return;
        }
        if self.mode.is_live() {
            self.set_mode(StreamingMode::Paused);
        }
        let view = self.view_range;
        self.update_view(view.min() + delta_us, view.max() + delta_us);
    }

    /// Widen (positive) or narrow (negative) the view by `delta_us`.
    ///
    /// `anchor_ratio` picks the point that stays fixed: 0.0 = left edge,
    /// 1.0 = right edge (clamped to that interval, NaN treated as center).
    /// While Live the right edge is placed on the live edge regardless. Width
    /// never drops below zero. A non-finite `delta_us` is ignored.
    pub fn zoom(&mut self, delta_us: f64, anchor_ratio: f64) {
        if !delta_us.is_finite() {
            warn!("Ignoring non-finite zoom delta: {}", delta_us);
            return;
        }

        let view = self.view_range;
        let width = view.length();
        let new_width = (width + delta_us).max(0.0);

        if self.mode.is_live() {
            let edge = self.live_edge();
            self.update_view(edge - new_width, edge);
            return;
        }

        let anchor = if anchor_ratio.is_nan() { 0.5 } else { anchor_ratio.clamp(0.0, 1.0) };
        let pivot = view.min() + width * anchor;
        self.update_view(pivot - new_width * anchor, pivot + new_width * (1.0 - anchor));
    }

    // === Data ===

    /// New data extent from the ingestion side. While Live the view follows.
    pub fn on_data_range_changed(&mut self, min: f64, max: f64) {
        let next = Range::new(min, max);
        if next != self.data_range {
            trace!("Data range: {} -> {}", self.data_range, next);
            self.data_range = next;
            self.emitter.emit(DataRangeChangedEvent(next));
        }
        if self.mode.is_live() {
            self.snap_to_live_edge();
        }
    }

    // === Selection ===

    pub fn set_selection(&mut self, min: f64, max: f64) {
        let next = Some(Range::new(min, max));
        if self.selection != next {
            self.selection = next;
            self.emitter.emit(SelectionChangedEvent(next));
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.take().is_some() {
            self.emitter.emit(SelectionChangedEvent(None));
        }
    }

    // === Internals ===

    fn snap_to_live_edge(&mut self) {
        let delta = self.live_edge() - self.view_range.max();
        if delta != 0.0 {
            let view = self.view_range;
            self.update_view(view.min() + delta, view.max() + delta);
        }
    }

    fn update_view(&mut self, min: f64, max: f64) {
        let next = Range::new(min, max);
        if next == self.view_range {
            return;
        }
        trace!("View range: {} -> {}", self.view_range, next);
        self.view_range = next;
        self.emitter.emit(ViewRangeChangedEvent(next));
    }
}
