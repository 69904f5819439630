//! Timeline change events.

use super::range::Range;
use super::timeline::StreamingMode;

/// View window moved or resized
#[derive(Clone, Debug, PartialEq)]
pub struct ViewRangeChangedEvent(pub Range);

/// Ingestion pushed a new data extent
#[derive(Clone, Debug, PartialEq)]
pub struct DataRangeChangedEvent(pub Range);

#[derive(Clone, Debug, PartialEq)]
pub struct StreamingChangedEvent(pub StreamingMode);

/// `None` when the selection was cleared
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChangedEvent(pub Option<Range>);
