//! Touch-map classification and playtime aggregation for the touchmap
//! engine.

pub mod builder;
pub mod classify;
pub mod geometry;
pub mod playtime;

pub use builder::{Chart, ChartDataBuilder, ChartScope, GameScope, Selection};
pub use classify::{EventClassifier, Outcome, Perspective, Segment, TouchMap};
pub use geometry::{FieldBounds, Point};
pub use playtime::{PlaytimeCell, PlaytimeMatrix};
