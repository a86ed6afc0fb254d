//! Donut chart geometry, progress bars and SVG rendering.

pub mod donut;
pub mod geometry;
pub mod progress;
pub mod svg;

pub use donut::{
    ArcSegment, CategoryInspection, CenterLabel, DonutChart, ProgressArc, SegmentKind, Tone,
    UNALLOCATED_COLOR,
};
pub use geometry::{arc_path, polar_to_cartesian, DonutLayout, Point};
pub use progress::{IncomeProgress, SpendProgress};
pub use svg::render_donut;
