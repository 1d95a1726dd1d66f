//! Time arithmetic and geometry: ranges, column intervals, positions, and the
//! assembled layout handed to a renderer.

pub mod intervals;
pub mod layout;
pub mod position;
pub mod range;
pub mod scale;

pub use intervals::{interval_label, intervals, labelled_intervals, Intervals, TimeInterval};
pub use layout::{LaneLayout, TimelineLayout};
pub use position::{position, rounded_position};
pub use range::{compute_time_range, compute_time_range_at, time_range_for_commits};
