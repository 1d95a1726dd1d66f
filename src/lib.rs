//! # Commit Timeline Layout Library
//!
//! `commit_timeline` turns a list of analyzed Git commits into the geometry of a
//! visual timeline: a padded time range, labelled columns at a chosen calendar
//! scale, lanes of commits grouped by type, author, month or epic, and clusters of
//! commits that land on the same spot within a lane.
//!
//! ## Features
//!
//! - Calendar arithmetic for day, week, month, quarter and year scales (UTC)
//! - Percentage positioning of commits along the timeline
//! - Grouping into lanes by type, author, date or epic
//! - Clustering of overlapping commits with dominant type and highlight counts
//! - Ingestion of commit records from JSON, or straight from a local repository
//! - Memoization of computed layouts
//!
//! ## Example
//!
//! ```no_run
//! use commit_timeline::{analysis, GroupBy, TimeScale, TimelineState};
//!
//! let commits = analysis::read_commits("commits.json".as_ref())?;
//! let mut state = TimelineState::default();
//! state.update_with_commits(commits);
//! state.set_scale(TimeScale::Week);
//! state.set_group_by(GroupBy::Epic);
//!
//! let layout = state.layout();
//! for lane in &layout.lanes {
//!     println!("{}: {} clusters", lane.key, lane.clusters.len());
//! }
//! # Ok::<(), commit_timeline::TimelineError>(())
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod timeline;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use app::TimelineState;
pub use config::TimelineConfig;
pub use error::TimelineError;
pub use timeline::{TimeInterval, TimelineLayout};
pub use types::{CacheKey, Commit, CommitAnalysis, CommitType, GroupBy, TimeRange, TimeScale};
