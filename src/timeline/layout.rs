use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use super::intervals::{labelled_intervals, TimeInterval};
use super::range::time_range_for_commits;
use crate::analysis::clustering::{cluster_commits, Cluster};
use crate::analysis::grouping::group_commits;
use crate::types::{Commit, GroupBy, TimeRange, TimeScale};

/// One lane's clusters, ready for point placement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaneLayout {
    pub key: String,
    pub commit_count: usize,
    pub clusters: Vec<Cluster>,
}

/// Everything a renderer needs: column headers and per-lane clusters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub range: TimeRange,
    pub scale: TimeScale,
    pub group_by: GroupBy,
    pub intervals: Vec<TimeInterval>,
    pub lanes: Vec<LaneLayout>,
}

impl TimelineLayout {
    /// Lay out `commits` at `scale`, split into lanes by `group_by`.
    ///
    /// The range is computed over all commits so every lane shares the same columns.
    /// `now` only matters when `commits` is empty.
    pub fn build(
        commits: &[Commit],
        scale: TimeScale,
        group_by: GroupBy,
        highlighted: &HashSet<String>,
        now: DateTime<Utc>,
    ) -> Self {
        let range = time_range_for_commits(commits, scale, now);
        let intervals = labelled_intervals(range, scale);

        let lanes = group_commits(commits, group_by)
            .into_iter()
            .map(|lane| LaneLayout {
                commit_count: lane.commits.len(),
                clusters: cluster_commits(&lane.commits, &range, scale, highlighted),
                key: lane.key,
            })
            .collect();

        Self {
            range,
            scale,
            group_by,
            intervals,
            lanes,
        }
    }

    pub fn lane(&self, key: &str) -> Option<&LaneLayout> {
        self.lanes.iter().find(|lane| lane.key == key)
    }

    pub fn total_commits(&self) -> usize {
        self.lanes.iter().map(|lane| lane.commit_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommitAnalysis, CommitType};
    use chrono::TimeZone;

    fn commit(sha: &str, day: u32, kind: &str) -> Commit {
        Commit {
            sha: sha.to_string(),
            author: "ada".to_string(),
            author_url: String::new(),
            date: Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
            message: sha.to_string(),
            description: None,
            url: String::new(),
            analyses: vec![CommitAnalysis::new(kind)],
        }
    }

    #[test]
    fn test_empty_layout() {
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let layout = TimelineLayout::build(&[], TimeScale::Day, GroupBy::Type, &HashSet::new(), now);
        assert_eq!(layout.range, TimeRange::instant(now));
        assert_eq!(layout.intervals.len(), 1);
        assert!(layout.is_empty());
        assert_eq!(layout.total_commits(), 0);
    }

    #[test]
    fn test_lanes_share_range() {
        let commits = vec![commit("a", 1, "FEATURE"), commit("b", 20, "BUG"), commit("c", 2, "FEATURE")];
        let layout = TimelineLayout::build(
            &commits,
            TimeScale::Week,
            GroupBy::Type,
            &HashSet::new(),
            Utc::now(),
        );
        assert_eq!(layout.lanes.len(), 2);
        assert_eq!(layout.total_commits(), 3);

        let bug = layout.lane("BUG").unwrap();
        assert_eq!(bug.clusters.len(), 1);
        assert_eq!(bug.clusters[0].dominant_type, CommitType::Bug);
        assert!(layout.lane("CHORE").is_none());
    }
}
