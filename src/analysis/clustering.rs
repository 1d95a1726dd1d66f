use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::timeline::rounded_position;
use crate::types::{Commit, CommitType, TimeRange, TimeScale};

/// Commits in one lane that share a rounded timeline position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    /// Integer percentage along the timeline
    pub position: u32,
    /// Members in lane order; never empty
    pub commits: Vec<Commit>,
    /// Most frequent primary type among the members
    pub dominant_type: CommitType,
    /// Members whose SHA is in the highlight set
    pub highlighted: usize,
}

impl Cluster {
    fn new(position: u32, commits: Vec<Commit>, highlighted: &HashSet<String>) -> Self {
        let dominant_type = dominant_type(&commits);
        let highlighted = commits
            .iter()
            .filter(|c| highlighted.contains(&c.sha))
            .count();
        Self {
            position,
            commits,
            dominant_type,
            highlighted,
        }
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    /// A lone commit is drawn as a point rather than a cluster marker.
    pub fn is_single(&self) -> bool {
        self.commits.len() == 1
    }

    pub fn single(&self) -> Option<&Commit> {
        match self.commits.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Most frequent effective type; ties go to the type seen first.
pub fn dominant_type(commits: &[Commit]) -> CommitType {
    let mut counts: Vec<(CommitType, usize)> = Vec::new();
    for commit in commits {
        let kind = commit.effective_type();
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, count)) => *count += 1,
            None => counts.push((kind, 1)),
        }
    }

    let mut best: Option<(CommitType, usize)> = None;
    for (kind, count) in counts {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((kind, count));
        }
    }
    best.map(|(kind, _)| kind).unwrap_or(CommitType::Chore)
}

/// Collapse a lane's commits into clusters ordered by position.
pub fn cluster_commits(
    commits: &[Commit],
    range: &TimeRange,
    scale: TimeScale,
    highlighted: &HashSet<String>,
) -> Vec<Cluster> {
    let mut by_position: BTreeMap<u32, Vec<Commit>> = BTreeMap::new();
    for commit in commits {
        by_position
            .entry(rounded_position(commit.date, range, scale))
            .or_default()
            .push(commit.clone());
    }

    by_position
        .into_iter()
        .map(|(position, members)| Cluster::new(position, members, highlighted))
        .collect()
}
