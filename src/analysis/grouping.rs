use chrono::Datelike;
use serde::Serialize;
use std::collections::HashMap;

use crate::types::{Commit, CommitType, GroupBy};

/// A named subset of commits sharing a grouping key, in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lane {
    pub key: String,
    pub commits: Vec<Commit>,
}

/// Lanes in discovery order with key lookup.
#[derive(Default)]
struct LaneSet {
    lanes: Vec<Lane>,
    index: HashMap<String, usize>,
}

impl LaneSet {
    fn ensure(&mut self, key: &str) -> usize {
        if let Some(&idx) = self.index.get(key) {
            return idx;
        }
        self.lanes.push(Lane {
            key: key.to_string(),
            commits: Vec::new(),
        });
        let idx = self.lanes.len() - 1;
        self.index.insert(key.to_string(), idx);
        idx
    }

    fn get(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    fn push(&mut self, idx: usize, commit: &Commit) {
        self.lanes[idx].commits.push(commit.clone());
    }

    fn push_to(&mut self, key: &str, commit: &Commit) {
        let idx = self.ensure(key);
        self.push(idx, commit);
    }
}

/// Lane key for the `date` grouping: `"{year}-{month}"`, month 1-12 without padding.
pub fn month_key(commit: &Commit) -> String {
    format!("{}-{}", commit.date.year(), commit.date.month())
}

/// Partition commits into lanes. Every commit lands in exactly one lane.
pub fn group_commits(commits: &[Commit], group_by: GroupBy) -> Vec<Lane> {
    let mut set = LaneSet::default();

    match group_by {
        GroupBy::Type => {
            // Only types that actually occur get a lane.
            for commit in commits {
                if let Some(kind) = commit.primary_analysis().and_then(|a| a.commit_type()) {
                    set.ensure(kind.as_str());
                }
            }
            if set.lanes.is_empty() && !commits.is_empty() {
                set.ensure(CommitType::Chore.as_str());
            }
            let fallback = set.get(CommitType::Chore.as_str()).unwrap_or(0);

            for commit in commits {
                let idx = commit
                    .primary_analysis()
                    .and_then(|a| a.commit_type())
                    .and_then(|kind| set.get(kind.as_str()))
                    .unwrap_or(fallback);
                set.push(idx, commit);
            }
        }
        GroupBy::Author => {
            for commit in commits {
                set.push_to(&commit.author, commit);
            }
        }
        GroupBy::Date => {
            for commit in commits {
                set.push_to(&month_key(commit), commit);
            }
        }
        GroupBy::Epic => {
            for commit in commits {
                set.ensure(commit.epic());
            }
            for commit in commits {
                set.push_to(commit.epic(), commit);
            }
        }
    }

    set.lanes
}
