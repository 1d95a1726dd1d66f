use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

use crate::analysis::{cache_key, load_commits_async, LayoutCache};
use crate::config::TimelineConfig;
use crate::error::Result;
use crate::timeline::TimelineLayout;
use crate::types::{Commit, GroupBy, TimeScale};

/// Timeline state: the commit snapshot plus the live display controls.
///
/// Layouts are derived on demand and memoized by input hash, so changing a
/// control never needs explicit invalidation.
pub struct TimelineState {
    pub repo_path: String,
    commits: Vec<Commit>,
    selected_scale: TimeScale,
    selected_group_by: GroupBy,
    highlighted: HashSet<String>,
    layout_cache: LayoutCache,
    pub error_message: Option<String>,
}

impl TimelineState {
    pub fn new(config: &TimelineConfig) -> Self {
        Self {
            repo_path: String::new(),
            commits: Vec::new(),
            selected_scale: config.scale,
            selected_group_by: config.group_by,
            highlighted: HashSet::new(),
            layout_cache: LayoutCache::new(config.cache_capacity),
            error_message: None,
        }
    }

    /// Replace the commit snapshot
    pub fn update_with_commits(&mut self, commits: Vec<Commit>) {
        let known: HashSet<&str> = commits.iter().map(|c| c.sha.as_str()).collect();
        self.highlighted.retain(|sha| known.contains(sha.as_str()));
        self.commits = commits;
        self.error_message = None;
    }

    /// Load the snapshot from a local repository
    pub async fn load_repository(&mut self, path: &str, branch: &str) -> Result<usize> {
        self.repo_path = path.to_string();
        match load_commits_async(path.to_string(), branch.to_string()).await {
            Ok(commits) => {
                let count = commits.len();
                self.update_with_commits(commits);
                Ok(count)
            }
            Err(e) => {
                self.error_message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn commits(&self) -> &[Commit] {
        &self.commits
    }

    pub fn scale(&self) -> TimeScale {
        self.selected_scale
    }

    pub fn set_scale(&mut self, scale: TimeScale) {
        self.selected_scale = scale;
    }

    pub fn group_by(&self) -> GroupBy {
        self.selected_group_by
    }

    pub fn set_group_by(&mut self, group_by: GroupBy) {
        self.selected_group_by = group_by;
    }

    pub fn highlighted(&self) -> &HashSet<String> {
        &self.highlighted
    }

    pub fn set_highlighted<I>(&mut self, shas: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.highlighted = shas.into_iter().collect();
    }

    /// Toggle a commit's highlight; returns whether it is now highlighted
    pub fn toggle_highlight(&mut self, sha: &str) -> bool {
        if self.highlighted.remove(sha) {
            false
        } else {
            self.highlighted.insert(sha.to_string());
            true
        }
    }

    pub fn clear_highlights(&mut self) {
        self.highlighted.clear();
    }

    /// Authors sorted by commit count, busiest first
    pub fn contributors(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for commit in &self.commits {
            *counts.entry(commit.author.as_str()).or_insert(0) += 1;
        }
        let mut contributors: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(author, count)| (author.to_string(), count))
            .collect();
        contributors.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        contributors
    }

    /// Layout for the current snapshot and controls.
    pub fn layout(&mut self) -> TimelineLayout {
        self.layout_at(Utc::now())
    }

    /// Like [`layout`](Self::layout) with an explicit clock for the empty case.
    pub fn layout_at(&mut self, now: DateTime<Utc>) -> TimelineLayout {
        if self.commits.is_empty() {
            // Depends on `now`, so never cached.
            return TimelineLayout::build(
                &self.commits,
                self.selected_scale,
                self.selected_group_by,
                &self.highlighted,
                now,
            );
        }

        let key = cache_key(
            &self.commits,
            self.selected_scale,
            self.selected_group_by,
            &self.highlighted,
        );
        if let Some(layout) = self.layout_cache.get(&key) {
            tracing::trace!("Layout cache hit for {:?}", key);
            return layout.clone();
        }

        tracing::debug!(
            "Computing layout for {} commits ({} / {})",
            self.commits.len(),
            self.selected_scale,
            self.selected_group_by
        );
        let layout = TimelineLayout::build(
            &self.commits,
            self.selected_scale,
            self.selected_group_by,
            &self.highlighted,
            now,
        );
        self.layout_cache.store(key, layout.clone());
        layout
    }

    pub fn cached_layouts(&self) -> usize {
        self.layout_cache.len()
    }
}

impl Default for TimelineState {
    fn default() -> Self {
        Self::new(&TimelineConfig::default())
    }
}
