//! # Common Types
//!
//! This module contains the types shared by the timeline engine: commits and their
//! analyses as they arrive from storage, the display controls (scale and grouping),
//! and the derived time range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TimelineError;

/// Epic label used when a commit's primary analysis has none.
pub const UNCATEGORIZED_EPIC: &str = "Uncategorized";

/// The closed set of commit classifications the timeline knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommitType {
    Feature,
    Warning,
    Milestone,
    Bug,
    Chore,
}

impl CommitType {
    pub const ALL: [CommitType; 5] = [
        CommitType::Feature,
        CommitType::Warning,
        CommitType::Milestone,
        CommitType::Bug,
        CommitType::Chore,
    ];

    /// Parse a raw analysis type. Unmodelled values such as `REFACTOR` yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "FEATURE" => Some(CommitType::Feature),
            "WARNING" => Some(CommitType::Warning),
            "MILESTONE" => Some(CommitType::Milestone),
            "BUG" => Some(CommitType::Bug),
            "CHORE" => Some(CommitType::Chore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CommitType::Feature => "FEATURE",
            CommitType::Warning => "WARNING",
            CommitType::Milestone => "MILESTONE",
            CommitType::Bug => "BUG",
            CommitType::Chore => "CHORE",
        }
    }
}

impl fmt::Display for CommitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One AI-generated interpretation of a commit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitAnalysis {
    /// Raw classification as delivered by the analysis service
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub epic: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CommitAnalysis {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            epic: None,
            title: None,
            idea: None,
            description: None,
        }
    }

    pub fn with_epic(mut self, epic: impl Into<String>) -> Self {
        self.epic = Some(epic.into());
        self
    }

    /// The modelled type, if the raw string is one we recognise.
    pub fn commit_type(&self) -> Option<CommitType> {
        CommitType::parse(&self.kind)
    }
}

/// A single analyzed commit, read-only for the duration of a layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub author: String,
    pub author_url: String,
    pub date: DateTime<Utc>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    /// Ordered analyses; the first one is the primary analysis
    #[serde(default)]
    pub analyses: Vec<CommitAnalysis>,
}

impl Commit {
    pub fn primary_analysis(&self) -> Option<&CommitAnalysis> {
        self.analyses.first()
    }

    /// Primary analysis type, defaulting to `CHORE` when it is missing or unrecognised.
    pub fn effective_type(&self) -> CommitType {
        self.primary_analysis()
            .and_then(CommitAnalysis::commit_type)
            .unwrap_or(CommitType::Chore)
    }

    pub fn epic(&self) -> &str {
        self.primary_analysis()
            .and_then(|a| a.epic.as_deref())
            .filter(|epic| !epic.trim().is_empty())
            .unwrap_or(UNCATEGORIZED_EPIC)
    }

    pub fn title(&self) -> &str {
        self.primary_analysis()
            .and_then(|a| a.title.as_deref())
            .unwrap_or(&self.message)
    }

    pub fn summary(&self) -> Option<&str> {
        self.primary_analysis()
            .and_then(|a| a.description.as_deref())
            .or(self.description.as_deref())
    }
}

/// Calendar granularity of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeScale {
    Day,
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeScale {
    pub const ALL: [TimeScale; 5] = [
        TimeScale::Day,
        TimeScale::Week,
        TimeScale::Month,
        TimeScale::Quarter,
        TimeScale::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeScale::Day => "day",
            TimeScale::Week => "week",
            TimeScale::Month => "month",
            TimeScale::Quarter => "quarter",
            TimeScale::Year => "year",
        }
    }
}

impl fmt::Display for TimeScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeScale {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeScale::ALL
            .into_iter()
            .find(|scale| scale.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimelineError::UnknownScale(s.to_string()))
    }
}

/// Lane selector for the grouping engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Type,
    Author,
    Date,
    Epic,
}

impl GroupBy {
    pub const ALL: [GroupBy; 4] = [GroupBy::Type, GroupBy::Author, GroupBy::Date, GroupBy::Epic];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Type => "type",
            GroupBy::Author => "author",
            GroupBy::Date => "date",
            GroupBy::Epic => "epic",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = TimelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GroupBy::ALL
            .into_iter()
            .find(|group| group.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TimelineError::UnknownGroupBy(s.to_string()))
    }
}

/// The visualised `[start, end]` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn instant(at: DateTime<Utc>) -> Self {
        Self { start: at, end: at }
    }

    pub fn contains(&self, date: DateTime<Utc>) -> bool {
        self.start <= date && date <= self.end
    }
}

/// A key used for caching computed layouts.
///
/// The commit snapshot and the highlight set are folded into hashes so that any
/// change to the inputs produces a different key.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct CacheKey {
    pub scale: TimeScale,
    pub group_by: GroupBy,
    /// Hash of the commit snapshot (SHAs, dates and primary analyses)
    pub data_hash: u64,
    /// Hash of the sorted highlighted SHAs
    pub highlight_hash: u64,
}
