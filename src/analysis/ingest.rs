//! Normalisation of commit records arriving from the storage service.
//!
//! Records have carried their analyses under two different field names over time.
//! Both are read here, once, so the rest of the crate only ever sees
//! [`Commit::analyses`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::{Result, TimelineError};
use crate::types::{Commit, CommitAnalysis};

#[derive(Debug, Deserialize)]
struct RawAnalysis {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    epic: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    idea: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<RawAnalysis> for CommitAnalysis {
    fn from(raw: RawAnalysis) -> Self {
        CommitAnalysis {
            kind: raw.kind.unwrap_or_default(),
            epic: raw.epic,
            title: raw.title,
            idea: raw.idea,
            description: raw.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawCommit {
    sha: String,
    author: String,
    author_url: String,
    date: String,
    message: String,
    #[serde(default)]
    description: Option<String>,
    url: String,
    #[serde(default)]
    analyses: Option<Vec<RawAnalysis>>,
    #[serde(default)]
    commit_analyses: Option<Vec<RawAnalysis>>,
}

impl RawCommit {
    fn into_commit(self) -> Result<Commit> {
        let date = parse_date(&self.date).ok_or_else(|| TimelineError::InvalidDate {
            sha: self.sha.clone(),
            value: self.date.clone(),
        })?;
        let analyses = self
            .analyses
            .or(self.commit_analyses)
            .unwrap_or_default()
            .into_iter()
            .map(CommitAnalysis::from)
            .collect();

        Ok(Commit {
            sha: self.sha,
            author: self.author,
            author_url: self.author_url,
            date,
            message: self.message,
            description: self.description,
            url: self.url,
            analyses,
        })
    }
}

/// Parse an ISO-8601 timestamp. Values without an offset are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse a JSON array of commit records into normalised commits.
///
/// Later records repeating an already-seen SHA are dropped.
pub fn parse_commits(json: &str) -> Result<Vec<Commit>> {
    let raw: Vec<RawCommit> = serde_json::from_str(json)?;
    let mut seen = HashSet::with_capacity(raw.len());
    let mut commits = Vec::with_capacity(raw.len());

    for record in raw {
        if !seen.insert(record.sha.clone()) {
            tracing::warn!("Skipping duplicate commit {}", record.sha);
            continue;
        }
        commits.push(record.into_commit()?);
    }

    tracing::debug!("Parsed {} commits", commits.len());
    Ok(commits)
}

pub fn read_commits(path: &Path) -> Result<Vec<Commit>> {
    let json = std::fs::read_to_string(path)?;
    parse_commits(&json)
}
