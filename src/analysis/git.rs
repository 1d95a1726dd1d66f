use chrono::{DateTime, Utc};
use git2::{Repository, Sort};
use std::time::Instant;
use tokio::task::spawn_blocking;

use crate::error::{Result, TimelineError};
use crate::types::Commit;

/// Load the commit history of a local repository asynchronously
pub async fn load_commits_async(path: String, branch: String) -> Result<Vec<Commit>> {
    // git2 operations are blocking
    spawn_blocking(move || load_commits(&path, &branch))
        .await
        .map_err(|e| TimelineError::Task(e.to_string()))?
}

/// Local branch names, with `main` (or else `master`) listed first
pub async fn get_available_branches(path: String) -> Result<Vec<String>> {
    spawn_blocking(move || {
        let repo = Repository::open(path)?;
        let names = repo
            .branches(Some(git2::BranchType::Local))?
            .flatten()
            .filter_map(|(branch, _)| branch.name().ok().flatten().map(str::to_string))
            .collect();
        Ok(default_branch_first(names))
    })
    .await
    .map_err(|e| TimelineError::Task(e.to_string()))?
}

/// Sort branch names, then move `main` or `master` to the front.
pub fn default_branch_first(mut names: Vec<String>) -> Vec<String> {
    names.sort();
    let default = names
        .iter()
        .position(|name| name == "main")
        .or_else(|| names.iter().position(|name| name == "master"));
    if let Some(idx) = default {
        let name = names.remove(idx);
        names.insert(0, name);
    }
    names
}

/// Walk `branch` (or HEAD when it does not exist) oldest first.
///
/// Commits come back without analyses; classification happens elsewhere.
pub fn load_commits(path: &str, branch: &str) -> Result<Vec<Commit>> {
    let start_time = Instant::now();
    let repo = Repository::open(path)?;
    let web_url = repo
        .find_remote("origin")
        .ok()
        .and_then(|remote| remote.url().and_then(github_web_url));

    let mut revwalk = repo.revwalk()?;
    revwalk.set_sorting(Sort::TIME | Sort::REVERSE)?;
    match repo.find_branch(branch, git2::BranchType::Local) {
        Ok(branch_ref) => match branch_ref.get().name() {
            Some(name) => revwalk.push_ref(name)?,
            None => revwalk.push_head()?,
        },
        Err(_) => {
            tracing::warn!("Branch {} not found, walking HEAD", branch);
            revwalk.push_head()?;
        }
    }

    let mut commits = Vec::new();
    for oid in revwalk {
        let oid = oid?;
        let commit = repo.find_commit(oid)?;
        let sha = oid.to_string();

        let date = DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0).ok_or_else(|| {
            TimelineError::InvalidDate {
                sha: sha.clone(),
                value: commit.time().seconds().to_string(),
            }
        })?;

        let signature = commit.author();
        let author = signature.name().unwrap_or("Unknown").to_string();
        let author_url = signature
            .email()
            .map(|email| format!("mailto:{email}"))
            .unwrap_or_default();

        let description = commit
            .body()
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .map(str::to_string);

        commits.push(Commit {
            url: web_url
                .as_ref()
                .map(|base| format!("{base}/commit/{sha}"))
                .unwrap_or_default(),
            sha,
            author,
            author_url,
            date,
            message: commit.summary().unwrap_or_default().to_string(),
            description,
            analyses: Vec::new(),
        });
    }

    tracing::info!(
        "Loaded {} commits from {} in {:.2}s",
        commits.len(),
        path,
        start_time.elapsed().as_secs_f64()
    );
    Ok(commits)
}

/// Browser URL for a GitHub remote, for either the SSH or HTTPS form.
pub fn github_web_url(remote: &str) -> Option<String> {
    let path = remote
        .strip_prefix("git@github.com:")
        .or_else(|| remote.strip_prefix("ssh://git@github.com/"))
        .or_else(|| remote.strip_prefix("https://github.com/"))
        .or_else(|| remote.strip_prefix("http://github.com/"))?;
    let path = path.trim_end_matches('/').trim_end_matches(".git");
    if path.is_empty() {
        return None;
    }
    Some(format!("https://github.com/{path}"))
}
