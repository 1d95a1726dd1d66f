use super::git::github_web_url;
use super::*;
use git2::{Repository, Signature, Time};
use std::path::Path;
use tempfile::TempDir;

fn commit_file(repo: &Repository, dir: &Path, name: &str, message: &str, when: i64) {
    std::fs::write(dir.join(name), format!("{name}\n")).unwrap();
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();

    let signature = Signature::new("Test User", "test@example.com", &Time::new(when, 0)).unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)
        .unwrap();
}

fn setup_test_repo() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().unwrap();
    let repo = Repository::init(temp_dir.path()).unwrap();

    // 2024-01-01, 2024-01-02 and 2024-06-01, all midnight UTC
    commit_file(&repo, temp_dir.path(), "a.txt", "Initial commit", 1_704_067_200);
    commit_file(
        &repo,
        temp_dir.path(),
        "b.txt",
        "Add b\n\nLonger explanation of b.",
        1_704_153_600,
    );
    commit_file(&repo, temp_dir.path(), "c.txt", "Add c", 1_717_200_000);

    (temp_dir, repo)
}

#[tokio::test]
async fn test_load_commits_oldest_first() {
    let (temp_dir, _repo) = setup_test_repo();
    let commits = load_commits_async(
        temp_dir.path().to_str().unwrap().to_string(),
        "does-not-exist".to_string(),
    )
    .await
    .unwrap();

    assert_eq!(commits.len(), 3);
    let messages: Vec<&str> = commits.iter().map(|c| c.message.as_str()).collect();
    assert_eq!(messages, vec!["Initial commit", "Add b", "Add c"]);
    assert_eq!(commits[1].description.as_deref(), Some("Longer explanation of b."));
    assert_eq!(commits[0].description, None);
    assert_eq!(commits[0].author, "Test User");
    assert_eq!(commits[0].author_url, "mailto:test@example.com");
    assert_eq!(commits[0].date.to_rfc3339(), "2024-01-01T00:00:00+00:00");
    assert!(commits.iter().all(|c| c.analyses.is_empty() && c.url.is_empty()));
}

#[tokio::test]
async fn test_commit_urls_from_github_remote() {
    let (temp_dir, repo) = setup_test_repo();
    repo.remote("origin", "git@github.com:acme/widgets.git").unwrap();

    let commits = load_commits_async(
        temp_dir.path().to_str().unwrap().to_string(),
        "HEAD".to_string(),
    )
    .await
    .unwrap();
    let last = commits.last().unwrap();
    assert_eq!(last.url, format!("https://github.com/acme/widgets/commit/{}", last.sha));
}

#[tokio::test]
async fn test_available_branches_main_first() {
    let (temp_dir, repo) = setup_test_repo();
    let current = repo.head().unwrap().shorthand().unwrap().to_string();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    repo.branch("alpha", &head, false).unwrap();
    repo.branch("zeta", &head, false).unwrap();

    let branches = get_available_branches(temp_dir.path().to_str().unwrap().to_string())
        .await
        .unwrap();
    assert_eq!(branches.len(), 3);
    // The default branch is `main` or `master` depending on git configuration
    assert_eq!(branches[0], current);
    assert_eq!(&branches[1..], ["alpha", "zeta"]);
}

#[test]
fn test_default_branch_first_keeps_rest_sorted() {
    let names = ["zeta", "main", "beta", "alpha"].map(String::from).to_vec();
    assert_eq!(default_branch_first(names), ["main", "alpha", "beta", "zeta"]);

    let names = ["master", "dev", "alpha"].map(String::from).to_vec();
    assert_eq!(default_branch_first(names), ["master", "alpha", "dev"]);

    let names = ["topic", "dev"].map(String::from).to_vec();
    assert_eq!(default_branch_first(names), ["dev", "topic"]);
}

#[tokio::test]
async fn test_missing_repository_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_commits_async(
        temp_dir.path().join("nope").to_str().unwrap().to_string(),
        "main".to_string(),
    )
    .await;
    assert!(matches!(result, Err(crate::error::TimelineError::Git(_))));
}

#[test]
fn test_github_web_url() {
    assert_eq!(
        github_web_url("https://github.com/acme/widgets.git").as_deref(),
        Some("https://github.com/acme/widgets")
    );
    assert_eq!(
        github_web_url("git@github.com:acme/widgets").as_deref(),
        Some("https://github.com/acme/widgets")
    );
    assert_eq!(github_web_url("https://gitlab.com/acme/widgets"), None);
}
