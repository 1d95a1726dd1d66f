mod cache;
pub mod clustering;
pub mod git;
pub mod grouping;
pub mod ingest;

#[cfg(test)]
mod tests;

pub use cache::{cache_key, LayoutCache};
pub use clustering::{cluster_commits, dominant_type, Cluster};
pub use git::{default_branch_first, get_available_branches, load_commits_async};
pub use grouping::{group_commits, Lane};
pub use ingest::{parse_commits, read_commits};
