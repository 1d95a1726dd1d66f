//! Commit Timeline
//!
//! Lays out a repository's commit history as a clustered timeline and prints it.

use anyhow::{Context, Result};
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commit_timeline::analysis::{get_available_branches, read_commits, Cluster};
use commit_timeline::utils::{aggregate_columns, interval_counts};
use commit_timeline::{GroupBy, TimeScale, TimelineConfig, TimelineLayout, TimelineState};

#[derive(Debug, Parser)]
#[command(name = "commit-timeline", version, about)]
#[command(group(ArgGroup::new("source").required(true).args(["commits", "repo"])))]
struct Args {
    /// JSON file of analyzed commit records
    #[arg(long)]
    commits: Option<PathBuf>,

    /// Local repository to read history from
    #[arg(long)]
    repo: Option<String>,

    /// Branch to walk when reading a repository
    #[arg(long, default_value = "main")]
    branch: String,

    /// List the repository's local branches and exit
    #[arg(long, requires = "repo")]
    list_branches: bool,

    /// day, week, month, quarter or year
    #[arg(long)]
    scale: Option<TimeScale>,

    /// type, author, date or epic
    #[arg(long)]
    group_by: Option<GroupBy>,

    /// Commit SHA to highlight (repeatable)
    #[arg(long = "highlight")]
    highlight: Vec<String>,

    /// Configuration file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the layout as JSON
    #[arg(long)]
    json: bool,

    /// Merge header columns beyond this many
    #[arg(long, default_value_t = 24)]
    max_columns: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = TimelineConfig::load(args.config.as_deref()).context("loading configuration")?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut state = TimelineState::new(&config);
    state.set_scale(args.scale.unwrap_or(config.scale));
    state.set_group_by(args.group_by.unwrap_or(config.group_by));

    if let Some(path) = &args.commits {
        let commits = read_commits(path).with_context(|| format!("reading {}", path.display()))?;
        state.update_with_commits(commits);
    } else if let Some(repo) = &args.repo {
        let rt = Runtime::new()?;
        let branches = rt
            .block_on(get_available_branches(repo.clone()))
            .with_context(|| format!("listing branches of {repo}"))?;
        if args.list_branches {
            for branch in &branches {
                println!("{branch}");
            }
            return Ok(());
        }

        let branch = match branches.iter().find(|name| **name == args.branch) {
            Some(name) => name.clone(),
            None => {
                let fallback = branches.first().cloned().unwrap_or_else(|| args.branch.clone());
                tracing::warn!(
                    "Branch {} not found (available: {}), using {}",
                    args.branch,
                    branches.join(", "),
                    fallback
                );
                fallback
            }
        };
        rt.block_on(state.load_repository(repo, &branch))
            .with_context(|| format!("reading history of {repo}"))?;
    }
    state.set_highlighted(args.highlight.iter().cloned());

    let layout = state.layout();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&layout)?);
    } else {
        print_layout(&state, &layout, args.max_columns);
    }
    Ok(())
}

fn print_layout(state: &TimelineState, layout: &TimelineLayout, max_columns: usize) {
    println!(
        "{} commits from {} to {} ({} scale, grouped by {})",
        layout.total_commits(),
        layout.range.start.format("%Y-%m-%d"),
        layout.range.end.format("%Y-%m-%d"),
        layout.scale,
        layout.group_by
    );

    let counts = interval_counts(state.commits(), &layout.intervals, layout.scale);
    let columns: Vec<(String, usize)> = layout
        .intervals
        .iter()
        .zip(counts)
        .map(|(interval, count)| (interval.label.clone(), count))
        .collect();
    for (label, count) in aggregate_columns(&columns, max_columns) {
        println!("  {label:<16} {count:>5}");
    }

    for lane in &layout.lanes {
        println!();
        println!("{} ({} commits)", lane.key, lane.commit_count);
        for cluster in &lane.clusters {
            println!("  {:>3}%  {}", cluster.position, describe(cluster));
        }
    }
}

fn describe(cluster: &Cluster) -> String {
    let mark = if cluster.highlighted > 0 { "*" } else { " " };
    match cluster.single() {
        Some(commit) => format!(
            "{mark} {} {} [{}]",
            commit.sha.chars().take(7).collect::<String>(),
            commit.title(),
            commit.effective_type()
        ),
        None => format!(
            "{mark} {} commits, mostly {}, {} highlighted",
            cluster.len(),
            cluster.dominant_type,
            cluster.highlighted
        ),
    }
}
