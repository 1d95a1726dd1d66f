use crate::timeline::TimeInterval;
use crate::types::{Commit, TimeScale};

/// Count commits per timeline column.
///
/// Column `i` spans `[start_i, start_{i+1})`; the last column extends one scale unit.
/// Commits before the first column are not counted.
pub fn interval_counts(commits: &[Commit], intervals: &[TimeInterval], scale: TimeScale) -> Vec<usize> {
    let mut counts = vec![0; intervals.len()];
    let Some(last) = intervals.last() else {
        return counts;
    };
    let last_end = scale.add(last.start, 1);

    for commit in commits {
        if commit.date >= last_end {
            continue;
        }
        let idx = intervals.partition_point(|interval| interval.start <= commit.date);
        if idx > 0 {
            counts[idx - 1] += 1;
        }
    }
    counts
}

/// Merge adjacent columns so that at most `target_points` remain.
pub fn aggregate_columns(data: &[(String, usize)], target_points: usize) -> Vec<(String, usize)> {
    if data.len() <= target_points || target_points == 0 {
        return data.to_vec();
    }

    let window_size = (data.len() as f64 / target_points as f64).ceil() as usize;
    data.chunks(window_size)
        .map(|chunk| {
            let label = chunk[0].0.clone(); // Use first label in chunk
            let total: usize = chunk.iter().map(|(_, count)| *count).sum();
            (label, total)
        })
        .collect()
}
