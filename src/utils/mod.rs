pub mod aggregation;

pub use aggregation::{aggregate_columns, interval_counts};
