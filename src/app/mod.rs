mod state;

pub use state::TimelineState;
