pub mod period;
pub mod policies;
pub mod stats;
pub mod styles;
pub mod trace;
pub mod traffic;

pub use period::PeriodSelector;
pub use policies::PoliciesView;
pub use stats::StatsView;
pub use trace::TracesView;
pub use traffic::TrafficView;
