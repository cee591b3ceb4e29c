pub mod chart;
pub mod model;
pub mod view;

pub use view::StatsView;
