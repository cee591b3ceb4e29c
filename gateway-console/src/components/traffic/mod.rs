pub mod layout;
pub mod model;
pub mod view;

pub use view::TrafficView;
