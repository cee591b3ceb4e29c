pub mod layout;
pub mod list;
pub mod pretty;
pub mod view;

pub use view::TracesView;
