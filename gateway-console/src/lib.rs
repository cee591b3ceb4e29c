pub mod api;
pub mod components;
pub mod config;
pub mod format;
pub mod lifecycle;
pub mod router;
pub mod severity;
pub mod shell;
pub mod time_codec;

pub use shell::ConsoleShell;
