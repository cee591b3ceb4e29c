use std::sync::OnceLock;

use crate::components::period::PeriodPreset;

/// `localStorage` key that pins the admin API base URL
pub const API_BASE_OVERRIDE_KEY: &str = "gateway-console.api-base";

const DEV_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleConfig {
    /// Admin API origin; empty means same origin
    pub api_base: String,
    /// Rows per trace list page
    pub trace_page_size: u32,
    /// Numbered pagination buttons shown at most
    pub max_page_buttons: u32,
    /// Window every view starts with
    pub default_preset: PeriodPreset,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            trace_page_size: 20,
            max_page_buttons: 10,
            default_preset: PeriodPreset::Hours24,
        }
    }
}

impl ConsoleConfig {
    /// Resolve from the browser location and the optional stored override.
    fn from_browser() -> Self {
        let window = web_sys::window();
        let hostname = window
            .as_ref()
            .and_then(|w| w.location().hostname().ok())
            .unwrap_or_default();
        let stored = window
            .as_ref()
            .and_then(|w| w.local_storage().ok().flatten())
            .and_then(|storage| storage.get_item(API_BASE_OVERRIDE_KEY).ok().flatten());

        Self {
            api_base: resolve_api_base(&hostname, stored.as_deref()),
            ..Self::default()
        }
    }
}

/// - explicit override wins (trailing slash dropped)
/// - in development (localhost): the admin server on port 8080
/// - in production: same origin (the admin server serves the bundle)
pub fn resolve_api_base(hostname: &str, stored_override: Option<&str>) -> String {
    if let Some(base) = stored_override
        .map(str::trim)
        .filter(|value| !value.is_empty())
    {
        return base.trim_end_matches('/').to_string();
    }
    if hostname == "localhost" || hostname == "127.0.0.1" {
        DEV_API_BASE.to_string()
    } else {
        String::new()
    }
}

static CONFIG: OnceLock<ConsoleConfig> = OnceLock::new();

/// Computed at first use
pub fn config() -> &'static ConsoleConfig {
    CONFIG.get_or_init(ConsoleConfig::from_browser)
}

pub fn api_base() -> &'static str {
    config().api_base.as_str()
}
