use dioxus::prelude::*;
use dioxus_logger::tracing::{error, warn};

use crate::components::styles::CONSOLE_STYLES;
use crate::components::{PoliciesView, StatsView, TracesView, TrafficView};
use crate::router::{Router, RouterError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Stats,
    Traces,
    Traffic,
    Policies,
}

impl Page {
    pub const ALL: [Self; 4] = [Self::Stats, Self::Traces, Self::Traffic, Self::Policies];

    pub fn name(self) -> &'static str {
        match self {
            Self::Stats => "stats",
            Self::Traces => "traces",
            Self::Traffic => "traffic",
            Self::Policies => "policies",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Stats => "Stats",
            Self::Traces => "Traces",
            Self::Traffic => "Traffic",
            Self::Policies => "Policies",
        }
    }
}

pub const DEFAULT_PAGE: Page = Page::Stats;

/// Every page registered, started on the stats page.
pub fn build_router() -> Result<Router<Page>, RouterError> {
    let mut router = Router::new();
    for page in Page::ALL {
        router.register(page.name(), page)?;
    }
    router.start(DEFAULT_PAGE.name())?;
    Ok(router)
}

#[component]
pub fn ConsoleShell() -> Element {
    let mut router = use_signal(|| match build_router() {
        Ok(router) => Some(router),
        Err(err) => {
            error!("Failed to start router: {}", err);
            None
        }
    });

    let active = router.read().as_ref().and_then(|r| r.current().copied());

    // Each page owns its state; switching drops the previous page component.
    let page = match active {
        Some(Page::Stats) => rsx! { StatsView {} },
        Some(Page::Traces) => rsx! { TracesView {} },
        Some(Page::Traffic) => rsx! { TrafficView {} },
        Some(Page::Policies) => rsx! { PoliciesView {} },
        None => rsx! {
            div { class: "empty-state error", "Console failed to start" }
        },
    };

    rsx! {
        style { {CONSOLE_STYLES} }
        div {
            class: "console-shell",
            nav {
                class: "console-nav",
                span { class: "console-brand", "Gateway Console" }
                for item in Page::ALL {
                    button {
                        key: "{item.name()}",
                        class: if active == Some(item) { "nav-link active" } else { "nav-link" },
                        onclick: move |_| {
                            if let Some(router) = router.write().as_mut() {
                                if let Err(err) = router.navigate(item.name()) {
                                    warn!("Navigation rejected: {}", err);
                                }
                            }
                        },
                        "{item.label()}"
                    }
                }
            }
            main {
                class: "console-main",
                {page}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::Navigation;

    #[test]
    fn test_router_starts_on_stats_with_all_pages() {
        let router = build_router().unwrap();
        assert_eq!(router.current(), Some(&Page::Stats));
        let names: Vec<&str> = router.names().iter().map(String::as_str).collect();
        assert_eq!(names, vec!["stats", "traces", "traffic", "policies"]);
    }

    #[test]
    fn test_nav_round_trip() {
        let mut router = build_router().unwrap();
        assert_eq!(router.navigate("traffic"), Ok(Navigation::Switched));
        assert_eq!(router.current(), Some(&Page::Traffic));
        assert_eq!(router.name_of(&Page::Traffic), Some("traffic"));
        assert_eq!(router.navigate("traffic"), Ok(Navigation::AlreadyActive));
    }
}
