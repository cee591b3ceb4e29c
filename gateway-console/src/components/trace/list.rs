use dioxus::prelude::*;
use dioxus_logger::tracing::{debug, error};
use shared_types::TracePage;

use crate::api::{fetch_trace_page, ApiError, TraceListQuery};
use crate::components::period::{PeriodSelection, PeriodSelector};
use crate::config::config;
use crate::lifecycle::RequestTracker;
use crate::time_codec::{display, WireRange};

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Zero-based
    pub current: u32,
    /// At least 1
    pub total: u32,
}

impl Pagination {
    pub fn new(current: u32, total: u32) -> Self {
        Self {
            current,
            total: total.max(1),
        }
    }

    /// Numbered buttons, always counted from the first page
    pub fn buttons(&self, max_buttons: u32) -> std::ops::Range<u32> {
        0..self.total.min(max_buttons)
    }

    pub fn prev(&self) -> Option<u32> {
        self.current.checked_sub(1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.current + 1 < self.total).then_some(self.current + 1)
    }
}

// ── List model ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TraceRow {
    pub tx_id: String,
    /// `YYYY-MM-DD HH:MM:SS` or `-`
    pub req_time: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraceListState {
    Loading,
    Failed,
    Empty,
    Loaded {
        rows: Vec<TraceRow>,
        pagination: Pagination,
    },
}

impl TraceListState {
    pub fn from_fetch(page: u32, result: Result<TracePage, ApiError>) -> Self {
        match result {
            Ok(data) if data.content.is_empty() => Self::Empty,
            Ok(data) => {
                let rows = data
                    .content
                    .iter()
                    .map(|entry| TraceRow {
                        tx_id: entry.tx_id().to_string(),
                        req_time: display(entry.req_time()),
                    })
                    .collect();
                Self::Loaded {
                    rows,
                    pagination: Pagination::new(page, data.total_pages()),
                }
            }
            Err(err) => {
                error!("Failed to load traces: {}", err);
                Self::Failed
            }
        }
    }
}

/// Window, page and filters of the list; changing anything but the page
/// starts again from page 0.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceListParams {
    pub window: WireRange,
    pub page: u32,
    pub path: String,
    pub errors_only: bool,
}

impl TraceListParams {
    pub fn new(window: WireRange) -> Self {
        Self {
            window,
            page: 0,
            path: String::new(),
            errors_only: false,
        }
    }

    pub fn with_window(&self, window: WireRange) -> Self {
        Self {
            window,
            page: 0,
            ..self.clone()
        }
    }

    pub fn with_filters(&self, path: &str, errors_only: bool) -> Self {
        Self {
            page: 0,
            path: path.trim().to_string(),
            errors_only,
            ..self.clone()
        }
    }

    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    pub fn query(&self, size: u32) -> TraceListQuery {
        TraceListQuery {
            window: self.window.clone(),
            page: self.page,
            size,
            path: self.path.clone(),
            errors_only: self.errors_only,
        }
    }
}

fn load_traces(
    params: TraceListParams,
    mut current: Signal<TraceListParams>,
    mut state: Signal<TraceListState>,
    tracker: RequestTracker,
) {
    let ticket = tracker.issue();
    let query = params.query(config().trace_page_size);
    current.set(params);
    state.set(TraceListState::Loading);
    spawn(async move {
        let result = fetch_trace_page(&query).await;
        if !tracker.is_current(ticket) {
            debug!("Discarding stale trace page {}", query.page);
            return;
        }
        state.set(TraceListState::from_fetch(query.page, result));
    });
}

// ── TraceList component ──────────────────────────────────────────────────────

#[component]
pub fn TraceList(on_select: EventHandler<String>) -> Element {
    let (initial_selection, initial_window) =
        use_hook(|| PeriodSelection::initial(config().default_preset, crate::time_codec::now_local()));
    let params = use_signal(|| TraceListParams::new(initial_window.clone()));
    let state = use_signal(|| TraceListState::Loading);
    let mut path_input = use_signal(String::new);
    let mut errors_only = use_signal(|| false);
    let tracker = use_hook(RequestTracker::new);
    let mut started = use_signal(|| false);

    {
        let tracker = tracker.clone();
        use_drop(move || tracker.abandon());
    }

    {
        let tracker = tracker.clone();
        use_effect(move || {
            if started() {
                return;
            }
            started.set(true);
            load_traces(params.peek().clone(), params, state, tracker.clone());
        });
    }

    let on_period = {
        let tracker = tracker.clone();
        move |window: WireRange| {
            let next = params.peek().with_window(window);
            load_traces(next, params, state, tracker.clone());
        }
    };

    let apply_filters = {
        let tracker = tracker.clone();
        move |_: MouseEvent| {
            let next = params.peek().with_filters(&path_input(), errors_only());
            load_traces(next, params, state, tracker.clone());
        }
    };

    let go_to_page = {
        let tracker = tracker.clone();
        move |page: u32| {
            let next = params.peek().with_page(page);
            load_traces(next, params, state, tracker.clone());
        }
    };

    let max_buttons = config().max_page_buttons;

    let body = match state() {
        TraceListState::Loading => rsx! {
            div { class: "loading", "Loading..." }
        },
        TraceListState::Failed => rsx! {
            div { class: "empty-state", "Failed to load traces" }
        },
        TraceListState::Empty => rsx! {
            div { class: "empty-state", "No traces found" }
        },
        TraceListState::Loaded { rows, pagination } => rsx! {
            table {
                class: "trace-table",
                thead {
                    tr {
                        th { "Transaction ID" }
                        th { "Req Time" }
                    }
                }
                tbody {
                    for row in rows {
                        tr {
                            key: "{row.tx_id}",
                            class: "trace-row",
                            onclick: {
                                let tx_id = row.tx_id.clone();
                                move |_| on_select.call(tx_id.clone())
                            },
                            td { "{row.tx_id}" }
                            td { "{row.req_time}" }
                        }
                    }
                }
            }
            div {
                class: "pagination",
                button {
                    class: "page-btn",
                    disabled: pagination.prev().is_none(),
                    onclick: {
                        let go_to_page = go_to_page.clone();
                        move |_| {
                            if let Some(page) = pagination.prev() {
                                go_to_page(page);
                            }
                        }
                    },
                    "<"
                }
                for page in pagination.buttons(max_buttons) {
                    button {
                        key: "{page}",
                        class: if page == pagination.current { "page-btn active" } else { "page-btn" },
                        onclick: {
                            let go_to_page = go_to_page.clone();
                            move |_| go_to_page(page)
                        },
                        "{page + 1}"
                    }
                }
                button {
                    class: "page-btn",
                    disabled: pagination.next().is_none(),
                    onclick: {
                        let go_to_page = go_to_page.clone();
                        move |_| {
                            if let Some(page) = pagination.next() {
                                go_to_page(page);
                            }
                        }
                    },
                    ">"
                }
            }
        },
    };

    rsx! {
        div {
            class: "card",
            div { class: "card-title", "Trace List" }
            PeriodSelector { initial: initial_selection, on_apply: on_period }
            div {
                class: "search-bar",
                input {
                    class: "search-input",
                    r#type: "text",
                    placeholder: "Path filter (e.g. /server-a/chain)",
                    value: "{path_input}",
                    oninput: move |e| path_input.set(e.value()),
                }
                select {
                    class: "filter-select",
                    value: if errors_only() { "error" } else { "" },
                    onchange: move |e| errors_only.set(e.value() == "error"),
                    option { value: "", "All Status" }
                    option { value: "error", "Errors Only" }
                }
                button { class: "search-btn", onclick: apply_filters, "Filter" }
            }
            {body}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{PageMeta, TraceListEntry};

    fn window() -> WireRange {
        WireRange {
            from: "2024-06-14T10:00:00.000Z".to_string(),
            to: "2024-06-15T10:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_pagination_buttons_are_capped() {
        let pagination = Pagination::new(0, 37);
        assert_eq!(pagination.buttons(10), 0..10);
        assert_eq!(pagination.prev(), None);
        assert_eq!(pagination.next(), Some(1));

        let last = Pagination::new(2, 3);
        assert_eq!(last.buttons(10), 0..3);
        assert_eq!(last.next(), None);
        assert_eq!(last.prev(), Some(1));
    }

    #[test]
    fn test_zero_total_pages_means_one() {
        let pagination = Pagination::new(0, 0);
        assert_eq!(pagination.total, 1);
        assert_eq!(pagination.next(), None);
    }

    #[test]
    fn test_rows_accept_objects_and_bare_ids() {
        let page = TracePage {
            content: vec![
                TraceListEntry::Summary {
                    tx_id: "tx-1".to_string(),
                    req_time: Some("2024-06-15T09:30:05.123Z".to_string()),
                },
                TraceListEntry::Bare("tx-2".to_string()),
            ],
            page: Some(PageMeta {
                total_pages: Some(4),
                ..Default::default()
            }),
            total_pages: None,
        };
        let state = TraceListState::from_fetch(1, Ok(page));
        let TraceListState::Loaded { rows, pagination } = state else {
            panic!("expected rows");
        };
        assert_eq!(rows[0].req_time, "2024-06-15 09:30:05");
        assert_eq!(rows[1].tx_id, "tx-2");
        assert_eq!(rows[1].req_time, "-");
        assert_eq!(pagination, Pagination::new(1, 4));
    }

    #[test]
    fn test_empty_and_failed_pages() {
        assert_eq!(
            TraceListState::from_fetch(0, Ok(TracePage::default())),
            TraceListState::Empty
        );
        assert_eq!(
            TraceListState::from_fetch(0, Err(ApiError::Decode("eof".into()))),
            TraceListState::Failed
        );
    }

    #[test]
    fn test_window_and_filter_changes_reset_page() {
        let params = TraceListParams::new(window()).with_page(3);
        assert_eq!(params.with_window(window()).page, 0);

        let filtered = params.with_filters("  /orders ", true);
        assert_eq!(filtered.page, 0);
        assert_eq!(filtered.path, "/orders");
        assert!(filtered.errors_only);

        let query = filtered.with_page(2).query(20);
        assert_eq!(query.page, 2);
        assert_eq!(query.size, 20);
        assert_eq!(query.path, "/orders");
    }
}
