use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use shared_types::TraceHop;

use crate::api::fetch_trace_detail;
use crate::format::format_ms;
use crate::lifecycle::RequestTracker;
use crate::severity::classify_status;
use crate::time_codec::display;

use super::layout::{TimelineModel, TraceDetailState};
use super::list::TraceList;
use super::pretty::pretty_format;

fn load_detail(
    tx_id: String,
    include_detail: bool,
    mut detail: Signal<TraceDetailState>,
    tracker: RequestTracker,
) {
    let tx_id = tx_id.trim().to_string();
    if tx_id.is_empty() {
        return;
    }
    let ticket = tracker.issue();
    detail.set(TraceDetailState::Loading);
    spawn(async move {
        let result = fetch_trace_detail(&tx_id, include_detail).await;
        if !tracker.is_current(ticket) {
            debug!("Discarding stale trace response for {}", tx_id);
            return;
        }
        detail.set(TraceDetailState::from_fetch(&tx_id, result));
    });
}

#[component]
pub fn TracesView() -> Element {
    let mut search = use_signal(String::new);
    let mut include_detail = use_signal(|| false);
    let detail = use_signal(|| TraceDetailState::Idle);
    let tracker = use_hook(RequestTracker::new);

    {
        let tracker = tracker.clone();
        use_drop(move || tracker.abandon());
    }

    let run_search = {
        let tracker = tracker.clone();
        move || load_detail(search(), include_detail(), detail, tracker.clone())
    };

    let on_select = {
        let tracker = tracker.clone();
        move |tx_id: String| {
            search.set(tx_id.clone());
            load_detail(tx_id, include_detail(), detail, tracker.clone());
        }
    };

    rsx! {
        div {
            class: "console-page traces-page",
            div {
                class: "search-bar",
                input {
                    class: "search-input",
                    r#type: "text",
                    placeholder: "Enter Transaction ID (txId)",
                    value: "{search}",
                    oninput: move |e| search.set(e.value()),
                    onkeydown: {
                        let run_search = run_search.clone();
                        move |e: KeyboardEvent| {
                            if e.key() == Key::Enter {
                                run_search();
                            }
                        }
                    },
                }
                label {
                    class: "detail-toggle",
                    input {
                        r#type: "checkbox",
                        checked: include_detail(),
                        onchange: move |e| include_detail.set(e.checked()),
                    }
                    "Include Detail (Headers + Body)"
                }
                button {
                    class: "search-btn",
                    onclick: {
                        let run_search = run_search.clone();
                        move |_| run_search()
                    },
                    "Search"
                }
            }
            TraceDetailCard { detail }
            TraceList { on_select }
        }
    }
}

#[component]
fn TraceDetailCard(detail: Signal<TraceDetailState>) -> Element {
    let state = detail();

    match state {
        TraceDetailState::Idle => rsx! {},
        TraceDetailState::Loading => rsx! {
            div { class: "card", div { class: "loading", "Loading..." } }
        },
        TraceDetailState::Loaded(model) => rsx! {
            TraceTimeline { model, detail }
        },
        other => {
            let message = other.message().unwrap_or_default();
            rsx! {
                div { class: "card", div { class: "empty-state", "{message}" } }
            }
        }
    }
}

#[component]
fn TraceTimeline(model: TimelineModel, detail: Signal<TraceDetailState>) -> Element {
    let mut detail = detail;
    let expanded = model.expanded();

    rsx! {
        div {
            class: "card",
            div { class: "card-title", "{model.header()}" }
            div {
                class: "timeline",
                for (idx, row) in model.rows.iter().enumerate() {
                    div {
                        key: "{idx}",
                        div {
                            class: "timeline-hop",
                            onclick: move |_| {
                                if let TraceDetailState::Loaded(model) = &mut *detail.write() {
                                    model.toggle(idx);
                                }
                            },
                            div { class: "timeline-hop-label", "Hop {row.hop.index}" }
                            div {
                                class: "timeline-bar-container",
                                div {
                                    class: row.severity.bar_class(),
                                    style: "{row.geometry.style()}",
                                    "{format_ms(row.hop.duration_ms)}"
                                }
                            }
                            div {
                                class: "timeline-info",
                                StatusBadge { status: row.hop.status }
                            }
                        }
                        if expanded == Some(idx) {
                            HopDetailView { hop: row.hop.clone() }
                        }
                    }
                }
            }
        }
    }
}

#[component]
pub fn StatusBadge(status: i32) -> Element {
    let class = classify_status(status).badge_class();
    rsx! {
        span { class: "{class}", "{status}" }
    }
}

#[component]
fn HopDetailView(hop: TraceHop) -> Element {
    let target = hop.target.clone().unwrap_or_else(|| "-".to_string());
    let path = hop.path.clone().unwrap_or_else(|| "-".to_string());
    let req_time = display(hop.req_time.as_deref());
    let res_time = display(hop.res_time.as_deref());
    let payloads: Vec<(&'static str, String)> = [
        ("Request Headers", hop.request_headers.as_deref()),
        ("Request Body", hop.request_body.as_deref()),
        ("Response Headers", hop.response_headers.as_deref()),
        ("Response Body", hop.response_body.as_deref()),
    ]
    .into_iter()
    .filter_map(|(label, raw)| {
        raw.filter(|text| !text.is_empty())
            .map(|text| (label, pretty_format(text)))
    })
    .collect();

    rsx! {
        div {
            class: "hop-detail",
            div {
                class: "hop-detail-row",
                span { class: "hop-detail-label", "Path" }
                span { "{path}" }
            }
            div {
                class: "hop-detail-row",
                span { class: "hop-detail-label", "Target" }
                span { "{target}" }
            }
            div {
                class: "hop-detail-row",
                span { class: "hop-detail-label", "Status" }
                StatusBadge { status: hop.status }
            }
            div {
                class: "hop-detail-row",
                span { class: "hop-detail-label", "Duration" }
                span { "{format_ms(hop.duration_ms)}" }
            }
            div {
                class: "hop-detail-row",
                span { class: "hop-detail-label", "Req Time" }
                span { "{req_time}" }
            }
            div {
                class: "hop-detail-row",
                span { class: "hop-detail-label", "Res Time" }
                span { "{res_time}" }
            }
            if let Some(error) = hop.error.as_ref().filter(|e| !e.is_empty()) {
                div {
                    class: "hop-detail-row",
                    span { class: "hop-detail-label", "Error" }
                    span { class: "badge badge-error", "{error}" }
                }
            }
            for (label, escaped) in payloads {
                div {
                    key: "{label}",
                    class: "hop-payload",
                    strong { "{label}:" }
                    // Already escaped by pretty_format.
                    div { class: "hop-body", dangerous_inner_html: "{escaped}" }
                }
            }
        }
    }
}
