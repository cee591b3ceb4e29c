use dioxus::prelude::*;
use dioxus_logger::tracing::debug;

use crate::api::fetch_stats;
use crate::components::period::{PeriodSelection, PeriodSelector};
use crate::config::config;
use crate::format::{format_count, format_ms, format_rate};
use crate::lifecycle::RequestTracker;
use crate::severity::classify;
use crate::time_codec::{now_local, WireRange};

use super::chart::PercentileChartView;
use super::model::{StatColumn, StatsPanel, StatsState};

fn load_stats(window: WireRange, mut panel: Signal<StatsPanel>, tracker: RequestTracker) {
    let ticket = tracker.issue();
    panel.write().begin_load();
    spawn(async move {
        let result = fetch_stats(&window).await;
        if !tracker.is_current(ticket) {
            debug!("Discarding stale stats response for {}..{}", window.from, window.to);
            return;
        }
        panel.write().apply_fetch(result);
    });
}

#[component]
pub fn StatsView() -> Element {
    let (initial_selection, initial_window) =
        use_hook(|| PeriodSelection::initial(config().default_preset, now_local()));
    let panel = use_signal(StatsPanel::new);
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
            load_stats(initial_window.clone(), panel, tracker.clone());
        });
    }

    let on_apply = {
        let tracker = tracker.clone();
        move |window: WireRange| load_stats(window, panel, tracker.clone())
    };

    rsx! {
        div {
            class: "console-page stats-page",
            div {
                class: "page-header",
                h2 { "API Statistics" }
                PeriodSelector { initial: initial_selection, on_apply }
            }
            StatsBody { panel }
        }
    }
}

#[component]
fn StatsBody(panel: Signal<StatsPanel>) -> Element {
    let mut panel = panel;
    let view = panel.read();

    let body = match &view.state {
        StatsState::Loading => rsx! {
            div { class: "loading", "Loading..." }
        },
        StatsState::Failed(message) => rsx! {
            div { class: "empty-state error", "{message}" }
        },
        StatsState::Empty => rsx! {
            div { class: "empty-state", "No data" }
        },
        StatsState::Loaded(table) => {
            let sort = table.sort();
            let selected = table.selected_index();
            let chart = view.chart.current().cloned();
            let chart_key = view.chart.element_key();

            rsx! {
                div {
                    class: "table-wrap",
                    table {
                        class: "stats-table",
                        thead {
                            tr {
                                for column in StatColumn::ALL {
                                    th {
                                        class: if sort.column == column { "sortable sorted" } else { "sortable" },
                                        onclick: move |_| panel.write().sort_by(column),
                                        "{column.label()} {sort.indicator(column)}"
                                    }
                                }
                            }
                        }
                        tbody {
                            for (idx, row) in table.sorted().iter().enumerate() {
                                tr {
                                    key: "{row.path}",
                                    class: if idx == selected { "selected" } else { "" },
                                    onclick: move |_| panel.write().select(idx),
                                    td { class: "path-cell", "{row.path}" }
                                    td { "{format_count(row.count.unwrap_or(0))}" }
                                    td {
                                        class: classify(row.error_rate.unwrap_or(0.0)).text_class(),
                                        "{format_rate(row.error_rate)}"
                                    }
                                    td { "{format_ms(row.avg)}" }
                                    td { "{format_ms(row.min)}" }
                                    td { "{format_ms(row.max)}" }
                                    for value in row.percentiles() {
                                        td { "{format_ms(value)}" }
                                    }
                                }
                            }
                        }
                    }
                }
                if let Some(chart) = chart {
                    div {
                        key: "{chart_key}",
                        class: "chart-slot",
                        PercentileChartView { chart }
                    }
                }
            }
        }
    };
    body
}
