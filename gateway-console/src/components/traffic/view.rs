use dioxus::prelude::*;
use dioxus_logger::tracing::debug;
use futures_util::future::join;

use crate::api::{fetch_service_graph, fetch_throughput};
use crate::components::period::{PeriodSelection, PeriodSelector};
use crate::config::config;
use crate::lifecycle::RequestTracker;
use crate::severity::Severity;
use crate::time_codec::{now_local, WireRange};

use super::layout::{GraphScene, NODE_RADIUS};
use super::model::{GraphState, PanelState, TrafficModel, PANEL_PLACEHOLDER_TITLE};

const NODE_FILL: &str = "#4361ee";
const NODE_BORDER: &str = "#1a1a2e";
const SELECTED: &str = "#ffc107";

fn load_traffic(window: WireRange, mut traffic: Signal<TrafficModel>, tracker: RequestTracker) {
    let ticket = tracker.issue();
    traffic.write().begin_load();
    spawn(async move {
        let (graph, throughput) =
            join(fetch_service_graph(&window), fetch_throughput(&window)).await;
        if !tracker.is_current(ticket) {
            debug!("Discarding stale traffic response for {}..{}", window.from, window.to);
            return;
        }
        let result = graph.and_then(|graph| throughput.map(|stats| (graph, stats)));
        traffic.write().apply_fetch(result);
    });
}

#[component]
pub fn TrafficView() -> Element {
    let (initial_selection, initial_window) =
        use_hook(|| PeriodSelection::initial(config().default_preset, now_local()));
    let traffic = use_signal(TrafficModel::new);
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
            load_traffic(initial_window.clone(), traffic, tracker.clone());
        });
    }

    let on_apply = {
        let tracker = tracker.clone();
        move |window: WireRange| load_traffic(window, traffic, tracker.clone())
    };

    let summary = traffic.read().summary.clone();

    rsx! {
        div {
            class: "console-page traffic-page",
            PeriodSelector { initial: initial_selection, on_apply }
            div {
                class: "card traffic-summary",
                div {
                    class: "summary-stats",
                    SummaryStat { value: summary.total, label: "Total Requests" }
                    SummaryStat { value: summary.avg_per_minute, label: "Avg Throughput" }
                    SummaryStat { value: summary.max_per_minute, label: "Peak Throughput" }
                }
            }
            div {
                class: "traffic-layout",
                div {
                    class: "traffic-graph-card card",
                    div {
                        class: "card-header-row",
                        div { class: "card-title", "Service Traffic Graph" }
                        Legend {}
                    }
                    div {
                        class: "traffic-hint",
                        "Click a node or edge to see its details. Numbers on edges are request counts."
                    }
                    GraphCanvas { traffic }
                }
                DetailPanel { traffic }
            }
        }
    }
}

#[component]
fn SummaryStat(value: String, label: &'static str) -> Element {
    rsx! {
        div {
            class: "summary-stat",
            div { class: "summary-val", "{value}" }
            div { class: "summary-key", "{label}" }
        }
    }
}

#[component]
fn Legend() -> Element {
    rsx! {
        div {
            class: "traffic-legend",
            for severity in [Severity::Ok, Severity::Warn, Severity::Error] {
                span {
                    class: "legend-item",
                    span { class: "legend-dot", style: "background:{severity.color()}" }
                    "{severity.legend()}"
                }
            }
        }
    }
}

#[component]
fn GraphCanvas(traffic: Signal<TrafficModel>) -> Element {
    let view = traffic.read();

    let body = match &view.graph {
        GraphState::Loading => rsx! {
            div { class: "cy-container", div { class: "loading", "Loading..." } }
        },
        GraphState::Failed => rsx! {
            div { class: "cy-container", div { class: "empty-state", "Failed to load graph" } }
        },
        GraphState::Empty => rsx! {
            div { class: "cy-container", div { class: "empty-state", "No traffic data for this period" } }
        },
        GraphState::Loaded(_) => match view.scene.current() {
            Some(scene) => rsx! {
                div {
                    key: "{view.scene.element_key()}",
                    class: "cy-container",
                    GraphSceneView { scene: scene.clone(), panel: view.panel.clone(), traffic }
                }
            },
            None => rsx! {},
        },
    };
    body
}

#[component]
fn GraphSceneView(scene: GraphScene, panel: PanelState, traffic: Signal<TrafficModel>) -> Element {
    let mut traffic = traffic;
    let selected_node = match &panel {
        PanelState::Node(name) => Some(name.clone()),
        _ => None,
    };
    let selected_edge = match &panel {
        PanelState::Edge(key) => Some(key.clone()),
        _ => None,
    };

    rsx! {
        svg {
            class: "traffic-graph",
            view_box: "{scene.view_box()}",
            width: "100%",
            height: format!("{:.0}", scene.height),
            rect {
                x: "0",
                y: "0",
                width: format!("{:.0}", scene.width),
                height: format!("{:.0}", scene.height),
                fill: "transparent",
                onclick: move |_| traffic.write().tap_background(),
            }
            for edge in scene.edges.iter() {
                g {
                    key: "{edge.key}",
                    class: "graph-edge",
                    onclick: {
                        let key = edge.key.clone();
                        move |e: MouseEvent| {
                            e.stop_propagation();
                            traffic.write().tap_edge(&key);
                        }
                    },
                    // Wide transparent stroke as the hit area.
                    path {
                        d: "{edge.path}",
                        stroke: "transparent",
                        stroke_width: "12",
                        fill: "none",
                    }
                    path {
                        d: "{edge.path}",
                        stroke: if selected_edge.as_deref() == Some(edge.key.as_str()) { SELECTED } else { edge.color },
                        stroke_width: "3",
                        fill: "none",
                    }
                    polygon {
                        points: "{edge.arrow}",
                        fill: if selected_edge.as_deref() == Some(edge.key.as_str()) { SELECTED } else { edge.color },
                    }
                    text {
                        x: format!("{:.1}", edge.label_x),
                        y: format!("{:.1}", edge.label_y),
                        text_anchor: "middle",
                        font_size: "11",
                        fill: "#333",
                        class: "graph-edge-label",
                        for (line_idx, line) in edge.label_lines.iter().enumerate() {
                            tspan {
                                x: format!("{:.1}", edge.label_x),
                                dy: if line_idx == 0 { "0" } else { "1.2em" },
                                "{line}"
                            }
                        }
                    }
                }
            }
            for node in scene.nodes.iter() {
                g {
                    key: "{node.name}",
                    class: "graph-node",
                    onclick: {
                        let name = node.name.clone();
                        move |e: MouseEvent| {
                            e.stop_propagation();
                            traffic.write().tap_node(&name);
                        }
                    },
                    circle {
                        cx: format!("{:.1}", node.cx),
                        cy: format!("{:.1}", node.cy),
                        r: "{NODE_RADIUS}",
                        fill: NODE_FILL,
                        stroke: if selected_node.as_deref() == Some(node.name.as_str()) { SELECTED } else { NODE_BORDER },
                        stroke_width: if selected_node.as_deref() == Some(node.name.as_str()) { "3" } else { "2" },
                    }
                    text {
                        x: format!("{:.1}", node.cx),
                        y: format!("{:.1}", node.cy),
                        text_anchor: "middle",
                        dominant_baseline: "central",
                        font_size: "13",
                        font_weight: "600",
                        fill: "#fff",
                        "{node.name}"
                    }
                }
            }
        }
    }
}

#[component]
fn DetailPanel(traffic: Signal<TrafficModel>) -> Element {
    let panel = traffic.read().panel_view();

    let body = match panel {
        Some(view) => rsx! {
            div { class: "card-title", "{view.title}" }
            for row in view.rows {
                div {
                    key: "{row.label}",
                    class: "panel-row",
                    span { class: "panel-label", "{row.label}" }
                    span { class: row.class.unwrap_or_default(), "{row.value}" }
                }
            }
        },
        None => rsx! {
            div { class: "card-title", "{PANEL_PLACEHOLDER_TITLE}" }
            div { class: "panel-placeholder", "Click a node or edge" }
        },
    };

    rsx! {
        div {
            class: "traffic-panel card",
            {body}
        }
    }
}
