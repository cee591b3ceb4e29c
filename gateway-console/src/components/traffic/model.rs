use std::collections::HashSet;

use dioxus_logger::tracing::{error, warn};
use shared_types::{ServiceEdge, ServiceGraph, ServiceNode, ThroughputStats};

use crate::api::ApiError;
use crate::format::{
    format_avg_per_minute, format_max_per_minute, format_ms, format_rate, format_requests,
    round_one_decimal,
};
use crate::lifecycle::RenderSlot;
use crate::severity::{classify, Severity};

use super::layout::{build_scene, GraphScene};

// ── Graph model ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub name: String,
    pub data: ServiceNode,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    /// `source->target`
    pub key: String,
    pub source: String,
    pub target: String,
    pub data: ServiceEdge,
    pub severity: Severity,
}

impl GraphEdge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }

    /// Request count, then the error rate only when there are errors.
    pub fn label_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("{} req", self.data.request_count)];
        if self.data.error_rate > 0.0 {
            lines.push(format!(
                "(err {:.1}%)",
                round_one_decimal(self.data.error_rate)
            ));
        }
        lines
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GraphModel {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphModel {
    /// `None` for a graph without nodes. Duplicate node names and duplicate
    /// `(source, target)` pairs keep their first occurrence; edges touching
    /// unknown nodes are dropped. Keys stay unique even when two pairs render
    /// to the same `source->target` text.
    pub fn build(graph: &ServiceGraph) -> Option<Self> {
        let mut names = HashSet::new();
        let nodes: Vec<GraphNode> = graph
            .nodes
            .iter()
            .filter(|node| names.insert(node.name.clone()))
            .map(|node| GraphNode {
                name: node.name.clone(),
                data: node.clone(),
                severity: classify(node.error_rate),
            })
            .collect();
        if nodes.is_empty() {
            return None;
        }

        let mut pairs = HashSet::new();
        let mut keys = HashSet::new();
        let mut edges = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            if !names.contains(&edge.source) || !names.contains(&edge.target) {
                warn!("Dropping edge {} with unknown endpoint", edge.key());
                continue;
            }
            if !pairs.insert((edge.source.as_str(), edge.target.as_str())) {
                warn!("Dropping duplicate edge {}", edge.key());
                continue;
            }
            let mut key = edge.key();
            if keys.contains(&key) {
                key = format!("{}#{}", key, edges.len());
            }
            keys.insert(key.clone());
            edges.push(GraphEdge {
                key,
                source: edge.source.clone(),
                target: edge.target.clone(),
                data: edge.clone(),
                severity: classify(edge.error_rate),
            });
        }

        Some(Self { nodes, edges })
    }

    pub fn node(&self, name: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.name == name)
    }

    pub fn edge(&self, key: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|edge| edge.key == key)
    }
}

// ── Detail panel ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Placeholder,
    Node(String),
    Edge(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub label: &'static str,
    pub value: String,
    /// Severity emphasis, only on error-rate rows
    pub class: Option<&'static str>,
}

impl PanelRow {
    fn plain(label: &'static str, value: String) -> Self {
        Self {
            label,
            value,
            class: None,
        }
    }

    fn rate(rate: f64) -> Self {
        Self {
            label: "Error Rate",
            value: format_rate(Some(rate)),
            class: Some(classify(rate).text_class()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PanelView {
    pub title: String,
    pub rows: Vec<PanelRow>,
}

pub const PANEL_PLACEHOLDER_TITLE: &str = "Details";

fn node_panel(node: &GraphNode) -> PanelView {
    PanelView {
        title: node.name.clone(),
        rows: vec![
            PanelRow::plain("Service", node.name.clone()),
            PanelRow::plain(
                "Requests (inbound)",
                format_requests(node.data.request_count),
            ),
            PanelRow::rate(node.data.error_rate),
            PanelRow::plain("Avg Response", format_ms(node.data.avg_duration)),
        ],
    }
}

fn edge_panel(edge: &GraphEdge) -> PanelView {
    PanelView {
        title: format!("{} \u{2192} {}", edge.source, edge.target),
        rows: vec![
            PanelRow::plain("Source", edge.source.clone()),
            PanelRow::plain("Target", edge.target.clone()),
            PanelRow::plain("Requests", format_requests(edge.data.request_count)),
            PanelRow::rate(edge.data.error_rate),
            PanelRow::plain("P50", format_ms(edge.data.p50)),
            PanelRow::plain("P99", format_ms(edge.data.p99)),
        ],
    }
}

// ── Summary ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryFigures {
    pub total: String,
    pub avg_per_minute: String,
    pub max_per_minute: String,
}

impl Default for SummaryFigures {
    fn default() -> Self {
        Self {
            total: "-".to_string(),
            avg_per_minute: "-".to_string(),
            max_per_minute: "-".to_string(),
        }
    }
}

impl SummaryFigures {
    pub fn from_stats(stats: &ThroughputStats) -> Self {
        Self {
            total: format_requests(stats.total_requests),
            avg_per_minute: format_avg_per_minute(stats.avg_per_minute),
            max_per_minute: format_max_per_minute(stats.max_per_minute),
        }
    }
}

// ── Traffic model ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum GraphState {
    Loading,
    Failed,
    Empty,
    Loaded(GraphModel),
}

/// Everything one traffic view owns: fetched graph, summary, panel selection
/// and the single mounted graph scene.
#[derive(Debug)]
pub struct TrafficModel {
    pub graph: GraphState,
    pub summary: SummaryFigures,
    pub panel: PanelState,
    pub scene: RenderSlot<GraphScene>,
}

impl Default for TrafficModel {
    fn default() -> Self {
        Self {
            graph: GraphState::Loading,
            summary: SummaryFigures::default(),
            panel: PanelState::Placeholder,
            scene: RenderSlot::new(),
        }
    }
}

impl TrafficModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload resets summary and panel and releases the previous scene.
    pub fn begin_load(&mut self) {
        self.graph = GraphState::Loading;
        self.summary = SummaryFigures::default();
        self.panel = PanelState::Placeholder;
        self.scene.clear();
    }

    pub fn apply_fetch(&mut self, result: Result<(ServiceGraph, ThroughputStats), ApiError>) {
        let (graph, stats) = match result {
            Ok(pair) => pair,
            Err(err) => {
                error!("Failed to load traffic graph: {}", err);
                self.graph = GraphState::Failed;
                self.scene.clear();
                return;
            }
        };

        let summary = SummaryFigures::from_stats(&stats);
        match GraphModel::build(&graph) {
            Some(model) => {
                let scene = build_scene(&model);
                self.summary = summary;
                self.graph = GraphState::Loaded(model);
                self.scene.mount(scene);
            }
            None => {
                self.summary = summary;
                self.graph = GraphState::Empty;
                self.scene.clear();
            }
        }
        self.panel = PanelState::Placeholder;
    }

    fn model(&self) -> Option<&GraphModel> {
        match &self.graph {
            GraphState::Loaded(model) => Some(model),
            _ => None,
        }
    }

    pub fn tap_node(&mut self, name: &str) {
        if self.model().and_then(|m| m.node(name)).is_some() {
            self.panel = PanelState::Node(name.to_string());
        }
    }

    pub fn tap_edge(&mut self, key: &str) {
        if self.model().and_then(|m| m.edge(key)).is_some() {
            self.panel = PanelState::Edge(key.to_string());
        }
    }

    pub fn tap_background(&mut self) {
        self.panel = PanelState::Placeholder;
    }

    pub fn panel_view(&self) -> Option<PanelView> {
        let model = self.model()?;
        match &self.panel {
            PanelState::Placeholder => None,
            PanelState::Node(name) => model.node(name).map(node_panel),
            PanelState::Edge(key) => model.edge(key).map(edge_panel),
        }
    }
}
