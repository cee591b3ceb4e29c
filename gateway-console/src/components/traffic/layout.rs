//! Breadth-first directed layout of the service graph.

use std::collections::{HashMap, HashSet, VecDeque};

use super::model::{GraphEdge, GraphModel};

pub const NODE_RADIUS: f32 = 40.0;
const COLUMN_GAP: f32 = 200.0;
const ROW_GAP: f32 = 130.0;
const PADDING: f32 = 30.0;
const ARROW_LENGTH: f32 = 10.0;
const ARROW_HALF_WIDTH: f32 = 5.0;
const PARALLEL_OFFSET: f32 = 8.0;
const SELF_LOOP_RISE: f32 = 70.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub cx: f32,
    pub cy: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneEdge {
    pub key: String,
    /// SVG path data of the edge body
    pub path: String,
    /// Arrowhead polygon points
    pub arrow: String,
    pub label_x: f32,
    pub label_y: f32,
    pub label_lines: Vec<String>,
    pub color: &'static str,
}

/// One constructed graph rendering, owned by a render slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphScene {
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<SceneNode>,
    pub edges: Vec<SceneEdge>,
}

impl GraphScene {
    pub fn view_box(&self) -> String {
        format!("0 0 {:.0} {:.0}", self.width, self.height)
    }

    pub fn node(&self, name: &str) -> Option<&SceneNode> {
        self.nodes.iter().find(|node| node.name == name)
    }
}

/// Column index per node: roots (no inbound edges, else the first node) sit
/// in column 0 and every other node one column right of whoever reached it
/// first. Unreached nodes start a fresh walk from column 0.
pub fn breadth_first_columns(model: &GraphModel) -> Vec<Vec<String>> {
    let mut outgoing: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut has_inbound: HashSet<&str> = HashSet::new();
    for edge in &model.edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
        if edge.source != edge.target {
            has_inbound.insert(edge.target.as_str());
        }
    }

    let mut roots: Vec<&str> = model
        .nodes
        .iter()
        .map(|node| node.name.as_str())
        .filter(|name| !has_inbound.contains(name))
        .collect();
    if roots.is_empty() {
        roots.extend(model.nodes.first().map(|node| node.name.as_str()));
    }

    let mut depth: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::with_capacity(model.nodes.len());
    walk(&roots, &outgoing, &mut depth, &mut order);
    for node in &model.nodes {
        if !depth.contains_key(node.name.as_str()) {
            walk(&[node.name.as_str()], &outgoing, &mut depth, &mut order);
        }
    }

    let column_count = depth.values().copied().max().map_or(0, |max| max + 1);
    let mut columns = vec![Vec::new(); column_count];
    for name in order {
        if let Some(col) = depth.get(name) {
            columns[*col].push(name.to_string());
        }
    }
    columns
}

fn walk<'a>(
    start: &[&'a str],
    outgoing: &HashMap<&'a str, Vec<&'a str>>,
    depth: &mut HashMap<&'a str, usize>,
    order: &mut Vec<&'a str>,
) {
    let mut queue = VecDeque::new();
    for root in start {
        if !depth.contains_key(root) {
            depth.insert(*root, 0);
            order.push(*root);
            queue.push_back(*root);
        }
    }
    while let Some(current) = queue.pop_front() {
        let next_depth = depth.get(current).copied().unwrap_or(0) + 1;
        for target in outgoing.get(current).into_iter().flatten() {
            if !depth.contains_key(target) {
                depth.insert(*target, next_depth);
                order.push(*target);
                queue.push_back(*target);
            }
        }
    }
}

pub fn build_scene(model: &GraphModel) -> GraphScene {
    let columns = breadth_first_columns(model);
    let diameter = NODE_RADIUS * 2.0;

    let max_rows = columns.iter().map(Vec::len).max().unwrap_or(1).max(1);
    let height = PADDING * 2.0
        + max_rows as f32 * diameter
        + max_rows.saturating_sub(1) as f32 * (ROW_GAP - diameter);
    let width = PADDING * 2.0
        + columns.len() as f32 * diameter
        + columns.len().saturating_sub(1) as f32 * (COLUMN_GAP - diameter);
    // Room above the first row for self-loop arcs.
    let top = if model.edges.iter().any(GraphEdge::is_self_loop) {
        SELF_LOOP_RISE
    } else {
        0.0
    };

    let mut nodes = Vec::with_capacity(model.nodes.len());
    for (col_idx, column) in columns.iter().enumerate() {
        let cx = PADDING + NODE_RADIUS + col_idx as f32 * COLUMN_GAP;
        let col_height = column.len() as f32 * diameter
            + column.len().saturating_sub(1) as f32 * (ROW_GAP - diameter);
        let start_y = top + (height - col_height) / 2.0;
        for (row_idx, name) in column.iter().enumerate() {
            nodes.push(SceneNode {
                name: name.clone(),
                cx,
                cy: start_y + NODE_RADIUS + row_idx as f32 * ROW_GAP,
            });
        }
    }

    let positions: HashMap<&str, (f32, f32)> = nodes
        .iter()
        .map(|node| (node.name.as_str(), (node.cx, node.cy)))
        .collect();
    let pairs: HashSet<(&str, &str)> = model
        .edges
        .iter()
        .map(|edge| (edge.source.as_str(), edge.target.as_str()))
        .collect();

    let edges = model
        .edges
        .iter()
        .filter_map(|edge| {
            let from = positions.get(edge.source.as_str())?;
            let to = positions.get(edge.target.as_str())?;
            let geometry = if edge.is_self_loop() {
                self_loop(*from)
            } else {
                let reverse = (edge.target.as_str(), edge.source.as_str());
                let offset = if pairs.contains(&reverse) {
                    PARALLEL_OFFSET
                } else {
                    0.0
                };
                straight(*from, *to, offset)
            };
            Some(SceneEdge {
                key: edge.key.clone(),
                path: geometry.path,
                arrow: geometry.arrow,
                label_x: geometry.label.0,
                label_y: geometry.label.1,
                label_lines: edge.label_lines(),
                color: edge.severity.color(),
            })
        })
        .collect();

    GraphScene {
        width,
        height: height + top,
        nodes,
        edges,
    }
}

struct EdgeGeometry {
    path: String,
    arrow: String,
    label: (f32, f32),
}

fn arrow_head(tip: (f32, f32), dir: (f32, f32)) -> String {
    let base = (tip.0 - dir.0 * ARROW_LENGTH, tip.1 - dir.1 * ARROW_LENGTH);
    let normal = (-dir.1, dir.0);
    format!(
        "{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}",
        tip.0,
        tip.1,
        base.0 + normal.0 * ARROW_HALF_WIDTH,
        base.1 + normal.1 * ARROW_HALF_WIDTH,
        base.0 - normal.0 * ARROW_HALF_WIDTH,
        base.1 - normal.1 * ARROW_HALF_WIDTH,
    )
}

fn unit(dx: f32, dy: f32) -> (f32, f32) {
    let len = (dx * dx + dy * dy).sqrt();
    if len < f32::EPSILON {
        (1.0, 0.0)
    } else {
        (dx / len, dy / len)
    }
}

/// Rim-to-rim segment, shifted sideways by `offset` so opposing edges of a
/// pair do not overlap.
fn straight(from: (f32, f32), to: (f32, f32), offset: f32) -> EdgeGeometry {
    let dir = unit(to.0 - from.0, to.1 - from.1);
    let normal = (-dir.1, dir.0);
    let shift = (normal.0 * offset, normal.1 * offset);

    let start = (
        from.0 + dir.0 * NODE_RADIUS + shift.0,
        from.1 + dir.1 * NODE_RADIUS + shift.1,
    );
    let tip = (
        to.0 - dir.0 * NODE_RADIUS + shift.0,
        to.1 - dir.1 * NODE_RADIUS + shift.1,
    );
    let end = (tip.0 - dir.0 * ARROW_LENGTH, tip.1 - dir.1 * ARROW_LENGTH);

    EdgeGeometry {
        path: format!(
            "M {:.1} {:.1} L {:.1} {:.1}",
            start.0, start.1, end.0, end.1
        ),
        arrow: arrow_head(tip, dir),
        label: ((start.0 + tip.0) / 2.0, (start.1 + tip.1) / 2.0),
    }
}

/// Arc leaving the top-left of the node and re-entering at the top-right.
fn self_loop(center: (f32, f32)) -> EdgeGeometry {
    let (cx, cy) = center;
    let spread = NODE_RADIUS * 0.6;
    let rim_y = cy - (NODE_RADIUS * NODE_RADIUS - spread * spread).sqrt();
    let start = (cx - spread, rim_y);
    let tip = (cx + spread, rim_y);
    let control_a = (cx - spread * 2.0, rim_y - SELF_LOOP_RISE);
    let control_b = (cx + spread * 2.0, rim_y - SELF_LOOP_RISE);
    let dir = unit(tip.0 - control_b.0, tip.1 - control_b.1);
    let end = (tip.0 - dir.0 * ARROW_LENGTH, tip.1 - dir.1 * ARROW_LENGTH);

    EdgeGeometry {
        path: format!(
            "M {:.1} {:.1} C {:.1} {:.1}, {:.1} {:.1}, {:.1} {:.1}",
            start.0, start.1, control_a.0, control_a.1, control_b.0, control_b.1, end.0, end.1
        ),
        arrow: arrow_head(tip, dir),
        label: (cx, rim_y - SELF_LOOP_RISE * 0.75),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::traffic::model::GraphModel;
    use shared_types::{ServiceEdge, ServiceGraph, ServiceNode};

    fn make_node(name: &str) -> ServiceNode {
        ServiceNode {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn make_edge(source: &str, target: &str) -> ServiceEdge {
        ServiceEdge {
            source: source.to_string(),
            target: target.to_string(),
            request_count: 10,
            ..Default::default()
        }
    }

    fn model(nodes: &[&str], edges: &[(&str, &str)]) -> GraphModel {
        GraphModel::build(&ServiceGraph {
            nodes: nodes.iter().map(|n| make_node(n)).collect(),
            edges: edges.iter().map(|(s, t)| make_edge(s, t)).collect(),
        })
        .expect("graph has nodes")
    }

    #[test]
    fn test_chain_is_laid_out_left_to_right() {
        let graph = model(
            &["gateway", "orders", "billing", "inventory"],
            &[("gateway", "orders"), ("orders", "billing"), ("orders", "inventory")],
        );
        let columns = breadth_first_columns(&graph);
        assert_eq!(
            columns,
            vec![
                vec!["gateway".to_string()],
                vec!["orders".to_string()],
                vec!["billing".to_string(), "inventory".to_string()],
            ]
        );

        let scene = build_scene(&graph);
        let gateway = scene.node("gateway").unwrap();
        let billing = scene.node("billing").unwrap();
        assert!(gateway.cx < billing.cx);
        assert_eq!(scene.edges.len(), 3);
    }

    #[test]
    fn test_cycle_without_roots_starts_at_first_node() {
        let graph = model(&["a", "b", "c"], &[("b", "c"), ("c", "a"), ("a", "b")]);
        let columns = breadth_first_columns(&graph);
        assert_eq!(columns[0], vec!["a".to_string()]);
        assert_eq!(columns[1], vec!["b".to_string()]);
        assert_eq!(columns[2], vec!["c".to_string()]);
    }

    #[test]
    fn test_unreached_nodes_are_still_placed() {
        // "x" sits on a cycle with no root while "a" is a proper root.
        let graph = model(&["a", "x", "y"], &[("x", "y"), ("y", "x")]);
        let columns = breadth_first_columns(&graph);
        let placed: usize = columns.iter().map(Vec::len).sum();
        assert_eq!(placed, 3);
        let scene = build_scene(&graph);
        assert!(scene.node("x").is_some() && scene.node("y").is_some());
    }

    #[test]
    fn test_self_loop_gets_headroom_and_curve() {
        let graph = model(&["a"], &[("a", "a")]);
        let scene = build_scene(&graph);
        assert_eq!(scene.edges.len(), 1);
        assert!(scene.edges[0].path.contains(" C "));
        assert!(scene.edges[0].label_y > 0.0, "label must stay inside the view box");
    }

    #[test]
    fn test_opposing_edges_are_separated() {
        let graph = model(&["a", "b"], &[("a", "b"), ("b", "a")]);
        let scene = build_scene(&graph);
        assert_ne!(scene.edges[0].label_y, scene.edges[1].label_y);
    }
}
