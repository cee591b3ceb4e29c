//! Proportional hop timeline geometry.

use chrono::NaiveDateTime;
use shared_types::{TraceDetail, TraceHop};

use crate::api::ApiError;
use crate::format::round_one_decimal;
use crate::severity::{classify_status, Severity};
use crate::time_codec::{decode, elapsed_ms};

pub const MIN_BAR_WIDTH: f64 = 2.0;
pub const MAX_BAR_LEFT: f64 = 98.0;

/// Bar placement as percentages of the trace window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HopGeometry {
    pub left: f64,
    pub width: f64,
}

impl HopGeometry {
    /// Raw offsets in ms from the window start. Clamp order matters:
    /// overflow trim, then minimum width, then maximum left.
    pub fn from_offsets(start_ms: i64, end_ms: i64, total_span_ms: i64) -> Self {
        let span = total_span_ms.max(1) as f64;
        let mut left = start_ms as f64 / span * 100.0;
        let mut width = (end_ms - start_ms) as f64 / span * 100.0;

        if left + width > 100.0 {
            width = 100.0 - left;
        }
        if width < MIN_BAR_WIDTH {
            width = MIN_BAR_WIDTH;
        }
        if left > MAX_BAR_LEFT {
            left = MAX_BAR_LEFT;
        }
        Self { left, width }
    }

    /// Inline style with one-decimal display rounding
    pub fn style(&self) -> String {
        format!(
            "left:{:.1}%;width:{:.1}%",
            round_one_decimal(self.left),
            round_one_decimal(self.width)
        )
    }
}

/// `[first hop reqTime, last hop resTime]`, never narrower than 1 ms.
///
/// When the last response time is missing the window ends at the latest
/// parseable hop time instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceWindow {
    pub first_req: NaiveDateTime,
    pub total_span_ms: i64,
}

fn parse(raw: Option<&str>) -> Option<NaiveDateTime> {
    raw.and_then(|value| decode(value).ok())
}

fn parse_or(raw: Option<&str>, fallback: NaiveDateTime) -> NaiveDateTime {
    parse(raw).unwrap_or(fallback)
}

fn latest_hop_time(hops: &[TraceHop]) -> Option<NaiveDateTime> {
    hops.iter()
        .flat_map(|hop| [parse(hop.req_time.as_deref()), parse(hop.res_time.as_deref())])
        .flatten()
        .max()
}

impl TraceWindow {
    pub fn of(hops: &[TraceHop]) -> Option<Self> {
        let first = hops.first()?;
        let last = hops.last()?;
        let first_req = parse(first.req_time.as_deref())?;
        let last_res = parse(last.res_time.as_deref())
            .or_else(|| latest_hop_time(hops))
            .unwrap_or(first_req);
        Some(Self {
            first_req,
            total_span_ms: elapsed_ms(first_req, last_res).max(1),
        })
    }

    /// Unparseable start falls back to the window start, unparseable end to
    /// the hop's own start.
    pub fn place(&self, hop: &TraceHop) -> HopGeometry {
        let start = parse_or(hop.req_time.as_deref(), self.first_req);
        let end = parse_or(hop.res_time.as_deref(), start);
        HopGeometry::from_offsets(
            elapsed_ms(self.first_req, start),
            elapsed_ms(self.first_req, end),
            self.total_span_ms,
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HopRow {
    pub hop: TraceHop,
    pub geometry: HopGeometry,
    pub severity: Severity,
}

pub fn layout_hops(hops: &[TraceHop]) -> Vec<HopRow> {
    let window = match TraceWindow::of(hops) {
        Some(window) => window,
        None => {
            // Without a parseable first request time every hop collapses to the origin.
            return hops
                .iter()
                .map(|hop| HopRow {
                    hop: hop.clone(),
                    geometry: HopGeometry::from_offsets(0, 0, 1),
                    severity: classify_status(hop.status),
                })
                .collect();
        }
    };

    hops.iter()
        .map(|hop| HopRow {
            hop: hop.clone(),
            geometry: window.place(hop),
            severity: classify_status(hop.status),
        })
        .collect()
}

// ── Timeline model ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineModel {
    pub tx_id: String,
    pub hop_count: u32,
    pub total_duration: i64,
    pub rows: Vec<HopRow>,
    expanded: Option<usize>,
}

impl TimelineModel {
    pub fn new(detail: TraceDetail) -> Self {
        let rows = layout_hops(&detail.hops);
        Self {
            tx_id: detail.tx_id,
            hop_count: detail.hop_count,
            total_duration: detail.total_duration,
            rows,
            expanded: None,
        }
    }

    pub fn header(&self) -> String {
        format!(
            "Trace: {} ({} hops, {}ms)",
            self.tx_id, self.hop_count, self.total_duration
        )
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Expanding a hop collapses whichever one was open; clicking the open
    /// hop collapses it.
    pub fn toggle(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.expanded = if self.expanded == Some(index) {
            None
        } else {
            Some(index)
        };
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TraceDetailState {
    Idle,
    Loading,
    NotFound(String),
    Failed,
    NoHops,
    Loaded(TimelineModel),
}

impl TraceDetailState {
    pub fn from_fetch(tx_id: &str, result: Result<TraceDetail, ApiError>) -> Self {
        match result {
            Ok(detail) if detail.hops.is_empty() => Self::NoHops,
            Ok(detail) => Self::Loaded(TimelineModel::new(detail)),
            Err(ApiError::NotFound { .. }) => Self::NotFound(tx_id.to_string()),
            Err(err) => {
                dioxus_logger::tracing::error!("Failed to load trace {}: {}", tx_id, err);
                Self::Failed
            }
        }
    }

    pub fn message(&self) -> Option<String> {
        match self {
            Self::NotFound(tx_id) => Some(format!("Trace not found: {tx_id}")),
            Self::Failed => Some("Failed to load trace".to_string()),
            Self::NoHops => Some("No hops found".to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_hop(index: i32, req: &str, res: &str, status: i32) -> TraceHop {
        TraceHop {
            index,
            path: Some(format!("/hop-{index}")),
            status,
            duration_ms: Some(0),
            req_time: Some(req.to_string()),
            res_time: Some(res.to_string()),
            ..Default::default()
        }
    }

    fn assert_clamped(geometry: HopGeometry) {
        assert!(geometry.width >= MIN_BAR_WIDTH, "width {:?}", geometry);
        assert!(geometry.left <= MAX_BAR_LEFT, "left {:?}", geometry);
        assert!(geometry.left + geometry.width <= 100.0 + 1e-9, "overflow {:?}", geometry);
    }

    #[test]
    fn test_single_full_span_hop() {
        let hops = vec![make_hop(
            1,
            "2024-06-15T10:00:00.000Z",
            "2024-06-15T10:00:00.250Z",
            200,
        )];
        let rows = layout_hops(&hops);
        assert_eq!(rows[0].geometry, HopGeometry { left: 0.0, width: 100.0 });
        assert_eq!(rows[0].geometry.style(), "left:0.0%;width:100.0%");
    }

    #[test]
    fn test_zero_duration_middle_hop() {
        let hops = vec![
            make_hop(1, "2024-06-15T10:00:00.000Z", "2024-06-15T10:00:00.400Z", 200),
            make_hop(2, "2024-06-15T10:00:00.100Z", "2024-06-15T10:00:00.100Z", 502),
            make_hop(3, "2024-06-15T10:00:00.200Z", "2024-06-15T10:00:01.000Z", 200),
        ];
        let rows = layout_hops(&hops);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].geometry.width, MIN_BAR_WIDTH);
        assert_eq!(rows[1].geometry.left, 10.0);
        assert_eq!(rows[1].severity, Severity::Error);
        for row in &rows {
            assert_clamped(row.geometry);
        }
    }

    #[test]
    fn test_identical_timestamps_use_unit_span() {
        let hops = vec![
            make_hop(1, "2024-06-15T10:00:00.000Z", "2024-06-15T10:00:00.000Z", 200),
            make_hop(2, "2024-06-15T10:00:00.000Z", "2024-06-15T10:00:00.000Z", 200),
        ];
        let window = TraceWindow::of(&hops).unwrap();
        assert_eq!(window.total_span_ms, 1);
        for row in layout_hops(&hops) {
            assert!(row.geometry.width.is_finite());
            assert_clamped(row.geometry);
        }
    }

    #[test]
    fn test_clamp_order_near_right_edge() {
        // left 99, width 5: overflow trims width to 1, min width lifts it to 2,
        // then left drops to 98.
        let geometry = HopGeometry::from_offsets(990, 1040, 1000);
        assert_eq!(geometry, HopGeometry { left: 98.0, width: 2.0 });
        assert_clamped(geometry);
    }

    #[test]
    fn test_clamp_invariants_hold_across_offsets() {
        for start in (0..=1000).step_by(37) {
            for end in (start..=1100).step_by(53) {
                assert_clamped(HopGeometry::from_offsets(start, end, 1000));
            }
        }
    }

    #[test]
    fn test_display_rounding_keeps_geometry() {
        let geometry = HopGeometry::from_offsets(1, 2, 3);
        assert!((geometry.left - 33.333).abs() < 0.001);
        assert_eq!(geometry.style(), "left:33.3%;width:33.3%");
    }

    #[test]
    fn test_unparseable_end_falls_back_to_start() {
        let hops = vec![
            make_hop(1, "2024-06-15T10:00:00.000Z", "2024-06-15T10:00:01.000Z", 200),
            make_hop(2, "2024-06-15T10:00:00.500Z", "garbage", 200),
        ];
        let rows = layout_hops(&hops);
        assert_eq!(rows[1].geometry.left, 50.0);
        assert_eq!(rows[1].geometry.width, MIN_BAR_WIDTH);
    }

    #[test]
    fn test_missing_last_response_keeps_window_open() {
        let mut pending = make_hop(3, "2024-06-15T10:00:00.800Z", "", 504);
        pending.res_time = None;
        let hops = vec![
            make_hop(1, "2024-06-15T10:00:00.000Z", "2024-06-15T10:00:01.000Z", 200),
            make_hop(2, "2024-06-15T10:00:00.200Z", "2024-06-15T10:00:00.600Z", 200),
            pending,
        ];
        let window = TraceWindow::of(&hops).unwrap();
        assert_eq!(window.total_span_ms, 1000);

        let rows = layout_hops(&hops);
        assert_eq!(rows[1].geometry, HopGeometry { left: 20.0, width: 40.0 });
        assert_eq!(rows[2].geometry.left, 80.0);
        assert_eq!(rows[2].geometry.width, MIN_BAR_WIDTH);
    }

    #[test]
    fn test_missing_first_request_collapses_to_origin() {
        let mut first = make_hop(1, "", "2024-06-15T10:00:01.000Z", 200);
        first.req_time = None;
        let hops = vec![
            first,
            make_hop(2, "2024-06-15T10:00:00.500Z", "2024-06-15T10:00:00.900Z", 200),
        ];
        for row in layout_hops(&hops) {
            assert_eq!(row.geometry, HopGeometry { left: 0.0, width: MIN_BAR_WIDTH });
        }
    }

    #[test]
    fn test_single_expansion() {
        let detail = TraceDetail {
            tx_id: "tx-1".to_string(),
            hop_count: 3,
            total_duration: 1000,
            hops: vec![
                make_hop(1, "2024-06-15T10:00:00.000Z", "2024-06-15T10:00:01.000Z", 200),
                make_hop(2, "2024-06-15T10:00:00.100Z", "2024-06-15T10:00:00.900Z", 200),
                make_hop(3, "2024-06-15T10:00:00.200Z", "2024-06-15T10:00:00.800Z", 404),
            ],
        };
        let mut model = TimelineModel::new(detail);
        assert_eq!(model.header(), "Trace: tx-1 (3 hops, 1000ms)");
        assert_eq!(model.expanded(), None);

        model.toggle(0);
        assert_eq!(model.expanded(), Some(0));
        model.toggle(2);
        assert_eq!(model.expanded(), Some(2), "opening a hop closes the other");
        model.toggle(2);
        assert_eq!(model.expanded(), None);
        model.toggle(7);
        assert_eq!(model.expanded(), None);
    }

    #[test]
    fn test_detail_states() {
        let not_found = TraceDetailState::from_fetch(
            "abc",
            Err(ApiError::NotFound { resource: "abc".to_string() }),
        );
        assert_eq!(not_found.message().as_deref(), Some("Trace not found: abc"));

        let failed = TraceDetailState::from_fetch("abc", Err(ApiError::Transport("x".into())));
        assert_eq!(failed.message().as_deref(), Some("Failed to load trace"));

        let empty = TraceDetailState::from_fetch(
            "abc",
            Ok(TraceDetail { tx_id: "abc".into(), ..Default::default() }),
        );
        assert_eq!(empty.message().as_deref(), Some("No hops found"));
    }
}
