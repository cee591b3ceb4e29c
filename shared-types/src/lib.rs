//! Shared wire types for the gateway admin API
//!
//! These types mirror the JSON the admin server produces and are consumed by
//! the operator console (WASM). Field names follow the server's camelCase.
//!
//! Timestamps stay as strings on purpose: the server writes local wall-clock
//! digits with a trailing `Z`, so parsing them as real UTC would shift every
//! window by the viewer's offset. Decoding lives in the console's time codec.

use serde::{Deserialize, Serialize};

// ============================================================================
// Statistics
// ============================================================================

/// Per-path latency/error statistics for one time window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRow {
    pub path: String,
    #[serde(default)]
    pub count: Option<i64>,
    #[serde(default)]
    pub error_count: Option<i64>,
    /// Percentage in [0, 100]
    #[serde(default)]
    pub error_rate: Option<f64>,
    #[serde(default)]
    pub avg: Option<i64>,
    #[serde(default)]
    pub min: Option<i64>,
    #[serde(default)]
    pub max: Option<i64>,
    #[serde(default)]
    pub p30: Option<i64>,
    #[serde(default)]
    pub p50: Option<i64>,
    #[serde(default)]
    pub p75: Option<i64>,
    #[serde(default)]
    pub p90: Option<i64>,
    #[serde(default)]
    pub p95: Option<i64>,
    #[serde(default)]
    pub p99: Option<i64>,
}

impl StatRow {
    /// Percentiles in display order (p30, p50, p75, p90, p95, p99)
    pub fn percentiles(&self) -> [Option<i64>; 6] {
        [self.p30, self.p50, self.p75, self.p90, self.p95, self.p99]
    }
}

// ============================================================================
// Traces
// ============================================================================

/// One row of the paged trace search
///
/// The server sends `{txId, reqTime}` projections, older builds sent bare ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TraceListEntry {
    Summary {
        #[serde(rename = "txId")]
        tx_id: String,
        #[serde(rename = "reqTime", default)]
        req_time: Option<String>,
    },
    Bare(String),
}

impl TraceListEntry {
    pub fn tx_id(&self) -> &str {
        match self {
            Self::Summary { tx_id, .. } => tx_id,
            Self::Bare(tx_id) => tx_id,
        }
    }

    pub fn req_time(&self) -> Option<&str> {
        match self {
            Self::Summary { req_time, .. } => req_time.as_deref(),
            Self::Bare(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_elements: Option<u64>,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
}

/// Paged trace search response
///
/// Page metadata is nested under `page` when the server serialises pages via
/// DTO; plain Spring pages put `totalPages` at the top level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TracePage {
    #[serde(default)]
    pub content: Vec<TraceListEntry>,
    #[serde(default)]
    pub page: Option<PageMeta>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl TracePage {
    /// Total page count, nested metadata first, top level as fallback, 1 if absent
    pub fn total_pages(&self) -> u32 {
        self.page
            .as_ref()
            .and_then(|meta| meta.total_pages)
            .or(self.total_pages)
            .filter(|pages| *pages > 0)
            .unwrap_or(1)
    }
}

/// One leg of a request chain
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceHop {
    #[serde(default)]
    pub tx_id: Option<String>,
    #[serde(rename = "hop")]
    pub index: i32,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    pub status: i32,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    /// Absent when the hop was never logged with a request time
    #[serde(default)]
    pub req_time: Option<String>,
    /// Absent when the hop never got a response
    #[serde(default)]
    pub res_time: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub request_headers: Option<String>,
    #[serde(default)]
    pub request_body: Option<String>,
    #[serde(default)]
    pub response_headers: Option<String>,
    #[serde(default)]
    pub response_body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceDetail {
    pub tx_id: String,
    #[serde(default)]
    pub hop_count: u32,
    #[serde(default)]
    pub total_duration: i64,
    /// Ascending hop index
    #[serde(default)]
    pub hops: Vec<TraceHop>,
}

// ============================================================================
// Traffic
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceNode {
    pub name: String,
    #[serde(default)]
    pub request_count: i64,
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub avg_duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEdge {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub request_count: i64,
    #[serde(default)]
    pub error_rate: f64,
    #[serde(default)]
    pub p50: Option<i64>,
    #[serde(default)]
    pub p99: Option<i64>,
}

impl ServiceEdge {
    /// Edge identity, one edge per ordered pair
    pub fn key(&self) -> String {
        format!("{}->{}", self.source, self.target)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceGraph {
    #[serde(default)]
    pub nodes: Vec<ServiceNode>,
    #[serde(default)]
    pub edges: Vec<ServiceEdge>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThroughputStats {
    #[serde(default)]
    pub total_requests: i64,
    #[serde(default)]
    pub avg_per_minute: f64,
    #[serde(default)]
    pub max_per_minute: i64,
}

// ============================================================================
// Body collection policies
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyCollectionPolicy {
    pub id: i64,
    pub path_pattern: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPolicyRequest {
    pub path_pattern: String,
}

/// RFC 7807 problem body returned on non-OK responses
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemDetail {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ProblemDetail {
    /// Most specific human-readable message the server supplied
    pub fn best_message(&self) -> Option<&str> {
        [&self.detail, &self.message, &self.error]
            .into_iter()
            .filter_map(|field| field.as_deref())
            .map(str::trim)
            .find(|text| !text.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_row_tolerates_missing_numbers() {
        let row: StatRow =
            serde_json::from_str(r#"{"path":"/a","count":3,"errorRate":12.5,"p99":null}"#)
                .unwrap();
        assert_eq!(row.path, "/a");
        assert_eq!(row.count, Some(3));
        assert_eq!(row.error_rate, Some(12.5));
        assert_eq!(row.avg, None);
        assert_eq!(row.p99, None);
    }

    #[test]
    fn test_trace_page_reads_nested_meta_first() {
        let page: TracePage = serde_json::from_str(
            r#"{"content":[{"txId":"tx-1","reqTime":"2024-05-01T10:00:00.000Z"}],
                "page":{"totalPages":4},"totalPages":9}"#,
        )
        .unwrap();
        assert_eq!(page.total_pages(), 4);
        assert_eq!(page.content[0].tx_id(), "tx-1");
        assert_eq!(page.content[0].req_time(), Some("2024-05-01T10:00:00.000Z"));
    }

    #[test]
    fn test_trace_page_falls_back_to_top_level_meta() {
        let page: TracePage =
            serde_json::from_str(r#"{"content":["tx-9"],"totalPages":3}"#).unwrap();
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.content[0].tx_id(), "tx-9");
        assert_eq!(page.content[0].req_time(), None);

        let empty: TracePage = serde_json::from_str(r#"{"content":[]}"#).unwrap();
        assert_eq!(empty.total_pages(), 1);
    }

    #[test]
    fn test_trace_hop_wire_names() {
        let hop: TraceHop = serde_json::from_str(
            r#"{"txId":"t","hop":2,"path":"/b","status":502,"durationMs":40,
                "reqTime":"2024-05-01T10:00:00.100Z","resTime":"2024-05-01T10:00:00.140Z",
                "error":"upstream reset","responseBody":"{\"ok\":false}"}"#,
        )
        .unwrap();
        assert_eq!(hop.index, 2);
        assert_eq!(hop.path.as_deref(), Some("/b"));
        assert_eq!(hop.res_time.as_deref(), Some("2024-05-01T10:00:00.140Z"));
        assert_eq!(hop.target, None);
        assert_eq!(hop.duration_ms, Some(40));
        assert_eq!(hop.error.as_deref(), Some("upstream reset"));
        assert_eq!(hop.response_body.as_deref(), Some("{\"ok\":false}"));
        assert!(hop.request_headers.is_none());
    }

    #[test]
    fn test_trace_detail_accepts_null_hop_fields() {
        let detail: TraceDetail = serde_json::from_str(
            r#"{"txId":"tx-7","hopCount":2,"totalDuration":120,"hops":[
                {"hop":1,"path":"/a","status":200,"reqTime":"2024-05-01T10:00:00.000Z","resTime":"2024-05-01T10:00:00.120Z"},
                {"hop":2,"path":null,"status":504,"reqTime":"2024-05-01T10:00:00.010Z","resTime":null}]}"#,
        )
        .unwrap();
        assert_eq!(detail.hops.len(), 2);
        assert_eq!(detail.hops[0].path.as_deref(), Some("/a"));
        assert_eq!(detail.hops[1].path, None);
        assert_eq!(detail.hops[1].res_time, None);

        let bare: TraceHop = serde_json::from_str(r#"{"hop":3,"status":502}"#).unwrap();
        assert_eq!(bare.req_time, None);
        assert_eq!(bare.res_time, None);
    }

    #[test]
    fn test_edge_key_is_directed() {
        let forward = ServiceEdge {
            source: "gateway".to_string(),
            target: "server-a".to_string(),
            ..Default::default()
        };
        let backward = ServiceEdge {
            source: "server-a".to_string(),
            target: "gateway".to_string(),
            ..Default::default()
        };
        assert_eq!(forward.key(), "gateway->server-a");
        assert_ne!(forward.key(), backward.key());
    }

    #[test]
    fn test_problem_detail_prefers_detail() {
        let problem: ProblemDetail = serde_json::from_str(
            r#"{"title":"Conflict","status":409,"detail":"Pattern already exists: /a/**"}"#,
        )
        .unwrap();
        assert_eq!(problem.best_message(), Some("Pattern already exists: /a/**"));

        let blank = ProblemDetail {
            detail: Some("  ".to_string()),
            message: Some("fallback".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.best_message(), Some("fallback"));
    }

    #[test]
    fn test_new_policy_request_shape() {
        let json = serde_json::to_string(&NewPolicyRequest {
            path_pattern: "/server-a/**".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"pathPattern":"/server-a/**"}"#);
    }
}
