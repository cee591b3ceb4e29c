use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared_types::{
    BodyCollectionPolicy, NewPolicyRequest, ProblemDetail, ServiceGraph, StatRow, ThroughputStats,
    TraceDetail, TracePage,
};

use crate::config::api_base;
use crate::time_codec::WireRange;

/// Failure taxonomy for admin API calls.
///
/// Views convert every variant into an inline terminal state; nothing here is
/// retried.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Not found: {resource}")]
    NotFound { resource: String },
    #[error("Conflict: {detail}")]
    Conflict { detail: String },
    #[error("HTTP error: {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("Failed to parse JSON: {0}")]
    Decode(String),
}

impl ApiError {
    /// Server-supplied detail when there is one, otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Conflict { detail } => detail.clone(),
            Self::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Map a non-OK status and its body onto the taxonomy.
///
/// `resource` names what was asked for; it is only used for 404s so the
/// message can carry the requested identifier.
pub fn failure_from_status(status: u16, body: &str, resource: Option<&str>) -> ApiError {
    let detail = serde_json::from_str::<ProblemDetail>(body)
        .ok()
        .and_then(|problem| problem.best_message().map(ToString::to_string));

    match (status, resource) {
        (404, Some(resource)) => ApiError::NotFound {
            resource: resource.to_string(),
        },
        (409, _) => ApiError::Conflict {
            detail: detail.unwrap_or_else(|| "Resource already exists".to_string()),
        },
        _ => ApiError::Status { status, detail },
    }
}

fn url_encode(value: &str) -> String {
    js_sys::encode_uri_component(value)
        .as_string()
        .unwrap_or_else(|| value.to_string())
}

/// `from`/`to` query pair for a wire window.
pub fn window_query(window: &WireRange) -> String {
    format!("from={}&to={}", url_encode(&window.from), url_encode(&window.to))
}

async fn send(request: Request) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|e| ApiError::Transport(e.to_string()))
}

async fn expect_ok(response: Response, resource: Option<&str>) -> Result<Response, ApiError> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(failure_from_status(status, &body, resource))
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

async fn get_json<T: DeserializeOwned>(url: &str, resource: Option<&str>) -> Result<T, ApiError> {
    log::debug!("GET {url}");
    let request = Request::get(url)
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let response = expect_ok(send(request).await?, resource).await?;
    decode(response).await
}

// ── Statistics ───────────────────────────────────────────────────────────────

pub async fn fetch_stats(window: &WireRange) -> Result<Vec<StatRow>, ApiError> {
    let url = format!("{}/api/stats?{}", api_base(), window_query(window));
    get_json(&url, None).await
}

// ── Traces ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TraceListQuery {
    pub window: WireRange,
    pub page: u32,
    pub size: u32,
    /// Blank means no path filter
    pub path: String,
    pub errors_only: bool,
}

pub async fn fetch_trace_page(query: &TraceListQuery) -> Result<TracePage, ApiError> {
    let mut url = format!(
        "{}/api/traces?{}&page={}&size={}",
        api_base(),
        window_query(&query.window),
        query.page,
        query.size.max(1)
    );
    let path = query.path.trim();
    if !path.is_empty() {
        url.push_str("&path=");
        url.push_str(&url_encode(path));
    }
    if query.errors_only {
        url.push_str("&status=error");
    }
    get_json(&url, None).await
}

pub async fn fetch_trace_detail(
    tx_id: &str,
    include_detail: bool,
) -> Result<TraceDetail, ApiError> {
    let url = format!(
        "{}/api/traces/{}?includeDetail={}",
        api_base(),
        url_encode(tx_id),
        include_detail
    );
    get_json(&url, Some(tx_id)).await
}

// ── Traffic ──────────────────────────────────────────────────────────────────

pub async fn fetch_service_graph(window: &WireRange) -> Result<ServiceGraph, ApiError> {
    let url = format!("{}/api/traffic/graph?{}", api_base(), window_query(window));
    get_json(&url, None).await
}

pub async fn fetch_throughput(window: &WireRange) -> Result<ThroughputStats, ApiError> {
    let url = format!(
        "{}/api/traffic/throughput?{}",
        api_base(),
        window_query(window)
    );
    get_json(&url, None).await
}

// ── Body collection policies ─────────────────────────────────────────────────

pub async fn fetch_policies() -> Result<Vec<BodyCollectionPolicy>, ApiError> {
    let url = format!("{}/api/policies", api_base());
    get_json(&url, None).await
}

pub async fn create_policy(path_pattern: &str) -> Result<BodyCollectionPolicy, ApiError> {
    let url = format!("{}/api/policies", api_base());
    let request = Request::post(&url)
        .json(&NewPolicyRequest {
            path_pattern: path_pattern.to_string(),
        })
        .map_err(|e| ApiError::Transport(format!("Failed to serialize request: {e}")))?;
    log::debug!("POST {url}");
    let response = expect_ok(send(request).await?, None).await?;
    decode(response).await
}

pub async fn toggle_policy(id: i64) -> Result<BodyCollectionPolicy, ApiError> {
    let url = format!("{}/api/policies/{id}/toggle", api_base());
    log::debug!("PATCH {url}");
    let request = Request::patch(&url)
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    let response = expect_ok(send(request).await?, None).await?;
    decode(response).await
}

pub async fn delete_policy(id: i64) -> Result<(), ApiError> {
    let url = format!("{}/api/policies/{id}", api_base());
    log::debug!("DELETE {url}");
    let request = Request::delete(&url)
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    expect_ok(send(request).await?, None).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_identifier() {
        let err = failure_from_status(404, "", Some("tx-42"));
        assert_eq!(
            err,
            ApiError::NotFound {
                resource: "tx-42".to_string()
            }
        );
        assert_eq!(err.to_string(), "Not found: tx-42");
    }

    #[test]
    fn test_404_without_resource_is_plain_status() {
        let err = failure_from_status(404, "", None);
        assert_eq!(
            err,
            ApiError::Status {
                status: 404,
                detail: None
            }
        );
    }

    #[test]
    fn test_conflict_surfaces_problem_detail() {
        let body = r#"{"title":"Conflict","status":409,"detail":"Pattern already exists: /a/**"}"#;
        let err = failure_from_status(409, body, None);
        assert_eq!(
            err.user_message("Failed to add policy"),
            "Pattern already exists: /a/**"
        );
    }

    #[test]
    fn test_conflict_without_body_has_generic_detail() {
        let err = failure_from_status(409, "", None);
        assert_eq!(err.user_message("fallback"), "Resource already exists");
    }

    #[test]
    fn test_other_status_falls_back_without_detail() {
        let err = failure_from_status(500, "<html>oops</html>", None);
        assert_eq!(err.user_message("Failed to add policy"), "Failed to add policy");

        let err = failure_from_status(400, r#"{"detail":"Invalid pattern"}"#, None);
        assert_eq!(err.user_message("Failed to add policy"), "Invalid pattern");
    }

    #[test]
    fn test_transport_and_decode_use_fallback() {
        assert_eq!(
            ApiError::Transport("offline".to_string()).user_message("Failed to load stats"),
            "Failed to load stats"
        );
        assert_eq!(
            ApiError::Decode("eof".to_string()).user_message("Failed to load stats"),
            "Failed to load stats"
        );
    }
}
