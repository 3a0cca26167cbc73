//! HTTP routes for the string analyzer.
//!
//! | Method | Path                                  | Success |
//! |--------|---------------------------------------|---------|
//! | POST   | /strings                              | 201     |
//! | GET    | /strings                              | 200     |
//! | GET    | /strings/filter-by-natural-language   | 200     |
//! | GET    | /strings/:value                       | 200     |
//! | DELETE | /strings/:value                       | 204     |
//! | GET    | /health                               | 200     |
//!
//! Every error response carries `{"error": "..."}`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use strings_types::{
    ErrorResponse, FilterParams, HealthResponse, ListResponse, NaturalLanguageResponse, RecordView,
};

use crate::error::ServiceError;
use crate::service::{ListResult, NaturalLanguageResult, StringService};

/// Shared application state
pub type AppState = Arc<StringService>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => ApiError::BadRequest(msg),
            ServiceError::Conflict(_) => {
                ApiError::Conflict("String already exists in the system".to_string())
            }
            ServiceError::NotFound(_) => {
                ApiError::NotFound("String does not exist in the system".to_string())
            }
            ServiceError::Storage(e) => {
                error!(error = %e, "Storage failure");
                ApiError::Internal("Storage failure".to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}

impl From<ListResult> for ListResponse {
    fn from(result: ListResult) -> Self {
        let data: Vec<RecordView> = result.records.into_iter().map(RecordView::from).collect();
        Self {
            count: data.len(),
            data,
            filters_applied: result.filters_applied,
        }
    }
}

impl From<NaturalLanguageResult> for NaturalLanguageResponse {
    fn from(result: NaturalLanguageResult) -> Self {
        let data: Vec<RecordView> = result.records.into_iter().map(RecordView::from).collect();
        Self {
            count: data.len(),
            data,
            interpreted_query: result.interpreted_query,
        }
    }
}

/// Decoded query-string pairs, in order, repeats included.
type QueryPairs = Vec<(String, String)>;

/// Build the router over a shared service.
pub fn router(service: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/strings", get(list_strings).post(create_string))
        .route(
            "/strings/filter-by-natural-language",
            get(filter_by_natural_language),
        )
        .route("/strings/:value", get(get_string).delete(delete_string))
        .with_state(service)
        .layer(TraceLayer::new_for_http())
}

/// POST /strings
///
/// The body is parsed by hand so that a missing `value` (400) can be told
/// apart from a `value` of the wrong type (422).
async fn create_string(
    State(service): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<RecordView>), ApiError> {
    let payload: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid JSON body: {}", e)))?;

    let value = match payload.get("value") {
        None | Some(Value::Null) => {
            return Err(ApiError::BadRequest(
                "Missing \"value\" field".to_string(),
            ))
        }
        Some(Value::String(value)) => value,
        Some(_) => {
            return Err(ApiError::Unprocessable(
                "\"value\" must be a string".to_string(),
            ))
        }
    };

    let record = service.create(value)?;
    Ok((StatusCode::CREATED, Json(RecordView::from(record))))
}

/// GET /strings
///
/// A repeated parameter keeps its last value, so a bad repeat only drops
/// that one filter.
async fn list_strings(
    State(service): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<ListResponse>, ApiError> {
    let Query(pairs) = query?;
    let params: FilterParams = pairs.into_iter().collect();
    debug!(?params, "List strings");
    let result = service.list(&params)?;
    Ok(Json(result.into()))
}

/// GET /strings/filter-by-natural-language
async fn filter_by_natural_language(
    State(service): State<AppState>,
    query: Result<Query<QueryPairs>, QueryRejection>,
) -> Result<Json<NaturalLanguageResponse>, ApiError> {
    let Query(pairs) = query?;
    let query = pairs
        .into_iter()
        .filter(|(key, _)| key == "query")
        .map(|(_, value)| value)
        .last()
        .ok_or_else(|| ApiError::BadRequest("Missing \"query\" parameter".to_string()))?;

    let result = service.filter_by_natural_language(&query)?;
    Ok(Json(result.into()))
}

/// GET /strings/:value
async fn get_string(
    State(service): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<RecordView>, ApiError> {
    let Path(value) = path?;
    let record = service.get(&value)?;
    Ok(Json(record.into()))
}

/// DELETE /strings/:value
async fn delete_string(
    State(service): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(value) = path?;
    service.delete(&value)?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /health
async fn health(State(service): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let version = env!("CARGO_PKG_VERSION").to_string();
    match service.count() {
        Ok(record_count) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy".to_string(),
                version,
                record_count,
            }),
        ),
        Err(e) => {
            error!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    version,
                    record_count: 0,
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use strings_storage::MemoryStore;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Arc::new(StringService::new(Arc::new(MemoryStore::new()))))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn create(app: &Router, value: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({ "value": value }).to_string();
        send(app, Method::POST, "/strings", Some(&body)).await
    }

    #[tokio::test]
    async fn test_create_returns_record() {
        let app = app();
        let (status, json) = create(&app, "Never odd or even").await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["value"], "Never odd or even");
        assert_eq!(json["id"], json["properties"]["sha256_hash"]);
        assert_eq!(json["properties"]["length"], 17);
        assert_eq!(json["properties"]["is_palindrome"], false);
        assert_eq!(json["properties"]["word_count"], 4);
        assert_eq!(json["properties"]["character_frequency_map"]["e"], 4);
    }

    #[tokio::test]
    async fn test_create_validation_statuses() {
        let app = app();

        let (status, json) = send(&app, Method::POST, "/strings", Some("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());

        let (status, _) = send(&app, Method::POST, "/strings", Some("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = create(&app, "   ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(&app, Method::POST, "/strings", Some(r#"{"value": 42}"#)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_duplicate_is_conflict() {
        let app = app();
        assert_eq!(create(&app, "abc").await.0, StatusCode::CREATED);

        let (status, json) = create(&app, "  abc ").await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_get_and_delete_by_path() {
        let app = app();
        create(&app, "hello world").await;

        let (status, json) = send(&app, Method::GET, "/strings/hello%20world", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["value"], "hello world");

        let (status, _) = send(&app, Method::DELETE, "/strings/hello%20world", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, json) = send(&app, Method::GET, "/strings/hello%20world", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].is_string());

        let (status, _) = send(&app, Method::DELETE, "/strings/hello%20world", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_list_with_filters() {
        let app = app();
        for value in ["level", "hello", "a"] {
            create(&app, value).await;
        }

        let (status, json) = send(
            &app,
            Method::GET,
            "/strings?is_palindrome=true&min_length=2&word_count=abc",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["value"], "level");
        assert_eq!(json["filters_applied"]["is_palindrome"], true);
        assert_eq!(json["filters_applied"]["min_length"], 2);
        assert!(json["filters_applied"].get("word_count").is_none());
    }

    #[tokio::test]
    async fn test_list_repeated_parameter_keeps_last_value() {
        let app = app();
        for value in ["level", "hello world"] {
            create(&app, value).await;
        }

        let (status, json) =
            send(&app, Method::GET, "/strings?min_length=1&min_length=abc", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
        assert!(json["filters_applied"].get("min_length").is_none());

        let (status, json) =
            send(&app, Method::GET, "/strings?word_count=2&word_count=2", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);
        assert_eq!(json["data"][0]["value"], "hello world");
        assert_eq!(json["filters_applied"]["word_count"], 2);
    }

    #[tokio::test]
    async fn test_undecodable_path_is_json_bad_request() {
        let app = app();

        let (status, json) = send(&app, Method::GET, "/strings/%FF", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());

        let (status, json) = send(&app, Method::DELETE, "/strings/%FF", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_natural_language_endpoint() {
        let app = app();
        for value in ["racecar", "stats", "not one"] {
            create(&app, value).await;
        }

        let (status, json) = send(
            &app,
            Method::GET,
            "/strings/filter-by-natural-language?query=single%20word%20palindrome%20strings",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 2);
        assert_eq!(
            json["interpreted_query"]["original"],
            "single word palindrome strings"
        );
        assert_eq!(json["interpreted_query"]["parsed_filters"]["is_palindrome"], true);
        assert_eq!(json["interpreted_query"]["parsed_filters"]["word_count"], 1);
    }

    #[tokio::test]
    async fn test_natural_language_repeated_query_keeps_last() {
        let app = app();
        for value in ["racecar", "not one"] {
            create(&app, value).await;
        }

        let (status, json) = send(
            &app,
            Method::GET,
            "/strings/filter-by-natural-language?query=anything&query=palindrome",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], 1);
        assert_eq!(json["interpreted_query"]["original"], "palindrome");
    }

    #[tokio::test]
    async fn test_natural_language_requires_query() {
        let app = app();
        let (status, _) =
            send(&app, Method::GET, "/strings/filter-by-natural-language", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            Method::GET,
            "/strings/filter-by-natural-language?query=%20",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_count() {
        let app = app();
        create(&app, "one").await;

        let (status, json) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["record_count"], 1);
    }
}
