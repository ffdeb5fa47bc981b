//! HTTP response envelopes
//!
//! Every successful product response wraps its payload in `{ "data": ... }`.
//! These builders keep that envelope and the status code together so
//! handlers cannot produce one without the other.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

// ============================================================================
// 200 OK
// ============================================================================

/// HTTP 200 response carrying `{ "data": ... }`
#[derive(Debug, Clone, Serialize)]
pub struct Success<T> {
    data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for Success<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

// ============================================================================
// 201 Created
// ============================================================================

/// HTTP 201 response carrying `{ "data": ... }`
///
/// Optionally includes a `Location` header pointing at the new resource.
#[derive(Debug, Clone, Serialize)]
pub struct Created<T> {
    data: T,

    #[serde(skip)]
    location: Option<String>,
}

impl<T> Created<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            location: None,
        }
    }

    /// Add a Location header pointing to the created resource
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl<T: Serialize> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        let mut response = (StatusCode::CREATED, Json(&self)).into_response();

        if let Some(location) = self.location {
            if let Ok(header_value) = HeaderValue::from_str(&location) {
                response
                    .headers_mut()
                    .insert(header::LOCATION, header_value);
            }
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::json;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_success_wraps_payload_in_data() {
        let response = Success::new(vec![1, 2, 3]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "data": [1, 2, 3] }));
    }

    #[tokio::test]
    async fn test_created_sets_status_and_location() {
        let response = Created::new(json!({ "id": 5 }))
            .with_location("/api/products/5")
            .into_response();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/api/products/5"
        );
        assert_eq!(body_json(response).await, json!({ "data": { "id": 5 } }));
    }

    #[tokio::test]
    async fn test_created_without_location_has_no_header() {
        let response = Created::new(1).into_response();
        assert!(response.headers().get(header::LOCATION).is_none());
        assert_eq!(body_json(response).await, json!({ "data": 1 }));
    }
}
