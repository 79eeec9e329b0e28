//! Usuario id path parameter extractor.

use axum::{
    extract::{FromRequestParts, Path},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::debug;

use super::ErrorBody;
use crate::domain::UsuarioId;

/// Extracts the `{id}` path segment as a [`UsuarioId`].
///
/// Anything that is not exactly 24 hex characters is answered with
/// `400 {"success": false, "error": "malformed ID"}` before the handler runs.
pub struct UsuarioIdPath(pub UsuarioId);

impl<S> FromRequestParts<S> for UsuarioIdPath
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let malformed = || (StatusCode::BAD_REQUEST, Json(ErrorBody::malformed_id())).into_response();

        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| malformed())?;

        match UsuarioId::parse(&raw) {
            Ok(id) => Ok(UsuarioIdPath(id)),
            Err(e) => {
                debug!(error = %e, "Rejected usuario id");
                Err(malformed())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    async fn handler(UsuarioIdPath(id): UsuarioIdPath) -> String {
        id.to_string()
    }

    async fn get_path(uri: &str) -> axum::http::Response<Body> {
        Router::new()
            .route("/usuarios/{id}", get(handler))
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn well_formed_id_reaches_handler() {
        let resp = get_path("/usuarios/5D1E2B3C4A5F6E7D8C9B0A1F").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"5d1e2b3c4a5f6e7d8c9b0a1f");
    }

    #[tokio::test]
    async fn malformed_id_is_400() {
        for uri in ["/usuarios/123", "/usuarios/zzzzzzzzzzzzzzzzzzzzzzzz"] {
            let resp = get_path(uri).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);
            let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, serde_json::json!({"success": false, "error": "malformed ID"}));
        }
    }
}
