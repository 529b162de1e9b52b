// Request body extraction
// Author: kelexine (https://github.com/kelexine)

use crate::error::ApiError;
use axum::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::Form;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Body extractor accepting JSON or urlencoded forms.
///
/// Anything that is not a form is parsed as JSON regardless of the declared
/// content type, and an empty body reads as `{}` so that missing fields are
/// reported by validation rather than by the parser.
pub struct Payload<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let Form(value) = Form::<T>::from_request(req, state).await.map_err(|e| {
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    ApiError::PayloadTooLarge(e.body_text())
                } else {
                    ApiError::Validation(format!("Invalid form body: {}", e.body_text()))
                }
            })?;
            return Ok(Self(value));
        }

        let body = Bytes::from_request(req, state).await.map_err(|e| {
            if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ApiError::PayloadTooLarge(e.body_text())
            } else {
                ApiError::Validation(e.body_text())
            }
        })?;

        let body: &[u8] = if body.iter().all(u8::is_ascii_whitespace) {
            b"{}"
        } else {
            &body
        };

        serde_json::from_slice(body).map(Self).map_err(|e| {
            debug!("Rejected JSON body: {}", e);
            ApiError::Validation(format!("Invalid JSON body: {}", e))
        })
    }
}

/// Query string extractor whose rejections render as envelope errors.
pub struct ApiQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(e.body_text()))?;
        Ok(Self(value))
    }
}

/// Path parameter extractor whose rejections render as envelope errors.
pub struct ApiPath<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                // Missing or mismatched route captures are wiring bugs, not bad input.
                if e.status().is_server_error() {
                    ApiError::Internal(e.body_text())
                } else {
                    ApiError::Validation(e.body_text())
                }
            })?;
        Ok(Self(value))
    }
}
