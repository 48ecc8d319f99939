use crate::error::{ApiError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use shorty_core::ShortCode;
use tracing::debug;

/// `POST /` with the URL as the raw request body.
pub async fn create_text_handler(State(state): State<AppState>, body: Bytes) -> Result<Response> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Request body cannot be empty."));
    }
    let original_url = std::str::from_utf8(&body)
        .map_err(|_| ApiError::BadRequest("Request body could not be read"))?
        .trim_end_matches(['\r', '\n']);
    ensure_redirectable(original_url)?;

    let code = state.shortener().create_short_url(original_url).await?;
    let short_url = code.to_url(state.base_url());

    Ok((
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "text/plain")],
        short_url,
    )
        .into_response())
}

/// `POST /api/shorten` with `{"url": "..."}`.
pub async fn create_json_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let is_json = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"));
    if !is_json {
        return Err(ApiError::UnsupportedMediaType);
    }

    let request: ShortenRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Failed to decode request body"))?;
    if request.url.is_empty() {
        return Err(ApiError::BadRequest("URL field is missing"));
    }
    ensure_redirectable(&request.url)?;

    let code = state.shortener().create_short_url(&request.url).await?;
    let response = ShortenResponse {
        result: code.to_url(state.base_url()),
    };

    Ok((StatusCode::CREATED, Json(response)).into_response())
}

/// Rejects URLs that could not be sent back in a `Location` header.
fn ensure_redirectable(url: &str) -> Result<()> {
    HeaderValue::from_str(url)
        .map(|_| ())
        .map_err(|_| ApiError::BadRequest("Invalid URL"))
}

/// `GET /{id}` answers with a temporary redirect to the original URL.
pub async fn redirect_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect> {
    let code = ShortCode::new(id)?;
    let original_url = state.shortener().get_original_url(&code).await?;

    debug!(code = %code, url = %original_url, "redirecting");
    Ok(Redirect::temporary(&original_url))
}
