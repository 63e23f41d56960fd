use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use tinyurl_core::Store;
use tinyurl_generator::Generator;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::model::{ShortenRequest, ShortenResponse};
use crate::state::AppState;

pub async fn shorten_handler<S: Store, G: Generator>(
    State(state): State<AppState<S, G>>,
    Json(request): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>> {
    if request.url.trim().is_empty() {
        return Err(AppError::bad_request("url cannot be empty"));
    }

    let short = state.shortener().shorten_url(&request.url).await?;
    debug!(short = %short.short, "created short url");

    Ok(Json(ShortenResponse {
        short: short.short,
        url: request.url,
    }))
}

pub async fn redirect_handler<S: Store, G: Generator>(
    Path(short_url): Path<String>,
    State(state): State<AppState<S, G>>,
) -> Result<Response> {
    let url = state.shortener().url(&short_url).await?;

    let location = HeaderValue::from_str(&url).map_err(|e| {
        warn!(code = %short_url, error = %e, "stored url is not a valid location header");
        AppError::new(StatusCode::UNPROCESSABLE_ENTITY, "stored url cannot be redirected to")
    })?;

    Ok((StatusCode::TEMPORARY_REDIRECT, [(header::LOCATION, location)]).into_response())
}
