use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde_json::json;
use tracing::info;
use validator::Validate;

use super::AppState;
use crate::ai::comment;
use crate::models::{CommentReply, CommentRequest, ImageArtifacts, ImageRequest};
use crate::{pipeline, Error, Result};

fn parse_body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| Error::Validation(rejection.body_text()))
}

pub(crate) async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "creator-proxy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub(crate) async fn create_comment_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CommentRequest>, JsonRejection>,
) -> Result<Json<CommentReply>> {
    let request = parse_body(payload)?;
    request.validate()?;

    info!(style = request.style(), "Generating comment reply");
    let reply = comment::respond(&state.config, state.http.clone(), request).await?;
    Ok(Json(reply))
}

pub(crate) async fn create_image_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<ImageArtifacts>> {
    let request = parse_body(payload)?;

    let artifacts = pipeline::run(&state.config, request, &state.store, &state.http).await?;
    info!(
        file = artifacts.file.as_deref().unwrap_or("-"),
        thumb = artifacts.thumb.as_deref().unwrap_or("-"),
        "Image request completed"
    );
    Ok(Json(artifacts))
}
