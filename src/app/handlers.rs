use crate::app::AppState;
use crate::domain::model::SynthesisResult;
use crate::utils::error::{Result, SynthesisError};
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::Uri,
    Json,
};
use serde_json::{json, Value};

pub async fn root() -> Json<Value> {
    Json(json!({
        "service": "Chemical Synthesis API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "synthesis": "/synthesis/<cas_number>",
            "health": "/health"
        },
        "example": "/synthesis/64-17-5"
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn synthesis(
    State(state): State<AppState>,
    uri: Uri,
    cas_number: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<SynthesisResult>> {
    // undecodable segments (e.g. invalid UTF-8) are reported in their raw form
    let Path(cas_number) = cas_number.map_err(|_| SynthesisError::ValidationError {
        input: uri.path().rsplit('/').next().unwrap_or_default().to_string(),
    })?;

    let result = state.service.lookup(&cas_number).await?;
    Ok(Json(result))
}
