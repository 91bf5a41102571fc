//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub inputs: Vec<InputStatus>,
}

#[derive(Serialize)]
pub struct InputStatus {
    pub name: String,
    pub path: String,
    pub present: bool,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let inputs: Vec<InputStatus> = state
        .reports
        .data()
        .inputs()
        .into_iter()
        .map(|(name, path)| InputStatus {
            name: name.to_string(),
            path: path.display().to_string(),
            present: path.is_file(),
        })
        .collect();

    let status = if inputs.iter().all(|input| input.present) {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        inputs,
    })
}
