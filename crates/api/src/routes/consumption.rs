//! Consumption Routes

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{ApiError, AppState};
use storage::ConsumptionRecord;

/// Request body for submitting a reading
#[derive(Debug, Deserialize)]
pub struct NewReading {
    pub date: Option<String>,
    pub consumption: Option<f64>,
}

/// Response for a created reading
#[derive(Debug, Serialize)]
pub struct CreatedReading {
    pub id: i64,
}

/// Submit a reading
pub async fn add_reading(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewReading>,
) -> Result<(StatusCode, Json<CreatedReading>), ApiError> {
    let date = body.date.unwrap_or_default();
    let consumption = body.consumption.unwrap_or(0.0);

    // Truthiness semantics: an empty date, a consumption of exactly 0, and a
    // non-finite consumption all count as missing.
    if date.is_empty() || consumption == 0.0 || !consumption.is_finite() {
        return Err(ApiError::MissingFields);
    }

    let id = state.store.append(&date, consumption).await?;
    Ok((StatusCode::CREATED, Json(CreatedReading { id })))
}

/// List all readings, ascending by date
pub async fn list_readings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ConsumptionRecord>>, ApiError> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}
