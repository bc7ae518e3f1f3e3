//! Prediction Routes

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::{ApiError, AppState};
use billing::{predict_bill, PREDICTION_WINDOW};

/// Response for the prediction endpoint
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    /// Sentinel text, or the predicted amount formatted as currency
    #[serde(rename = "predictedBill")]
    pub predicted_bill: String,
}

/// Get the predicted next bill
pub async fn get_prediction(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PredictionResponse>, ApiError> {
    let recent = state.store.list_recent(PREDICTION_WINDOW).await?;
    let prediction = predict_bill(&recent);

    Ok(Json(PredictionResponse {
        predicted_bill: prediction.display_text(),
    }))
}
