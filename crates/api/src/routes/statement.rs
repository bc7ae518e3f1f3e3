//! Statement Routes

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::{ApiError, AppState};
use billing::{predict_bill, render_statement, PREDICTION_WINDOW};

/// Download the bill statement as a self-contained HTML document
pub async fn download_statement(
    State(state): State<Arc<AppState>>,
) -> Result<Response, ApiError> {
    let records = state.store.list_all().await?;
    let recent = state.store.list_recent(PREDICTION_WINDOW).await?;
    let prediction = predict_bill(&recent).display_text();

    let html = render_statement(&prediction, &records, &state.account);

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"electricity_bill.html\"",
            ),
        ],
        html,
    )
        .into_response())
}
