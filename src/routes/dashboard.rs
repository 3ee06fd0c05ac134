use axum::{extract::State, response::IntoResponse, Json};

use crate::{error::Result, AppState};

/// The one non-CRUD read path: summary-card counts plus the trailing
/// six-month creation series for the admin bar chart.
#[axum::debug_handler]
pub async fn get_stats(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let stats = state.dashboard_service.stats().await?;
    Ok(Json(stats))
}
