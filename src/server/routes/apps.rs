use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::apps::{CreateAppRequest, provision_app};
use crate::error::AppdockError;
use crate::server::AppdockState;

/// `POST /v1/apps`: provision a new app workspace.
pub async fn create_app(
    State(state): State<AppdockState>,
    Json(req): Json<CreateAppRequest>,
) -> Result<impl IntoResponse, AppdockError> {
    let app = provision_app(&state, &req).await?;
    Ok((StatusCode::CREATED, Json(app)))
}
