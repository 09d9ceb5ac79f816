use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use mergington::data::{ActivityDirectory, MessageResponse, SignupQuery};
use mergington::log;

use super::ApiError;
use crate::services::ActivityService;

/// Handler to list every activity with its participants
pub async fn list(
    State(state): State<Arc<crate::AppState>>,
) -> Result<Json<ActivityDirectory>, ApiError> {
    let activities = state.activities.list().await?;
    Ok(Json(activities))
}

/// Handler to sign a student up for an activity
#[tracing::instrument(skip(state))]
pub async fn signup(
    State(state): State<Arc<crate::AppState>>,
    Path(activity): Path<String>,
    Query(SignupQuery { email }): Query<SignupQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.activities.signup(&activity, &email).await?;
    log::info!("Signed up {} for {}", email, activity);
    Ok(Json(MessageResponse::signed_up(&email, &activity)))
}

/// Handler to remove a student from an activity
#[tracing::instrument(skip(state))]
pub async fn unregister(
    State(state): State<Arc<crate::AppState>>,
    Path(activity): Path<String>,
    Query(SignupQuery { email }): Query<SignupQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.activities.unregister(&activity, &email).await?;
    log::info!("Unregistered {} from {}", email, activity);
    Ok(Json(MessageResponse::unregistered(&email, &activity)))
}
