use crate::{
    auth::middleware::CurrentUser,
    types::{AppError, Result, UserResponse},
    AppState,
};
use axum::{extract::State, Json};

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/users/me",
    responses(
        (status = 200, description = "Profile of the authenticated user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<UserResponse>> {
    let user = state
        .users
        .find_by_id(principal.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user.into()))
}

/// List all user accounts (admin only)
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "All user accounts", body = [UserResponse]),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer" = [])),
    tag = "users"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.list().await?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}
