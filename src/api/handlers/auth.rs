use crate::{
    auth::password,
    db::NewUser,
    types::{
        AppError, LoginRequest, RefreshRequest, RegisterRequest, Result, Role, TokenResponse,
    },
    AppState,
};
use axum::{extract::State, Json};

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = TokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email or username already taken")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<Json<TokenResponse>> {
    // Validate input
    if payload.username.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "Username and email are required".to_string(),
        ));
    }
    if payload.password.len() < 8 {
        return Err(AppError::InvalidInput(
            "Password must be at least 8 characters".to_string(),
        ));
    }

    // Check for existing accounts
    if state.users.email_exists(&payload.email).await? {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }
    if state.users.username_exists(&payload.username).await? {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }

    // Hash password and create the account
    let password_hash = password::hash_password(&payload.password)?;
    let user = state
        .users
        .create(NewUser {
            username: payload.username,
            email: payload.email,
            password_hash,
            full_name: payload.full_name,
            role: Role::Learner,
        })
        .await?;

    // Issue tokens
    let tokens = state.tokens.issue_token_pair(user.id, &user.email, user.role)?;

    Ok(Json(tokens))
}

/// Login with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    // Get user
    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid credentials".to_string()))?;

    // Verify password
    if !password::verify_password(&payload.password, &user.password_hash)? {
        return Err(AppError::Auth("Invalid credentials".to_string()));
    }

    if !user.is_active {
        return Err(AppError::Auth("Account is disabled".to_string()));
    }

    state.users.touch_last_login(user.id).await?;

    // Issue tokens
    let tokens = state.tokens.issue_token_pair(user.id, &user.email, user.role)?;

    Ok(Json(tokens))
}

/// Exchange a refresh token for a fresh token pair
pub async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>> {
    let claims = state
        .tokens
        .parse_claims(&payload.refresh_token)
        .map_err(|e| AppError::Auth(format!("Invalid refresh token: {}", e)))?;

    // Access tokens carry email/role; only refresh-shaped tokens are
    // redeemable here.
    if claims.email.is_some() || claims.role.is_some() {
        return Err(AppError::Auth("Not a refresh token".to_string()));
    }

    let user_id: i64 = claims
        .sub
        .parse()
        .map_err(|_| AppError::Auth("Invalid refresh token".to_string()))?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| AppError::Auth("Invalid refresh token".to_string()))?;

    if !user.is_active {
        return Err(AppError::Auth("Account is disabled".to_string()));
    }

    let tokens = state.tokens.issue_token_pair(user.id, &user.email, user.role)?;

    Ok(Json(tokens))
}
