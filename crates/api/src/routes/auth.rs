//! Authentication routes for register, login, and token refresh.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use atlasbank_core::auth::{hash_password, verify_password};
use atlasbank_db::{AccountRepository, UserRepository};
use atlasbank_shared::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RegisterRequest, UserInfo,
};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh))
}

/// POST /auth/register - Register a new user with their checking account.
async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let email = payload.email.trim().to_lowercase();

    // Check if email already exists
    match user_repo.email_exists(&email).await {
        Ok(true) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(false) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during registration"
                })),
            )
                .into_response();
        }
    }

    // Hash password
    let password_hash = match hash_password(&payload.password) {
        Ok(h) => h,
        Err(e) => {
            error!(error = %e, "Failed to hash password");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during registration"
                })),
            )
                .into_response();
        }
    };

    // Create user + checking account in one transaction
    match user_repo
        .register(&email, &password_hash, &payload.full_name)
        .await
    {
        Ok((user, account)) => {
            info!(user_id = %user.id, "User registered");

            (
                StatusCode::CREATED,
                Json(json!({
                    "user": UserInfo {
                        id: user.id,
                        email: user.email,
                        full_name: user.full_name,
                        account_id: account.id,
                    },
                    "message": "Account approved. Log in to continue."
                })),
            )
                .into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to register user");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during registration"
                })),
            )
                .into_response()
        }
    }
}

/// POST /auth/login - Authenticate user and return tokens.
async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    let user_repo = UserRepository::new((*state.db).clone());
    let email = payload.email.trim().to_lowercase();

    // Find user by email
    let user = match user_repo.find_by_email(&email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %email, "Login attempt for non-existent user");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    // Verify password
    match verify_password(&payload.password, &user.password_hash) {
        Ok(true) => {}
        Ok(false) => {
            info!(user_id = %user.id, "Failed login attempt - invalid password");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Password verification error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    }

    // The user's account carries the session's ledger context
    let account_repo = AccountRepository::new((*state.db).clone());
    let account = match account_repo.find_by_user(user.id).await {
        Ok(Some(a)) => a,
        Ok(None) => {
            error!(user_id = %user.id, "User has no account");
            return (
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "no_account",
                    "message": "User has no bank account"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to load user account");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    // Generate tokens
    let access_token = match state.jwt_service.generate_access_token(user.id, account.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    let refresh_token = match state.jwt_service.generate_refresh_token(user.id, account.id) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    let response = LoginResponse {
        user: UserInfo {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            account_id: account.id,
        },
        access_token,
        refresh_token,
        expires_in: state.jwt_service.access_token_expires_in(),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// POST /auth/refresh - Exchange a refresh token for a new token pair.
async fn refresh(
    State(state): State<AppState>,
    Json(payload): Json<RefreshRequest>,
) -> impl IntoResponse {
    let claims = match state.jwt_service.validate_token(&payload.refresh_token) {
        Ok(c) => c,
        Err(atlasbank_shared::JwtError::Expired) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "token_expired",
                    "message": "Refresh token has expired"
                })),
            )
                .into_response();
        }
        Err(_) => {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_token",
                    "message": "Invalid or malformed token"
                })),
            )
                .into_response();
        }
    };

    let access_token = match state
        .jwt_service
        .generate_access_token(claims.user_id(), claims.account_id())
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate access token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during token refresh"
                })),
            )
                .into_response();
        }
    };

    let refresh_token = match state
        .jwt_service
        .generate_refresh_token(claims.user_id(), claims.account_id())
    {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to generate refresh token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during token refresh"
                })),
            )
                .into_response();
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "access_token": access_token,
            "refresh_token": refresh_token,
            "expires_in": state.jwt_service.access_token_expires_in()
        })),
    )
        .into_response()
}
