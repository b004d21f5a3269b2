use crate::state::AppState;
use axum::{
    Json, Router,
    extract::{
        DefaultBodyLimit, Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    routing::{get, post},
};
use shared::error::ErrorCode;
use shared::request::UsersQuery;
use shared::{ApiResponse, CreateUserRequest, CurrentUser, Role, UpdateUserRequest, User, UsersPage, VerificationResult};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use validator::Validate;

type Reply<T> = (StatusCode, Json<ApiResponse<T>>);

const USERS_READ: &str = "users.read";
const USERS_WRITE: &str = "users.write";

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/auth/verify-token", post(verify_token))
        .route("/api/v1/auth/me", get(current_user))
        .route("/api/v1/roles", get(list_roles))
        .route("/api/v1/users", get(list_users).post(create_user))
        .route(
            "/api/v1/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(64 * 1024))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn ok<T>(status: StatusCode, data: T, message: &str) -> Reply<T> {
    let body = ApiResponse::ok(data)
        .with_trx_id(uuid::Uuid::new_v4().to_string())
        .with_message(message);
    (
        status,
        Json(ApiResponse {
            code: i32::from(status.as_u16()),
            ..body
        }),
    )
}

fn fail<T: Default>(code: ErrorCode, message: impl Into<String>) -> Reply<T> {
    let status = code.http_status();
    let body = ApiResponse::error(
        i32::from(status.as_u16()),
        code.status(),
        code.as_str(),
        message,
    )
    .with_trx_id(uuid::Uuid::new_v4().to_string());
    (status, Json(body))
}

fn fail_default<T: Default>(code: ErrorCode) -> Reply<T> {
    fail(code, code.message())
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, ErrorCode> {
    let token = bearer(headers).ok_or(ErrorCode::InvalidToken)?;
    state.authenticate(token).await
}

async fn require(state: &AppState, headers: &HeaderMap, permission: &str) -> Result<CurrentUser, ErrorCode> {
    let token = bearer(headers).ok_or(ErrorCode::InvalidToken)?;
    state.authorize(token, permission).await
}

/// Decode a JSON body and run its validation rules
fn validated<T: Validate>(body: Result<Json<T>, JsonRejection>) -> Result<T, (ErrorCode, String)> {
    let Json(req) = body.map_err(|e| (ErrorCode::InvalidRequest, e.body_text()))?;
    req.validate()
        .map_err(|e| (ErrorCode::ValidationError, e.to_string()))?;
    Ok(req)
}

/// POST /api/v1/auth/verify-token
async fn verify_token(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Reply<VerificationResult> {
    let Some(token) = bearer(&headers) else {
        return fail_default(ErrorCode::InvalidToken);
    };
    match state.verify(token).await {
        Some(result) => {
            tracing::info!(user_id = %result.user.id, valid = result.valid, "Token verified");
            ok(StatusCode::OK, result, "")
        }
        None => fail_default(ErrorCode::InvalidToken),
    }
}

/// GET /api/v1/auth/me
async fn current_user(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Reply<CurrentUser> {
    match authenticate(&state, &headers).await {
        Ok(user) => ok(StatusCode::OK, user, ""),
        Err(code) => fail_default(code),
    }
}

/// GET /api/v1/roles
async fn list_roles(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Reply<Vec<Role>> {
    if let Err(code) = authenticate(&state, &headers).await {
        return fail_default(code);
    }
    ok(StatusCode::OK, state.roles().await, "")
}

/// GET /api/v1/users
async fn list_users(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    query: Result<Query<UsersQuery>, QueryRejection>,
) -> Reply<UsersPage> {
    if let Err(code) = require(&state, &headers, USERS_READ).await {
        return fail_default(code);
    }
    let Query(query) = match query {
        Ok(query) => query,
        Err(e) => return fail(ErrorCode::InvalidRequest, e.body_text()),
    };
    ok(StatusCode::OK, state.list_users(&query).await, "")
}

/// POST /api/v1/users
async fn create_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Reply<User> {
    if let Err(code) = require(&state, &headers, USERS_WRITE).await {
        return fail_default(code);
    }
    let req = match validated(body) {
        Ok(req) => req,
        Err((code, message)) => return fail(code, message),
    };
    match state.create_user(req).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User created");
            ok(StatusCode::CREATED, user, "User created")
        }
        Err(code) => fail_default(code),
    }
}

/// GET /api/v1/users/{id}
async fn get_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<User> {
    if let Err(code) = require(&state, &headers, USERS_READ).await {
        return fail_default(code);
    }
    match state.get_user(&id).await {
        Ok(user) => ok(StatusCode::OK, user, ""),
        Err(code) => fail_default(code),
    }
}

/// PUT /api/v1/users/{id}
async fn update_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Reply<User> {
    if let Err(code) = require(&state, &headers, USERS_WRITE).await {
        return fail_default(code);
    }
    let req = match validated(body) {
        Ok(req) => req,
        Err((code, message)) => return fail(code, message),
    };
    match state.update_user(&id, req).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "User updated");
            ok(StatusCode::OK, user, "User updated")
        }
        Err(code) => fail_default(code),
    }
}

/// DELETE /api/v1/users/{id}
async fn delete_user(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply<serde_json::Value> {
    if let Err(code) = require(&state, &headers, USERS_WRITE).await {
        return fail_default(code);
    }
    match state.delete_user(&id).await {
        Ok(()) => {
            tracing::info!(user_id = %id, "User deleted");
            ok(StatusCode::OK, serde_json::json!({ "id": id }), "User deleted")
        }
        Err(code) => fail_default(code),
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
