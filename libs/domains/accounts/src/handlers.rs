use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_helpers::{
    clear_session_cookie, extract_session_token, session_cookie, ErrorResponse, ValidatedJson,
};
use core_config::Environment;
use serde::Serialize;
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use access_control::Actor;

use crate::error::{AccountError, AccountResult};
use crate::models::{LoginRequest, RegisterRequest, UpdateProfile, UserResponse};
use crate::repository::UserRepository;
use crate::service::{AccountService, LogoutOutcome};

/// OpenAPI documentation for the Accounts API
#[derive(OpenApi)]
#[openapi(
    paths(
        register,
        login,
        logout,
        show_profile,
        update_profile,
        delete_profile,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        UpdateProfile,
        UserResponse,
        AuthResponse,
        MessageResponse,
        ErrorResponse
    )),
    tags(
        (name = "Accounts", description = "Registration, sessions, and profiles")
    )
)]
pub struct ApiDoc;

/// Create the accounts router with all HTTP endpoints
pub fn router<R: UserRepository + 'static>(service: AccountService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route(
            "/profile/{id}",
            get(show_profile).put(update_profile).delete(delete_profile),
        )
        .with_state(shared_service)
}

/// Response carrying the authenticated identity
#[derive(Debug, Serialize, ToSchema)]
struct AuthResponse {
    user: UserResponse,
}

#[derive(Debug, Serialize, ToSchema)]
struct MessageResponse {
    message: String,
}

/// Resolve the requesting actor from the session credential, if any
async fn current_actor<R: UserRepository>(
    service: &AccountService<R>,
    headers: &HeaderMap,
) -> AccountResult<Option<Actor>> {
    let token = extract_session_token(headers);
    service.authenticate(token.as_deref()).await
}

fn set_cookie_header(cookie: &str) -> AccountResult<HeaderValue> {
    HeaderValue::from_str(cookie)
        .map_err(|e| AccountError::Internal(format!("Failed to build cookie header: {}", e)))
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/register",
    tag = "Accounts",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created, session established", body = AuthResponse),
        (status = 409, description = "Email already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn register<R: UserRepository>(
    State(service): State<Arc<AccountService<R>>>,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AccountResult<impl IntoResponse> {
    let (user, token) = service.register(input).await?;

    let secure = Environment::from_env().is_production();
    let cookie = set_cookie_header(&session_cookie(&token, secure))?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user }),
    ))
}

/// Authenticate with email and password
#[utoipa::path(
    post,
    path = "/login",
    tag = "Accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Fresh session established", body = AuthResponse),
        (status = 401, description = "Invalid email or password", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn login<R: UserRepository>(
    State(service): State<Arc<AccountService<R>>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AccountResult<impl IntoResponse> {
    let (user, token) = service.login(input).await?;

    let secure = Environment::from_env().is_production();
    let cookie = set_cookie_header(&session_cookie(&token, secure))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(AuthResponse { user }),
    ))
}

/// End the current session. Always succeeds; logging out without a live
/// session is benign.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Accounts",
    responses(
        (status = 200, description = "Session cleared", body = MessageResponse)
    )
)]
async fn logout<R: UserRepository>(
    State(service): State<Arc<AccountService<R>>>,
    headers: HeaderMap,
) -> AccountResult<impl IntoResponse> {
    let actor = current_actor(&service, &headers).await?;
    let outcome = service.logout(actor.as_ref()).await?;

    let message = match outcome {
        LogoutOutcome::LoggedOut => "Logged out",
        LogoutOutcome::NotLoggedIn => "User is not logged in",
    };

    let secure = Environment::from_env().is_production();
    let cookie = set_cookie_header(&clear_session_cookie(secure))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: message.to_string(),
        }),
    ))
}

/// View a profile (self only)
#[utoipa::path(
    get,
    path = "/profile/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile found", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the profile owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn show_profile<R: UserRepository>(
    State(service): State<Arc<AccountService<R>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AccountResult<Json<UserResponse>> {
    let actor = current_actor(&service, &headers).await?;
    let user = service.view_profile(actor.as_ref(), id).await?;
    Ok(Json(user))
}

/// Update a profile (self only)
#[utoipa::path(
    put,
    path = "/profile/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    request_body = UpdateProfile,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the profile owner", body = ErrorResponse),
        (status = 409, description = "Email already taken", body = ErrorResponse),
        (status = 422, description = "Validation failed", body = ErrorResponse)
    )
)]
async fn update_profile<R: UserRepository>(
    State(service): State<Arc<AccountService<R>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    ValidatedJson(input): ValidatedJson<UpdateProfile>,
) -> AccountResult<Json<UserResponse>> {
    let actor = current_actor(&service, &headers).await?;
    let user = service.update_profile(actor.as_ref(), id, input).await?;
    Ok(Json(user))
}

/// Delete a profile (self only)
#[utoipa::path(
    delete,
    path = "/profile/{id}",
    tag = "Accounts",
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile deleted, session cleared", body = MessageResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Not the profile owner", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
async fn delete_profile<R: UserRepository>(
    State(service): State<Arc<AccountService<R>>>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> AccountResult<impl IntoResponse> {
    let actor = current_actor(&service, &headers).await?;
    service.delete_profile(actor.as_ref(), id).await?;

    let secure = Environment::from_env().is_production();
    let cookie = set_cookie_header(&clear_session_cookie(secure))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(MessageResponse {
            message: "Profile deleted".to_string(),
        }),
    ))
}
