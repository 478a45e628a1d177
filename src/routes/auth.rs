use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use validator::Validate;

use crate::{
    dto::{
        auth_dto::{
            AuthResponse, LoginPayload, RegisterPayload, UpdateProfilePayload, UserResponse,
        },
        ApiResponse,
    },
    error::{Error, Result},
    middleware::auth::Claims,
    models::user::UserRole,
    utils::{crypto, token},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "User registered successfully", body = Object),
        (status = 400, description = "Duplicate email or employee ID", body = Object)
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    if state
        .user_service
        .find_by_email(&payload.email)
        .await?
        .is_some()
    {
        return Err(Error::BadRequest("User already exists".to_string()));
    }
    if state
        .user_service
        .find_by_employee_id(&payload.employee_id)
        .await?
        .is_some()
    {
        return Err(Error::BadRequest("Employee ID already exists".to_string()));
    }

    let password_hash = crypto::hash_password(&payload.password)
        .map_err(|e| Error::Internal(format!("Password hashing failed: {e}")))?;
    let role = payload.role.unwrap_or(UserRole::Employee);

    let user = state
        .user_service
        .create(
            &payload.name,
            &payload.email,
            &password_hash,
            role,
            &payload.employee_id,
            &payload.department,
        )
        .await?;
    let token = token::issue_token(&user)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            "User registered successfully",
            AuthResponse {
                user: user.into(),
                token,
            },
        )),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login successful", body = Object),
        (status = 401, description = "Invalid email or password", body = Object)
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .find_by_email(&payload.email)
        .await?
        .ok_or_else(|| Error::Unauthorized("Invalid email or password".to_string()))?;

    let ok = crypto::verify_password(&payload.password, &user.password_hash)
        .map_err(|e| Error::Internal(format!("Password verification failed: {e}")))?;
    if !ok {
        return Err(Error::Unauthorized("Invalid email or password".to_string()));
    }

    let token = token::issue_token(&user)?;
    Ok(Json(ApiResponse::new(
        "Login successful",
        AuthResponse {
            user: user.into(),
            token,
        },
    )))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses((status = 200, description = "Current user profile", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    Ok(Json(ApiResponse::new(
        "User retrieved successfully",
        UserResponse::from(user),
    )))
}

#[utoipa::path(
    put,
    path = "/api/auth/profile",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Profile updated successfully", body = Object),
        (status = 400, description = "Email already in use", body = Object)
    ),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;

    let user = state
        .user_service
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| Error::NotFound("User not found".to_string()))?;

    if let Some(new_email) = payload.email.as_deref() {
        if new_email != user.email
            && state
                .user_service
                .find_by_email(new_email)
                .await?
                .is_some()
        {
            return Err(Error::BadRequest("Email already in use".to_string()));
        }
    }

    let updated = state
        .user_service
        .update_profile(
            user.id,
            payload.name.as_deref(),
            payload.email.as_deref(),
            payload.department.as_deref(),
        )
        .await?;
    let token = token::issue_token(&updated)?;

    Ok(Json(ApiResponse::new(
        "Profile updated successfully",
        AuthResponse {
            user: updated.into(),
            token,
        },
    )))
}

#[utoipa::path(
    get,
    path = "/api/auth/users",
    responses((status = 200, description = "Employees sorted by name", body = Object)),
    security(("bearer_auth" = [])),
    tag = "Auth"
)]
pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.user_service.list_employees().await?;
    let users: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::new("Users retrieved successfully", users)))
}
