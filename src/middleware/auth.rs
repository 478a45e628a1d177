use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::models::user::UserRole;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: UserRole,
}

impl Claims {
    /// The token subject parsed back to a user id.
    pub fn user_id(&self) -> crate::error::Result<uuid::Uuid> {
        uuid::Uuid::parse_str(&self.sub).map_err(|_| {
            crate::error::Error::Unauthorized("Not authorized, token failed".to_string())
        })
    }
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": message})),
    )
        .into_response()
}

async fn authorize(mut req: Request, next: Next, allowed: &[UserRole]) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return unauthorized("Not authorized, no token");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("Not authorized, malformed authorization header");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("Not authorized, no token");
    };

    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => {
            if !allowed.is_empty() && !allowed.contains(&data.claims.role) {
                return (
                    StatusCode::FORBIDDEN,
                    Json(json!({
                        "success": false,
                        "message": format!(
                            "Role '{}' is not authorized to access this route",
                            data.claims.role
                        )
                    })),
                )
                    .into_response();
            }
            req.extensions_mut().insert(data.claims);
            next.run(req).await
        }
        Err(_) => unauthorized("Not authorized, token failed"),
    }
}

/// Any authenticated user.
pub async fn require_auth(req: Request, next: Next) -> Response {
    authorize(req, next, &[]).await
}

pub async fn require_employee(req: Request, next: Next) -> Response {
    authorize(req, next, &[UserRole::Employee]).await
}

pub async fn require_manager(req: Request, next: Next) -> Response {
    authorize(req, next, &[UserRole::Manager]).await
}
