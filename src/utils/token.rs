use crate::config::get_config;
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::models::user::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};

/// Issue an HS256 bearer token for a user. The subject is the user id; the
/// role claim is what the route guards check.
pub fn issue_token(user: &User) -> Result<String> {
    let config = get_config();
    let exp = (Utc::now() + Duration::hours(config.jwt_ttl_hours)).timestamp() as usize;

    let claims = Claims {
        sub: user.id.to_string(),
        exp,
        role: user.role,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;
    Ok(token)
}
