use axum::{
    body::Body,
    http::Request,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use shared_models::auth::AuthUser;
use shared_models::error::AppError;
use shared_models::records::AccountType;

// The gateway in front of this service authenticates the caller and forwards
// the verified identity in these headers. Session mechanics live there, not
// here.
pub const ACCOUNT_ID_HEADER: &str = "x-account-id";
pub const ACCOUNT_TYPE_HEADER: &str = "x-account-type";

// Middleware for caller identity - reads gateway-verified headers
pub async fn identity_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let account_id = request
        .headers()
        .get(ACCOUNT_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing caller identity".to_string()))?;

    let account_id = Uuid::parse_str(account_id)
        .map_err(|_| AppError::Auth("Malformed caller identity".to_string()))?;

    let account_type = request
        .headers()
        .get(ACCOUNT_TYPE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Auth("Missing caller role".to_string()))?;

    let account_type = match account_type {
        "patient" => AccountType::Patient,
        "doctor" => AccountType::Doctor,
        "admin" => AccountType::Admin,
        _ => return Err(AppError::Auth("Unknown caller role".to_string())),
    };

    // Add caller to request extensions
    request
        .extensions_mut()
        .insert(AuthUser::new(account_id, account_type));

    Ok(next.run(request).await)
}
