use axum::{body::Body, extract::Request, http::StatusCode, middleware::Next, response::Response};
use contracts::system::auth::{Role, TokenClaims};

fn bearer_token(req: &Request<Body>) -> Result<String, StatusCode> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(StatusCode::UNAUTHORIZED)
}

async fn claims_for(token: String) -> Result<TokenClaims, StatusCode> {
    super::jwt::validate_token(&token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)
}

/// Any signed-in user
pub async fn require_auth(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_for(bearer_token(&req)?).await?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Managers and admins (cost and margin data)
pub async fn require_manager(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_for(bearer_token(&req)?).await?;
    if !claims.role.is_premium() {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

pub async fn require_admin(mut req: Request<Body>, next: Next) -> Result<Response, StatusCode> {
    let claims = claims_for(bearer_token(&req)?).await?;
    if claims.role != Role::Admin {
        return Err(StatusCode::FORBIDDEN);
    }
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
