//! Auth endpoints. These run before a session exists, so they skip the
//! token handling in `api_utils`.

use contracts::system::auth::{
    LoginRequest, LoginResponse, RefreshRequest, RefreshResponse, UserInfo,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::api_utils::api_url;

async fn post<B: Serialize>(path: &str, body: &B) -> Result<Response, String> {
    Request::post(&api_url(path))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Server unreachable: {}", e))
}

async fn read<T: DeserializeOwned>(response: Response, action: &str) -> Result<T, String> {
    if !response.ok() {
        return Err(format!("{} failed: {}", action, response.status()));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn login(username: String, password: String) -> Result<LoginResponse, String> {
    let response = post("/api/system/auth/login", &LoginRequest { username, password }).await?;
    if response.status() == 401 {
        return Err("Invalid username or password".to_string());
    }
    read(response, "Sign in").await
}

/// Swaps a refresh token for a new access token
pub async fn refresh_token(refresh_token: String) -> Result<RefreshResponse, String> {
    let response = post("/api/system/auth/refresh", &RefreshRequest { refresh_token }).await?;
    read(response, "Session refresh").await
}

/// Revokes the refresh token on the server
pub async fn logout(refresh_token: String) -> Result<(), String> {
    let response = post("/api/system/auth/logout", &RefreshRequest { refresh_token }).await?;
    if !response.ok() {
        return Err(format!("Sign out failed: {}", response.status()));
    }
    Ok(())
}

pub async fn get_current_user(access_token: &str) -> Result<UserInfo, String> {
    let response = Request::get(&api_url("/api/system/auth/me"))
        .header("Authorization", &format!("Bearer {}", access_token))
        .send()
        .await
        .map_err(|e| format!("Server unreachable: {}", e))?;
    read(response, "Session check").await
}
