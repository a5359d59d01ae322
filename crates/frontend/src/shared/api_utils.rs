//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and making
//! authenticated JSON requests.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::system::auth::storage;

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location,
/// using port 3000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path
///
/// # Example
/// ```rust,no_run
/// # use frontend::shared::api_utils::api_url;
/// let url = api_url("/api/meals/123");
/// ```
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Path segment escaped for table names like "Table 3".
pub fn encode_segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

fn with_auth(builder: RequestBuilder) -> RequestBuilder {
    match storage::get_access_token() {
        Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
        None => builder,
    }
}

/// Turns a non-2xx response into the server's message. An expired session
/// drops the stored tokens and reloads into the login page.
async fn check(response: Response) -> Result<Response, String> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    if status == 401 {
        storage::clear_tokens();
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
        return Err("Session expired".to_string());
    }
    let body = response.text().await.unwrap_or_default();
    if body.trim().is_empty() {
        Err(format!("Request failed: {}", status))
    } else {
        Err(body)
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    check(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::get(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn post_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::post(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

pub async fn put_json<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, String> {
    let response = with_auth(Request::put(&api_url(path)))
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

/// PUT/POST for endpoints answering with an empty body.
pub async fn send_no_content<B: Serialize>(method: &str, path: &str, body: &B) -> Result<(), String> {
    let url = api_url(path);
    let builder = match method {
        "POST" => Request::post(&url),
        _ => Request::put(&url),
    };
    let response = with_auth(builder)
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    check(response).await.map(|_| ())
}

pub async fn delete(path: &str) -> Result<(), String> {
    let response = with_auth(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    check(response).await.map(|_| ())
}

pub async fn delete_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let response = with_auth(Request::delete(&api_url(path)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_json(response).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("Table 3"), "Table%203");
        assert_eq!(encode_segment("T/1"), "T%2F1");
    }
}
