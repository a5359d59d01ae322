use web_sys::window;

const ACCESS_TOKEN_KEY: &str = "auth_access_token";
const REFRESH_TOKEN_KEY: &str = "auth_refresh_token";

fn local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    local_storage()?
        .get_item(key)
        .ok()?
        .filter(|value| !value.is_empty())
}

fn write(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub fn save_access_token(token: &str) {
    write(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY)
}

pub fn save_refresh_token(token: &str) {
    write(REFRESH_TOKEN_KEY, token);
}

pub fn get_refresh_token() -> Option<String> {
    read(REFRESH_TOKEN_KEY)
}

/// Drops both tokens; the next load starts at the login page.
pub fn clear_tokens() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(ACCESS_TOKEN_KEY);
        let _ = storage.remove_item(REFRESH_TOKEN_KEY);
    }
}
