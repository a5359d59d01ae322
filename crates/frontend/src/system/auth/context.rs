use contracts::system::auth::{Role, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};

#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn role(&self) -> Role {
        self.user_info.as_ref().map(|u| u.role).unwrap_or_default()
    }

    /// Managers and admins see cost and margin data.
    pub fn is_premium(&self) -> bool {
        self.role().is_premium()
    }

    pub fn display_name(&self) -> String {
        self.user_info
            .as_ref()
            .map(|u| u.full_name.clone().filter(|n| !n.trim().is_empty()).unwrap_or_else(|| u.username.clone()))
            .unwrap_or_else(|| "Guest".to_string())
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = signal(AuthState::default());

    // Restore the session from localStorage: validate with /me, else refresh, else clear
    Effect::new(move |_| {
        spawn_local(async move {
            let Some(access_token) = storage::get_access_token() else {
                return;
            };
            if let Ok(user_info) = api::get_current_user(&access_token).await {
                set_auth_state.set(AuthState {
                    access_token: Some(access_token),
                    user_info: Some(user_info),
                });
                return;
            }

            let Some(refresh_token) = storage::get_refresh_token() else {
                storage::clear_tokens();
                return;
            };
            match api::refresh_token(refresh_token).await {
                Ok(response) => {
                    storage::save_access_token(&response.access_token);
                    if let Ok(user_info) = api::get_current_user(&response.access_token).await {
                        set_auth_state.set(AuthState {
                            access_token: Some(response.access_token),
                            user_info: Some(user_info),
                        });
                    }
                }
                Err(e) => {
                    log::warn!("Session refresh failed: {}", e);
                    storage::clear_tokens();
                }
            }
        });
    });

    provide_context(auth_state);
    provide_context(set_auth_state);

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

/// Perform login and publish the session
pub async fn do_login(
    username: String,
    password: String,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), String> {
    let response = api::login(username, password).await?;

    storage::save_access_token(&response.access_token);
    storage::save_refresh_token(&response.refresh_token);

    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });

    Ok(())
}

/// Perform logout
pub async fn do_logout(set_auth_state: WriteSignal<AuthState>) -> Result<(), String> {
    if let Some(refresh_token) = storage::get_refresh_token() {
        let _ = api::logout(refresh_token).await;
    }

    storage::clear_tokens();
    set_auth_state.set(AuthState::default());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(role: Role, full_name: Option<&str>) -> AuthState {
        AuthState {
            access_token: Some("t".into()),
            user_info: Some(UserInfo {
                id: "1".into(),
                username: "sam".into(),
                full_name: full_name.map(str::to_string),
                role,
            }),
        }
    }

    #[test]
    fn test_premium_and_display_name() {
        assert!(state(Role::Manager, None).is_premium());
        assert!(!state(Role::Staff, None).is_premium());
        assert!(!AuthState::default().is_premium());
        assert_eq!(state(Role::Staff, Some("Sam Jones")).display_name(), "Sam Jones");
        assert_eq!(state(Role::Staff, Some(" ")).display_name(), "sam");
        assert_eq!(AuthState::default().display_name(), "Guest");
    }
}
