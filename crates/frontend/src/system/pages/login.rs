use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::system::auth::context::{do_login, use_auth};

/// Shown instead of the shell until someone signs in.
#[component]
pub fn LoginPage() -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let (_, set_auth_state) = use_auth();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let name = username.get_untracked().trim().to_string();
        if name.is_empty() || password.with_untracked(|p| p.is_empty()) {
            error.set(Some("Enter a username and password".to_string()));
            return;
        }

        busy.set(true);
        error.set(None);
        let secret = password.get_untracked();
        spawn_local(async move {
            if let Err(e) = do_login(name, secret, set_auth_state).await {
                password.set(String::new());
                error.set(Some(e));
            }
            busy.set(false);
        });
    };

    view! {
        <div class="login-container">
            <form class="login-box" on:submit=on_submit>
                <h1>"MAKS OS"</h1>
                {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

                <div class="form-group">
                    <label>"Username"</label>
                    <Input value=username disabled=busy placeholder="admin" />
                </div>
                <div class="form-group">
                    <label>"Password"</label>
                    <Input value=password input_type=InputType::Password disabled=busy />
                </div>

                <Button
                    appearance=ButtonAppearance::Primary
                    button_type=ButtonType::Submit
                    loading=busy
                >
                    "Sign in"
                </Button>

                <div class="login-info">
                    "The first start creates " <strong>"admin"</strong> " / " <strong>"admin"</strong>
                </div>
            </form>
        </div>
    }
}
