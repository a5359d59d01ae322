use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only for managers and admins
#[component]
pub fn RequirePremium(
    #[prop(optional, into)] fallback_text: Option<String>,
    children: ChildrenFn,
) -> impl IntoView {
    let (auth_state, _) = use_auth();
    let fallback_text = fallback_text.unwrap_or_else(|| "Manager access required.".to_string());

    view! {
        <Show
            when=move || auth_state.get().is_premium()
            fallback=move || view! { <div class="access-denied">{fallback_text.clone()}</div> }
        >
            {children()}
        </Show>
    }
}
