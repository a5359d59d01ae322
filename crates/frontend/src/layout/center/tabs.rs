use crate::layout::global_context::{AppGlobalContext, Tab as TabData};
use crate::layout::tabs::TabPage;
use leptos::ev;
use leptos::prelude::*;

/// One entry of the tab bar.
#[component]
fn TabHandle(tab: TabData) -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let key = StoredValue::new(tab.key.clone());
    let is_active =
        Memo::new(move |_| tabs_store.active.get().as_deref() == Some(key.get_value().as_str()));

    let on_close = move |ev: ev::MouseEvent| {
        ev.stop_propagation();
        tabs_store.close_tab(&key.get_value());
    };

    // Titles can change after opening (meal details rename themselves)
    let title = move || {
        tabs_store
            .opened
            .with(|tabs| tabs.iter().find(|t| t.key == key.get_value()).map(|t| t.title.clone()))
            .unwrap_or_default()
    };

    view! {
        <div
            class="tabs__handle"
            class:tabs__handle--active=is_active
            on:click=move |_| tabs_store.activate_tab(&key.get_value())
        >
            <span>{title}</span>
            <button class="tabs__close" on:click=on_close title="Close">"×"</button>
        </div>
    }
}

/// Tab bar plus every opened page; inactive pages stay mounted but hidden.
#[component]
pub fn Tabs() -> impl IntoView {
    let tabs_store = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div class="tabs">
            <div class="tabs__bar">
                <For
                    each=move || tabs_store.opened.get()
                    key=|tab| tab.key.clone()
                    children=move |tab| view! { <TabHandle tab=tab /> }
                />
            </div>
            <div class="tabs__content">
                <Show
                    when=move || !tabs_store.opened.with(|tabs| tabs.is_empty())
                    fallback=|| view! {
                        <div class="tabs__empty">"Pick a screen from the menu on the left."</div>
                    }
                >
                    <For
                        each=move || tabs_store.opened.get()
                        key=|tab| tab.key.clone()
                        children=move |tab: TabData| view! { <TabPage tab=tab tabs_store=tabs_store /> }
                    />
                </Show>
            </div>
        </div>
    }
}
