use crate::domain::a001_menu_category::api as category_api;
use crate::usecases::u501_pos_terminal::state::{filter_menu, PosState};
use contracts::domain::a001_menu_category::aggregate::MenuCategoryDto;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::domain::common::AggregateId;
use contracts::shared::money::format_gbp;
use contracts::usecases::u501_pos_terminal::meal_options::choices_for;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Holding a category button this long offers to delete it
const LONG_PRESS_MS: u32 = 2_000;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn CategorySidebar(state: PosState) -> impl IntoView {
    // Bumped on every press and release; a timer only fires for its own press
    let press = StoredValue::new(0u64);

    let start_press = move |id: String, name: String| {
        let token = press.get_value() + 1;
        press.set_value(token);
        spawn_local(async move {
            TimeoutFuture::new(LONG_PRESS_MS).await;
            if press.get_value() != token {
                return;
            }
            press.set_value(token + 1);
            if !confirm(&format!("Delete category \"{}\"?", name)) {
                return;
            }
            match category_api::delete_category(&id).await {
                Ok(()) => state.load_categories(),
                Err(e) => state.error.set(Some(e)),
            }
        });
    };
    let end_press = move || press.update_value(|t| *t += 1);

    let add_category = move |_| {
        let name = web_sys::window()
            .and_then(|w| w.prompt_with_message("New category name").ok().flatten())
            .map(|n| n.trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            return;
        }
        let dto = MenuCategoryDto {
            name,
            kind: None,
            icon: None,
            sort_order: Some(state.categories.with_untracked(|c| c.len() as i32)),
        };
        spawn_local(async move {
            match category_api::create_category(&dto).await {
                Ok(_) => state.load_categories(),
                Err(e) => state.error.set(Some(e)),
            }
        });
    };

    view! {
        <nav class="pos-categories">
            {move || state.categories.get().into_iter().map(|c| {
                let key = c.normalized_name();
                let key_active = key.clone();
                let id = c.base.id.as_string();
                let name = c.name().to_string();
                view! {
                    <button
                        class="pos-category"
                        class:pos-category--active=move || state.active_category.get() == key_active
                        title="Hold to delete"
                        on:click=move |_| {
                            state.search.set(String::new());
                            state.active_category.set(key.clone());
                        }
                        on:pointerdown=move |_| start_press(id.clone(), name.clone())
                        on:pointerup=move |_| end_press()
                        on:pointerleave=move |_| end_press()
                    >
                        <span class="pos-category__icon">{c.icon.clone()}</span>
                        <span>{c.name().to_string()}</span>
                    </button>
                }
            }).collect_view()}
            <button class="pos-category pos-category--add" on:click=add_category>
                "+ Category"
            </button>
        </nav>
    }
}

#[component]
pub fn MenuGrid(
    state: PosState,
    /// Opens the customise dialog for a meal
    #[prop(into)]
    on_customise: Callback<Meal>,
    #[prop(into)]
    on_misc: Callback<()>,
) -> impl IntoView {
    let shown = Signal::derive(move || {
        state
            .menu
            .with(|menu| filter_menu(menu, &state.active_category.get(), &state.search.get()))
    });

    view! {
        <div class="pos-menu">
            <div class="pos-menu__toolbar">
                <Input value=state.search placeholder="Search menu" />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_misc.run(())>
                    "Misc item"
                </Button>
            </div>
            <div class="pos-menu__grid">
                {move || shown.get().into_iter().map(|meal| {
                    let has_choices = !choices_for(meal.name()).is_empty();
                    let for_click = meal.clone();
                    let for_edit = meal.clone();
                    view! {
                        <div class="menu-tile">
                            <button
                                class="menu-tile__main"
                                on:click=move |_| {
                                    if has_choices {
                                        on_customise.run(for_click.clone());
                                    } else {
                                        state.add_meal(&for_click);
                                    }
                                }
                            >
                                <span class="menu-tile__name">{meal.name().to_string()}</span>
                                <span class="menu-tile__price">{format_gbp(meal.price)}</span>
                            </button>
                            <button
                                class="menu-tile__edit"
                                title="Customise"
                                on:click=move |_| on_customise.run(for_edit.clone())
                            >
                                "✎"
                            </button>
                        </div>
                    }
                }).collect_view()}
            </div>
        </div>
    }
}
