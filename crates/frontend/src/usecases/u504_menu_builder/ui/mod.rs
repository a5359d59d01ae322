use crate::domain::a002_meal::api as meal_api;
use crate::shared::browser_storage::{load_menu_draft, save_menu_draft};
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::shared::money::format_gbp;
use contracts::usecases::u504_menu_builder::{MenuDraft, MenuEntry, MenuTemplate};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

const TEXT_WIDTH: usize = 40;

fn print_page() {
    if let Some(window) = web_sys::window() {
        let _ = window.print();
    }
}

/// Meals from the list arranged into sections, previewed in a print template.
#[component]
#[allow(non_snake_case)]
pub fn MenuBuilderView() -> impl IntoView {
    let draft = RwSignal::new(load_menu_draft());
    let (meals, set_meals) = signal::<Vec<Meal>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let target = RwSignal::new(String::new());
    let new_section = RwSignal::new(String::new());
    let as_text = RwSignal::new(false);

    let edit = move |change: &dyn Fn(&mut MenuDraft)| {
        draft.update(|d| change(d));
        save_menu_draft(&draft.get_untracked());
    };

    spawn_local(async move {
        match meal_api::fetch_full_menu().await {
            Ok(list) => {
                edit(&|d: &mut MenuDraft| d.sync_with(&list));
                set_meals.set(list);
            }
            Err(e) => set_error.set(Some(e)),
        }
    });

    let add_section = move |_| {
        let name = new_section.get_untracked();
        edit(&|d: &mut MenuDraft| {
            d.add_section(&name);
        });
        new_section.set(String::new());
    };

    let section_names = move || draft.with(|d| d.sections.iter().map(|s| s.name.clone()).collect::<Vec<_>>());

    view! {
        <div class="page menu-builder">
            <PageHeader title="Menu builder">
                <select
                    class="pos-select"
                    on:change=move |ev| {
                        let picked = event_target_value(&ev);
                        if let Some(t) = MenuTemplate::ALL.iter().find(|t| t.css_class() == picked) {
                            let t = *t;
                            edit(&|d: &mut MenuDraft| d.template = t);
                        }
                    }
                >
                    {MenuTemplate::ALL.iter().map(|t| {
                        let t = *t;
                        view! {
                            <option value=t.css_class() selected=move || draft.with(|d| d.template == t)>
                                {t.label()}
                            </option>
                        }
                    }).collect_view()}
                </select>
                <label class="checkbox-label">
                    <input
                        type="checkbox"
                        prop:checked=move || as_text.get()
                        on:change=move |ev| as_text.set(event_target_checked(&ev))
                    />
                    "Plain text"
                </label>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| print_page()>
                    "Print"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| edit(&|d: &mut MenuDraft| *d = MenuDraft::default())
                >
                    {icon("delete")}
                    "Start over"
                </Button>
            </PageHeader>

            <ErrorBox message=error />

            <div class="menu-builder__body">
                <div class="menu-builder__meals">
                    <div class="inline-form">
                        <input
                            class="pos-select"
                            placeholder="Menu title"
                            prop:value=move || draft.with(|d| d.title.clone())
                            on:input=move |ev| {
                                let title = event_target_value(&ev);
                                edit(&|d: &mut MenuDraft| d.title = title.clone());
                            }
                        />
                    </div>
                    <div class="inline-form">
                        <select
                            class="pos-select"
                            prop:value=move || target.get()
                            on:change=move |ev| target.set(event_target_value(&ev))
                        >
                            <option value="">"Add to section..."</option>
                            {move || section_names().into_iter().map(|name| {
                                view! { <option value=name.clone()>{name.clone()}</option> }
                            }).collect_view()}
                        </select>
                        <Input value=new_section placeholder="New section" attr:style="width: 140px;" />
                        <Button size=ButtonSize::Small appearance=ButtonAppearance::Secondary on_click=add_section>
                            {icon("plus")}
                        </Button>
                    </div>
                    <Table>
                        <TableBody>
                            {move || meals.get().into_iter().map(|meal| {
                                let entry = MenuEntry::from(&meal);
                                let name = entry.name.clone();
                                view! {
                                    <TableRow>
                                        <TableCell>{name}</TableCell>
                                        <TableCell>{format_gbp(entry.price)}</TableCell>
                                        <TableCell>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| {
                                                    let section = target.get_untracked();
                                                    if section.is_empty() {
                                                        set_error.set(Some("Pick a section first".to_string()));
                                                        return;
                                                    }
                                                    let entry = entry.clone();
                                                    edit(&|d: &mut MenuDraft| {
                                                        d.add(&section, entry.clone());
                                                    });
                                                    set_error.set(None);
                                                }
                                            >
                                                {icon("plus")}
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </div>

                <div class="menu-builder__preview">
                    {move || {
                        let current = draft.get();
                        if as_text.get() {
                            return view! { <pre class="menu-text">{current.render_text(TEXT_WIDTH)}</pre> }.into_any();
                        }
                        if current.is_empty() {
                            return view! { <div class="empty-state">"Pick a section, then add meals"</div> }.into_any();
                        }
                        let names = section_names();
                        view! {
                            <div class=format!("menu-sheet {}", current.template.css_class())>
                                <h2 class="menu-sheet__title">{current.title.clone()}</h2>
                                {current.sections.into_iter().filter(|s| !s.items.is_empty()).map(|section| {
                                    let section_name = section.name.clone();
                                    view! {
                                        <div class="menu-sheet__section">
                                            <h3>{section.name.clone()}</h3>
                                            {section.items.into_iter().map(|item| {
                                                let id = item.meal_id.clone();
                                                let (up_s, up_id) = (section_name.clone(), id.clone());
                                                let (down_s, down_id) = (section_name.clone(), id.clone());
                                                let (rm_s, rm_id) = (section_name.clone(), id.clone());
                                                let (mv_s, mv_id) = (section_name.clone(), id);
                                                let others = names.iter().filter(|n| **n != section_name).cloned().collect::<Vec<_>>();
                                                view! {
                                                    <div class="menu-sheet__item">
                                                        <span class="menu-sheet__name">{item.name.clone()}</span>
                                                        <span class="menu-sheet__price">{format_gbp(item.price)}</span>
                                                        <span class="menu-sheet__controls">
                                                            <button on:click=move |_| edit(&|d: &mut MenuDraft| d.shift(&up_s, &up_id, -1))>"↑"</button>
                                                            <button on:click=move |_| edit(&|d: &mut MenuDraft| d.shift(&down_s, &down_id, 1))>"↓"</button>
                                                            <select on:change=move |ev| {
                                                                let to = event_target_value(&ev);
                                                                if !to.is_empty() {
                                                                    edit(&|d: &mut MenuDraft| {
                                                                        d.move_to(&mv_s, &to, &mv_id);
                                                                    });
                                                                }
                                                            }>
                                                                <option value="">"Move to..."</option>
                                                                {others.into_iter().map(|n| view! { <option value=n.clone()>{n.clone()}</option> }).collect_view()}
                                                            </select>
                                                            <button on:click=move |_| edit(&|d: &mut MenuDraft| {
                                                                d.remove(&rm_s, &rm_id);
                                                            })>"✕"</button>
                                                        </span>
                                                        {(!item.allergens.is_empty() && item.allergens != "None").then(|| view! {
                                                            <div class="menu-sheet__allergens">{format!("Allergens: {}", item.allergens)}</div>
                                                        })}
                                                    </div>
                                                }
                                            }).collect_view()}
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        }.into_any()
                    }}
                </div>
            </div>
        </div>
    }
}
