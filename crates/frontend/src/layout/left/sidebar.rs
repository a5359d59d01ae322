//! Sidebar with collapsible menu groups

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_label_for_key;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    id: &'static str,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str)>, // (tab key, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            id: "service",
            label: "Service",
            icon: "pos",
            items: vec![
                ("u501_pos_terminal", "pos"),
                ("u502_kitchen_display", "kitchen"),
                ("a004_dining_table", "tables"),
            ],
        },
        MenuGroup {
            id: "menu",
            label: "Menu",
            icon: "meals",
            items: vec![
                ("a002_meal", "meals"),
                ("a001_menu_category", "categories"),
                ("u504_menu_builder", "menu-builder"),
            ],
        },
        MenuGroup {
            id: "inventory",
            label: "Inventory",
            icon: "stock",
            items: vec![
                ("a003_stock_item", "stock"),
                ("p901_restock_list", "restock"),
                ("p902_smart_order", "ordering"),
                ("a008_supplier", "suppliers"),
                ("a010_prep_recipe", "prep"),
                ("u503_prep_batch", "prep"),
            ],
        },
        MenuGroup {
            id: "reports",
            label: "Reports",
            icon: "analytics",
            items: vec![("d400_daily_summary", "analytics")],
        },
    ]
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    // Service is what staff open first
    let expanded_groups = RwSignal::new(vec!["service".to_string()]);

    view! {
        <div class="app-sidebar__content">
            {get_menu_groups().into_iter().map(|group| {
                let group_id = group.id.to_string();
                let gid_click = group_id.clone();
                let gid_chevron = group_id.clone();
                let gid_show = group_id.clone();
                let items = StoredValue::new(group.items.clone());

                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| {
                                let gid = gid_click.clone();
                                expanded_groups.update(move |open| {
                                    if let Some(pos) = open.iter().position(|x| *x == gid) {
                                        open.remove(pos);
                                    } else {
                                        open.push(gid);
                                    }
                                });
                            }
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || expanded_groups.get().contains(&gid_chevron)
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <Show when=move || expanded_groups.get().contains(&gid_show)>
                            <div class="app-sidebar__children">
                                {items.get_value().into_iter().map(|(key, icon_name)| {
                                    let label = tab_label_for_key(key);
                                    view! {
                                        <div
                                            class="app-sidebar__item"
                                            class:app-sidebar__item--active=move || {
                                                ctx.active.get().as_deref() == Some(key)
                                            }
                                            style:padding-left="10px"
                                            on:click=move |_| ctx.open_tab(key, label)
                                        >
                                            <div class="app-sidebar__item-content">
                                                {icon(icon_name)}
                                                <span>{label}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        </Show>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}
