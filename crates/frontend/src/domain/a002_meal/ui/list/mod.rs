use crate::domain::a001_menu_category::api as category_api;
use crate::domain::a002_meal::api;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::registry::MEAL_DETAILS_PREFIX;
use crate::layout::tabs::{detail_tab_label, tab_label_for_key};
use crate::shared::components::{ErrorBox, PageHeader, PaginationControls, TableCellMoney};
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use contracts::domain::a002_meal::aggregate::{Meal, MealListQuery, DEFAULT_PAGE_SIZE};
use contracts::domain::a002_meal::plate_cost::PlateCost;
use contracts::domain::common::{AggregateId, AggregateRoot};
use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use thaw::*;

#[derive(Clone, Debug)]
pub struct MealRow {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub allergens: String,
    pub calories: String,
    pub is_drink: bool,
}

impl From<Meal> for MealRow {
    fn from(m: Meal) -> Self {
        Self {
            id: m.base.id.as_string(),
            name: m.name().to_string(),
            is_drink: m.is_drink(),
            category: m.category,
            price: m.price,
            allergens: m.allergens,
            calories: m.calories.map(|c| c.to_string()).unwrap_or_else(|| "-".to_string()),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn MealList() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth_state, _) = use_auth();

    let (items, set_items) = signal::<Vec<MealRow>>(Vec::new());
    let (costs, set_costs) = signal::<HashMap<String, PlateCost>>(HashMap::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (page, set_page) = signal(1usize);
    let (total, set_total) = signal(0usize);
    let (total_pages, set_total_pages) = signal(1usize);
    let (categories, set_categories) = signal::<Vec<String>>(Vec::new());
    let category = RwSignal::new("all".to_string());
    let search = RwSignal::new(String::new());

    spawn_local(async move {
        if let Ok(list) = category_api::fetch_categories().await {
            set_categories.set(list.iter().map(|c| c.normalized_name()).collect());
        }
    });

    let fetch = move || {
        let query = MealListQuery {
            category: Some(category.get_untracked()).filter(|c| c != "all"),
            search: Some(search.get_untracked()).filter(|s| !s.trim().is_empty()),
            page: Some(page.get_untracked()),
            limit: Some(DEFAULT_PAGE_SIZE),
        };
        let premium = auth_state.get_untracked().is_premium();
        spawn_local(async move {
            match api::fetch_page(&query).await {
                Ok(result) => {
                    set_total.set(result.total);
                    set_total_pages.set(result.total_pages());
                    let rows: Vec<MealRow> = result.items.into_iter().map(Into::into).collect();
                    let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
                    set_items.set(rows);
                    set_error.set(None);

                    if premium {
                        let mut loaded = HashMap::new();
                        for id in ids {
                            match api::fetch_plate_cost(&id).await {
                                Ok(cost) => {
                                    loaded.insert(id, cost);
                                }
                                Err(e) => log::warn!("Plate cost for {} unavailable: {}", id, e),
                            }
                        }
                        set_costs.set(loaded);
                    }
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    // Filters go back to the first page
    Effect::new(move |_| {
        category.track();
        search.track();
        set_page.set(1);
        fetch();
    });

    let on_page_change = Callback::new(move |p: usize| {
        set_page.set(p);
        fetch();
    });

    let open_details = move |id: String, name: String| {
        let key = format!("{}{}", MEAL_DETAILS_PREFIX, id);
        ctx.open_tab(&key, &detail_tab_label(Meal::element_name(), &name));
    };

    let remove = move |id: String, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete \"{}\" from the menu?", name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_meal(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let is_premium = move || auth_state.get().is_premium();

    view! {
        <div class="page">
            <PageHeader title="Meals" subtitle=Signal::derive(move || Some(format!("{} on the menu", total.get())))>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| ctx.open_tab("a002_meal_new", tab_label_for_key("a002_meal_new"))
                >
                    {icon("plus")}
                    "New meal"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />

            <div class="filter-bar">
                <Input value=search placeholder="Search meals" />
                <Select value=category>
                    <option value="all">"All categories"</option>
                    {move || categories.get().into_iter().map(|c| {
                        let label = c.clone();
                        view! { <option value=c>{label}</option> }
                    }).collect_view()}
                </Select>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Category"</TableHeaderCell>
                        <TableHeaderCell>"Price"</TableHeaderCell>
                        <TableHeaderCell>"Allergens"</TableHeaderCell>
                        <TableHeaderCell>"kcal"</TableHeaderCell>
                        {move || is_premium().then(|| view! {
                            <TableHeaderCell>"Plate cost"</TableHeaderCell>
                            <TableHeaderCell>"Margin"</TableHeaderCell>
                            <TableHeaderCell>"Margin %"</TableHeaderCell>
                        })}
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|row| {
                        let id_open = row.id.clone();
                        let name_open = row.name.clone();
                        let id_delete = row.id.clone();
                        let name_delete = row.name.clone();
                        let id_cost = row.id.clone();
                        let price = row.price;
                        view! {
                            <TableRow>
                                <TableCell>
                                    <a href="#" class="link" on:click=move |ev| {
                                        ev.prevent_default();
                                        open_details(id_open.clone(), name_open.clone());
                                    }>
                                        {row.name}
                                        {row.is_drink.then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>"drink"</Badge>
                                        })}
                                    </a>
                                </TableCell>
                                <TableCell>{row.category}</TableCell>
                                <TableCellMoney value=Signal::derive(move || Some(price)) />
                                <TableCell>{row.allergens}</TableCell>
                                <TableCell>{row.calories}</TableCell>
                                {move || is_premium().then(|| {
                                    let cost = costs.with(|c| c.get(&id_cost).cloned());
                                    let title = cost
                                        .as_ref()
                                        .filter(|c| !c.missing.is_empty())
                                        .map(|c| format!("No stock price for: {}", c.missing.join(", ")))
                                        .unwrap_or_default();
                                    let total_cost = cost.as_ref().map(|c| format_gbp(c.total_cost)).unwrap_or_else(|| "-".into());
                                    let margin = cost.as_ref().map(|c| c.margin);
                                    let margin_percent = cost.as_ref().map(|c| format!("{:.0}%", c.margin_percent)).unwrap_or_default();
                                    view! {
                                        <TableCell attr:title=title>{total_cost}</TableCell>
                                        <TableCellMoney value=Signal::derive(move || margin) color_by_sign=true />
                                        <TableCell>{margin_percent}</TableCell>
                                    }
                                })}
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| remove(id_delete.clone(), name_delete.clone())
                                    >
                                        {icon("delete")}
                                    </Button>
                                </TableCell>
                            </TableRow>
                        }
                    }).collect_view()}
                </TableBody>
            </Table>

            <PaginationControls
                current_page=page
                total_pages=total_pages
                total_count=total
                on_page_change=on_page_change
            />
        </div>
    }
}
