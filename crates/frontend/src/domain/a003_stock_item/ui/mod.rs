use crate::domain::a003_stock_item::api;
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::date_utils::{format_date, is_expired};
use crate::shared::icons::icon;
use chrono::{Local, NaiveDate};
use contracts::domain::a003_stock_item::aggregate::{StockItem, StockItemDto};
use contracts::domain::common::AggregateId;
use contracts::shared::money::{format_gbp, parse_amount};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug)]
pub struct StockRow {
    pub id: String,
    pub ingredient: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub calories_per_100g: Option<f64>,
    pub allergens: String,
    pub minimum_level: f64,
    pub expiry_date: Option<NaiveDate>,
    pub is_prepped: bool,
}

impl From<StockItem> for StockRow {
    fn from(s: StockItem) -> Self {
        Self {
            id: s.base.id.as_string(),
            ingredient: s.ingredient().to_string(),
            quantity: s.quantity,
            unit: s.unit,
            price: s.price,
            calories_per_100g: s.calories_per_100g,
            allergens: s.allergens,
            minimum_level: s.minimum_level,
            expiry_date: s.expiry_date,
            is_prepped: s.is_prepped,
        }
    }
}

impl StockRow {
    /// Same threshold the restock list uses
    pub fn is_low(&self) -> bool {
        self.quantity <= self.minimum_level
    }

    /// Case-insensitive substring match on the ingredient name
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty() || self.ingredient.to_lowercase().contains(&term.to_lowercase())
    }
}

/// Text fields of the add/edit form
#[derive(Clone, Copy)]
struct StockForm {
    editing: RwSignal<Option<String>>,
    ingredient: RwSignal<String>,
    quantity: RwSignal<String>,
    unit: RwSignal<String>,
    price: RwSignal<String>,
    minimum: RwSignal<String>,
    calories: RwSignal<String>,
    allergens: RwSignal<String>,
    expiry: RwSignal<String>,
    prepped: RwSignal<bool>,
}

impl StockForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            ingredient: RwSignal::new(String::new()),
            quantity: RwSignal::new(String::new()),
            unit: RwSignal::new("g".to_string()),
            price: RwSignal::new(String::new()),
            minimum: RwSignal::new(String::new()),
            calories: RwSignal::new(String::new()),
            allergens: RwSignal::new(String::new()),
            expiry: RwSignal::new(String::new()),
            prepped: RwSignal::new(false),
        }
    }

    fn reset(&self) {
        self.editing.set(None);
        self.ingredient.set(String::new());
        self.quantity.set(String::new());
        self.unit.set("g".to_string());
        self.price.set(String::new());
        self.minimum.set(String::new());
        self.calories.set(String::new());
        self.allergens.set(String::new());
        self.expiry.set(String::new());
        self.prepped.set(false);
    }

    fn fill(&self, row: &StockRow) {
        self.editing.set(Some(row.id.clone()));
        self.ingredient.set(row.ingredient.clone());
        self.quantity.set(row.quantity.to_string());
        self.unit.set(row.unit.clone());
        self.price.set(format!("{:.2}", row.price));
        self.minimum.set(row.minimum_level.to_string());
        self.calories
            .set(row.calories_per_100g.map(|c| c.to_string()).unwrap_or_default());
        self.allergens.set(row.allergens.clone());
        self.expiry
            .set(row.expiry_date.map(|d| d.to_string()).unwrap_or_default());
        self.prepped.set(row.is_prepped);
    }

    fn to_dto(&self) -> Result<StockItemDto, String> {
        let ingredient = self.ingredient.get_untracked().trim().to_string();
        if ingredient.is_empty() {
            return Err("Ingredient name is required".to_string());
        }
        let quantity = self
            .quantity
            .get_untracked()
            .trim()
            .parse::<f64>()
            .map_err(|_| "Quantity must be a number".to_string())?;
        let price_text = self.price.get_untracked();
        let price = if price_text.trim().is_empty() {
            0.0
        } else {
            parse_amount(&price_text).ok_or("Price must be a number")?
        };
        let minimum_text = self.minimum.get_untracked();
        let minimum_level = match minimum_text.trim() {
            "" => None,
            text => Some(text.parse::<f64>().map_err(|_| "Minimum level must be a number")?),
        };
        let calories_text = self.calories.get_untracked();
        let calories_per_100g = match calories_text.trim() {
            "" => None,
            text => Some(text.parse::<f64>().map_err(|_| "Calories must be a number")?),
        };
        let expiry_text = self.expiry.get_untracked();
        let expiry_date = match expiry_text.trim() {
            "" => None,
            text => Some(
                NaiveDate::parse_from_str(text, "%Y-%m-%d").map_err(|_| "Invalid expiry date")?,
            ),
        };
        let allergens = self.allergens.get_untracked().trim().to_string();
        Ok(StockItemDto {
            ingredient,
            quantity,
            unit: self.unit.get_untracked().trim().to_string(),
            price,
            calories_per_100g,
            allergens: (!allergens.is_empty()).then_some(allergens),
            minimum_level,
            expiry_date,
            is_prepped: self.prepped.get_untracked(),
        })
    }
}

#[component]
#[allow(non_snake_case)]
pub fn StockList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<StockRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let form = StockForm::new();
    // Row whose price is being edited inline
    let price_edit = RwSignal::new(None::<String>);
    let price_value = RwSignal::new(String::new());
    let search = RwSignal::new(String::new());

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_stock().await {
                Ok(v) => {
                    let mut rows: Vec<StockRow> = v.into_iter().map(Into::into).collect();
                    rows.sort_by(|a, b| a.ingredient.to_lowercase().cmp(&b.ingredient.to_lowercase()));
                    set_items.set(rows);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let submit = move |_| {
        let dto = match form.to_dto() {
            Ok(dto) => dto,
            Err(e) => {
                set_error.set(Some(e));
                return;
            }
        };
        let editing = form.editing.get_untracked();
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api::update_item(id, &dto).await,
                None => api::create_item(&dto).await,
            };
            match result {
                Ok(()) => {
                    form.reset();
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let save_price = move |id: String| {
        let Some(price) = parse_amount(&price_value.get_untracked()) else {
            set_error.set(Some("Price must be a number".to_string()));
            return;
        };
        spawn_local(async move {
            match api::set_price(&id, price).await {
                Ok(()) => {
                    price_edit.set(None);
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let remove = move |id: String, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete \"{}\" from stock?", name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_item(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let remove_expired = move |_| {
        spawn_local(async move {
            match api::remove_expired().await {
                Ok(removed) => {
                    set_notice.set(Some(format!("Removed {} expired item(s)", removed)));
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    let expired_count = move || {
        let today = Local::now().date_naive();
        items.with(|v| v.iter().filter(|r| is_expired(r.expiry_date, today)).count())
    };

    view! {
        <div class="page">
            <PageHeader title="Stock">
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || expired_count() == 0)
                    on_click=remove_expired
                >
                    {icon("delete")}
                    {move || format!("Remove expired ({})", expired_count())}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />
            {move || notice.get().map(|n| view! { <div class="notice-box">{n}</div> })}

            <div class="inline-form stock-form">
                <Input value=form.ingredient placeholder="Ingredient" />
                <Input value=form.quantity placeholder="Quantity" attr:style="width: 100px;" />
                <Input value=form.unit placeholder="Unit" attr:style="width: 70px;" />
                <Input value=form.price placeholder="Price £" attr:style="width: 100px;" />
                <Input value=form.minimum placeholder="Minimum" attr:style="width: 100px;" />
                <Input value=form.calories placeholder="kcal / 100g" attr:style="width: 110px;" />
                <Input value=form.allergens placeholder="Allergens" />
                <input
                    type="date"
                    class="date-input"
                    prop:value=move || form.expiry.get()
                    on:input=move |ev| form.expiry.set(event_target_value(&ev))
                />
                <label class="checkbox-label">
                    <input
                        type="checkbox"
                        prop:checked=move || form.prepped.get()
                        on:change=move |ev| form.prepped.set(event_target_checked(&ev))
                    />
                    " Prepped"
                </label>
                <Button appearance=ButtonAppearance::Primary on_click=submit>
                    {icon("save")}
                    {move || if form.editing.get().is_some() { "Update" } else { "Add" }}
                </Button>
                <Show when=move || form.editing.get().is_some()>
                    <Button appearance=ButtonAppearance::Subtle on_click=move |_| form.reset()>
                        {icon("cancel")}
                        "Cancel"
                    </Button>
                </Show>
            </div>

            <div class="filter-bar">
                <Input value=search placeholder="Search ingredients" />
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Tiny />
                </Show>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Ingredient"</TableHeaderCell>
                        <TableHeaderCell>"Quantity"</TableHeaderCell>
                        <TableHeaderCell>"Minimum"</TableHeaderCell>
                        <TableHeaderCell>"Price"</TableHeaderCell>
                        <TableHeaderCell>"Allergens"</TableHeaderCell>
                        <TableHeaderCell>"Expires"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || {
                        let today = Local::now().date_naive();
                        let term = search.get();
                        items.get().into_iter().filter(|row| row.matches(&term)).map(|row| {
                            let expired = is_expired(row.expiry_date, today);
                            let row_class = if expired {
                                "row-expired"
                            } else if row.is_low() {
                                "row-low"
                            } else {
                                ""
                            };
                            let id_price = row.id.clone();
                            let id_save = row.id.clone();
                            let id_remove = row.id.clone();
                            let name_remove = row.ingredient.clone();
                            let price_text = format!("{:.2}", row.price);
                            let edit_row = row.clone();
                            view! {
                                <TableRow attr:class=row_class>
                                    <TableCell>
                                        {row.ingredient.clone()}
                                        {row.is_prepped.then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>"prep"</Badge>
                                        })}
                                    </TableCell>
                                    <TableCell>{format!("{} {}", row.quantity, row.unit)}</TableCell>
                                    <TableCell>{row.minimum_level.to_string()}</TableCell>
                                    <TableCell>
                                        {
                                            let id_match = row.id.clone();
                                            move || {
                                                let id_price = id_price.clone();
                                                let id_save = id_save.clone();
                                                let price_text = price_text.clone();
                                                if price_edit.get().as_deref() == Some(id_match.as_str()) {
                                                    view! {
                                                        <div class="inline-edit">
                                                            <Input value=price_value attr:style="width: 90px;" />
                                                            <Button size=ButtonSize::Small on_click=move |_| save_price(id_save.clone())>
                                                                {icon("save")}
                                                            </Button>
                                                            <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=move |_| price_edit.set(None)>
                                                                {icon("cancel")}
                                                            </Button>
                                                        </div>
                                                    }.into_any()
                                                } else {
                                                    let shown = price_text.parse::<f64>().map(format_gbp).unwrap_or_default();
                                                    view! {
                                                        <a
                                                            href="#"
                                                            class="link-cell"
                                                            title="Change price"
                                                            on:click=move |ev| {
                                                                ev.prevent_default();
                                                                price_value.set(price_text.clone());
                                                                price_edit.set(Some(id_price.clone()));
                                                            }
                                                        >
                                                            {shown}
                                                        </a>
                                                    }.into_any()
                                                }
                                            }
                                        }
                                    </TableCell>
                                    <TableCell>{row.allergens.clone()}</TableCell>
                                    <TableCell>
                                        {row.expiry_date.map(|d| format_date(&d.to_string())).unwrap_or_default()}
                                        {expired.then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Danger>"expired"</Badge>
                                        })}
                                    </TableCell>
                                    <TableCell>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| form.fill(&edit_row)
                                        >
                                            "Edit"
                                        </Button>
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| remove(id_remove.clone(), name_remove.clone())
                                        >
                                            {icon("delete")}
                                        </Button>
                                    </TableCell>
                                </TableRow>
                            }
                        }).collect_view()
                    }}
                </TableBody>
            </Table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: f64, minimum_level: f64) -> StockRow {
        StockRow {
            id: "1".into(),
            ingredient: "Eggs".into(),
            quantity,
            unit: "pcs".into(),
            price: 3.0,
            calories_per_100g: Some(143.0),
            allergens: "egg".into(),
            minimum_level,
            expiry_date: None,
            is_prepped: false,
        }
    }

    #[test]
    fn test_low_stock_includes_the_minimum() {
        assert!(row(4.0, 5.0).is_low());
        assert!(row(5.0, 5.0).is_low());
        assert!(!row(5.5, 5.0).is_low());
    }

    #[test]
    fn test_search_ignores_case_and_blank_terms() {
        assert!(row(1.0, 1.0).matches("eGG"));
        assert!(row(1.0, 1.0).matches("  "));
        assert!(!row(1.0, 1.0).matches("milk"));
    }
}
