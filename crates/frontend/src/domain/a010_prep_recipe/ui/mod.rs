use crate::domain::a010_prep_recipe::api;
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use crate::usecases::u503_prep_batch::api as prep_api;
use contracts::domain::a010_prep_recipe::aggregate::{PrepIngredient, PrepRecipe, PrepRecipeDto};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// One `Ingredient: amount` per line
pub fn parse_ingredients(text: &str) -> Result<Vec<PrepIngredient>, String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|line| {
            let (name, amount) = line
                .rsplit_once(':')
                .ok_or_else(|| format!("Write \"{}\" as ingredient: amount", line))?;
            let amount = amount
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("Amount of {} must be a number", name.trim()))?;
            Ok(PrepIngredient { ingredient: name.trim().to_string(), amount })
        })
        .collect()
}

pub fn ingredients_text(ingredients: &[PrepIngredient]) -> String {
    ingredients
        .iter()
        .map(|i| format!("{}: {}", i.ingredient, i.amount))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Clone, Copy)]
struct RecipeForm {
    editing: RwSignal<Option<String>>,
    name: RwSignal<String>,
    unit: RwSignal<String>,
    ingredients: RwSignal<String>,
    hold_temperature: RwSignal<String>,
    shelf_life: RwSignal<String>,
    minimum: RwSignal<String>,
}

impl RecipeForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            unit: RwSignal::new("kg".to_string()),
            ingredients: RwSignal::new(String::new()),
            hold_temperature: RwSignal::new(String::new()),
            shelf_life: RwSignal::new(String::new()),
            minimum: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.editing.set(None);
        self.name.set(String::new());
        self.unit.set("kg".to_string());
        self.ingredients.set(String::new());
        self.hold_temperature.set(String::new());
        self.shelf_life.set(String::new());
        self.minimum.set(String::new());
    }

    fn fill(&self, recipe: &PrepRecipe) {
        self.editing.set(Some(recipe.base.id.as_string()));
        self.name.set(recipe.name().to_string());
        self.unit.set(recipe.unit.clone());
        self.ingredients.set(ingredients_text(&recipe.ingredients));
        self.hold_temperature.set(recipe.hold_temperature.clone());
        self.shelf_life.set(recipe.shelf_life_hours.to_string());
        self.minimum.set(recipe.minimum_level.to_string());
    }

    fn to_dto(&self) -> Result<PrepRecipeDto, String> {
        let shelf_life_hours = match self.shelf_life.get_untracked().trim() {
            "" => None,
            text => Some(text.parse::<u32>().map_err(|_| "Shelf life must be whole hours")?),
        };
        let minimum_level = match self.minimum.get_untracked().trim() {
            "" => None,
            text => Some(text.parse::<f64>().map_err(|_| "Minimum level must be a number")?),
        };
        Ok(PrepRecipeDto {
            name: self.name.get_untracked(),
            unit: self.unit.get_untracked(),
            ingredients: parse_ingredients(&self.ingredients.get_untracked())?,
            hold_temperature: self.hold_temperature.get_untracked(),
            shelf_life_hours,
            minimum_level,
        })
    }
}

/// Recipes for sauces, doughs and the rest of the prep made ahead.
#[component]
#[allow(non_snake_case)]
pub fn PrepRecipeList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<PrepRecipe>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let form = RecipeForm::new();
    let batch = RwSignal::new("1".to_string());

    let fetch = move || {
        spawn_local(async move {
            match api::fetch_recipes().await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
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
                Some(id) => api::update_recipe(id, &dto).await,
                None => api::create_recipe(&dto).await,
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

    let prepare = move |name: String| {
        let Ok(quantity) = batch.get_untracked().trim().parse::<f64>() else {
            set_error.set(Some("Batch quantity must be a number".to_string()));
            return;
        };
        spawn_local(async move {
            match prep_api::prepare(&name, quantity).await {
                Ok(result) => {
                    set_notice.set(Some(format!(
                        "Prepared {} {} of {}, {} now in stock, use by {}",
                        result.plan.batch_quantity,
                        result.plan.unit,
                        result.plan.prepped_item,
                        result.in_stock,
                        result.expiry_date.format("%d.%m.%Y")
                    )));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let remove = move |id: String, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete prepped item \"{}\"?", name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_recipe(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Prepped items">
                <Input value=batch placeholder="Batch" attr:style="width: 80px;" attr:title="Batch quantity for Prepare" />
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />
            {move || notice.get().map(|n| view! { <div class="notice-box">{n}</div> })}

            <div class="inline-form">
                <Input value=form.name placeholder="Prepped item" />
                <Input value=form.unit placeholder="Unit" attr:style="width: 70px;" />
                <Input value=form.shelf_life placeholder="Shelf life (h)" attr:style="width: 120px;" />
                <Input value=form.hold_temperature placeholder="Hold at" attr:style="width: 110px;" />
                <Input value=form.minimum placeholder="Minimum" attr:style="width: 100px;" />
            </div>
            <div class="inline-form">
                <textarea
                    class="prep-ingredients"
                    rows="4"
                    placeholder="Ingredient: amount per unit, one per line"
                    prop:value=move || form.ingredients.get()
                    on:input=move |ev| form.ingredients.set(event_target_value(&ev))
                ></textarea>
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

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Prepped item"</TableHeaderCell>
                        <TableHeaderCell>"Ingredients per unit"</TableHeaderCell>
                        <TableHeaderCell>"Keeps"</TableHeaderCell>
                        <TableHeaderCell>"Hold at"</TableHeaderCell>
                        <TableHeaderCell>"Minimum"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|recipe| {
                        let id_remove = recipe.base.id.as_string();
                        let name = recipe.name().to_string();
                        let name_prepare = name.clone();
                        let name_remove = name.clone();
                        let ingredients = recipe
                            .ingredients
                            .iter()
                            .map(|i| format!("{} {}", i.amount, i.ingredient))
                            .collect::<Vec<_>>()
                            .join(", ");
                        let edit = recipe.clone();
                        view! {
                            <TableRow>
                                <TableCell><strong>{name}</strong></TableCell>
                                <TableCell>{ingredients}</TableCell>
                                <TableCell>{format!("{} h", recipe.shelf_life_hours)}</TableCell>
                                <TableCell>{recipe.hold_temperature.clone()}</TableCell>
                                <TableCell>{format!("{} {}", recipe.minimum_level, recipe.unit)}</TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Secondary
                                        on_click=move |_| prepare(name_prepare.clone())
                                    >
                                        {icon("plus")}
                                        "Prepare"
                                    </Button>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| form.fill(&edit)
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
                    }).collect_view()}
                </TableBody>
            </Table>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredients() {
        let parsed = parse_ingredients("Beef Stock: 0.8\n\n  Flour:0.05 ").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].ingredient, "Beef Stock");
        assert_eq!(parsed[1].amount, 0.05);
        assert_eq!(ingredients_text(&parsed), "Beef Stock: 0.8\nFlour: 0.05");

        assert!(parse_ingredients("Flour").is_err());
        assert_eq!(
            parse_ingredients("Flour: lots").unwrap_err(),
            "Amount of Flour must be a number"
        );
    }
}
