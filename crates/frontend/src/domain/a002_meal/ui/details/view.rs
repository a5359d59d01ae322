use super::view_model::MealDetailsViewModel;
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::tab_labels::detail_tab_label;
use crate::shared::components::ErrorBox;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::guard::RequirePremium;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::domain::common::AggregateRoot;
use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

#[component]
pub fn MealDetails(
    id: Option<String>,
    tab_key: String,
    on_saved: Rc<dyn Fn(())>,
    on_cancel: Rc<dyn Fn(())>,
) -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (auth, _) = use_auth();
    let premium = auth.get_untracked().is_premium();

    let vm = MealDetailsViewModel::new();
    vm.load(id, premium, move |name| {
        ctx.update_tab_title(&tab_key, &detail_tab_label(Meal::element_name(), &name));
    });

    let vm_clone = vm.clone();
    let error: Signal<Option<String>> = vm.error.into();
    let price_text = vm.price_text;
    let calories_text = vm.calories_text;

    view! {
        <div class="details-container meal-details">
            <div class="details-header">
                <h3>
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode() { "Edit meal" } else { "New meal" }
                    }
                </h3>
            </div>

            <ErrorBox message=error />

            <div class="details-form">
                <div class="form-group">
                    <label for="meal-name">"Name"</label>
                    <input
                        type="text"
                        id="meal-name"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().name
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| vm.form.update(|f| f.name = event_target_value(&ev))
                        }
                        placeholder="e.g. Full English"
                    />
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="meal-price">"Price (£)"</label>
                        <input
                            type="text"
                            id="meal-price"
                            inputmode="decimal"
                            prop:value=move || price_text.get()
                            on:input=move |ev| price_text.set(event_target_value(&ev))
                            placeholder="0.00"
                        />
                    </div>

                    <div class="form-group">
                        <label for="meal-category">"Category"</label>
                        <select
                            id="meal-category"
                            prop:value={
                                let vm = vm_clone.clone();
                                move || vm.form.get().category
                            }
                            on:change={
                                let vm = vm_clone.clone();
                                move |ev| vm.form.update(|f| f.category = event_target_value(&ev))
                            }
                        >
                            {
                                let vm = vm_clone.clone();
                                move || {
                                    let current = vm.form.with(|f| f.category.clone());
                                    let mut names = vm.categories.get();
                                    if !current.is_empty() && !names.contains(&current) {
                                        names.push(current.clone());
                                    }
                                    names
                                        .into_iter()
                                        .map(|name| {
                                            let selected = name == current;
                                            view! {
                                                <option value=name.clone() selected=selected>{name.clone()}</option>
                                            }
                                        })
                                        .collect_view()
                                }
                            }
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="meal-calories">"Calories"</label>
                        <input
                            type="text"
                            id="meal-calories"
                            inputmode="numeric"
                            prop:value=move || calories_text.get()
                            on:input=move |ev| calories_text.set(event_target_value(&ev))
                            placeholder="kcal"
                        />
                    </div>
                </div>

                <div class="form-group">
                    <label for="meal-allergens">"Allergens"</label>
                    <input
                        type="text"
                        id="meal-allergens"
                        prop:value={
                            let vm = vm_clone.clone();
                            move || vm.form.get().allergens.unwrap_or_default()
                        }
                        on:input={
                            let vm = vm_clone.clone();
                            move |ev| {
                                let value = event_target_value(&ev);
                                vm.form.update(|f| {
                                    f.allergens = if value.trim().is_empty() { None } else { Some(value) };
                                });
                            }
                        }
                        placeholder="gluten, egg, milk"
                    />
                </div>

                <div class="form-group">
                    <label>"Ingredients"</label>
                    <table class="ingredients-editor">
                        <thead>
                            <tr>
                                <th>"Ingredient"</th>
                                <th style="width: 120px;">"Quantity"</th>
                                <th style="width: 48px;"></th>
                            </tr>
                        </thead>
                        <tbody>
                            {
                                let vm = vm_clone.clone();
                                move || {
                                    let lines = vm.form.with(|f| f.ingredients.clone());
                                    lines
                                        .into_iter()
                                        .enumerate()
                                        .map(|(index, line)| {
                                            let vm_name = vm.clone();
                                            let vm_qty = vm.clone();
                                            let vm_remove = vm.clone();
                                            view! {
                                                <tr>
                                                    <td>
                                                        <input
                                                            type="text"
                                                            value=line.ingredient.clone()
                                                            on:change=move |ev| vm_name.set_ingredient_name(index, event_target_value(&ev))
                                                            placeholder="Stock ingredient name"
                                                        />
                                                    </td>
                                                    <td>
                                                        <input
                                                            type="text"
                                                            inputmode="decimal"
                                                            value=line.quantity.to_string()
                                                            on:change=move |ev| vm_qty.set_ingredient_quantity(index, &event_target_value(&ev))
                                                        />
                                                    </td>
                                                    <td>
                                                        <button
                                                            class="btn btn-icon"
                                                            title="Remove ingredient"
                                                            on:click=move |_| vm_remove.remove_ingredient(index)
                                                        >
                                                            {icon("delete")}
                                                        </button>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }
                            }
                        </tbody>
                    </table>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click={
                            let vm = vm_clone.clone();
                            move |_| vm.add_ingredient()
                        }
                    >
                        {icon("plus")}
                        " Add ingredient"
                    </Button>
                </div>
            </div>

            <RequirePremium fallback_text="Plate cost is visible to managers.">
            {
                let cost_signal = vm_clone.cost;
                move || cost_signal.get().map(|cost| view! {
                    <div class="plate-cost">
                        <h4>"Plate cost"</h4>
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <TableHeaderCell>"Ingredient"</TableHeaderCell>
                                    <TableHeaderCell>"Qty"</TableHeaderCell>
                                    <TableHeaderCell>"Unit cost"</TableHeaderCell>
                                    <TableHeaderCell>"Cost"</TableHeaderCell>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {cost.lines.clone().into_iter().map(|line| view! {
                                    <TableRow>
                                        <TableCell>{line.ingredient.clone()}</TableCell>
                                        <TableCell>{line.quantity.to_string()}</TableCell>
                                        <TableCell>{format_gbp(line.unit_cost)}</TableCell>
                                        <TableCell>{format_gbp(line.cost)}</TableCell>
                                    </TableRow>
                                }).collect_view()}
                            </TableBody>
                        </Table>
                        <div class="plate-cost-summary">
                            <span>"Cost: " <strong>{format_gbp(cost.total_cost)}</strong></span>
                            <span>"Margin: " <strong>{format_gbp(cost.margin)}</strong></span>
                            <span>"Margin %: " <strong>{format!("{:.1}%", cost.margin_percent)}</strong></span>
                        </div>
                        {(!cost.missing.is_empty()).then(|| view! {
                            <div class="warning-box">
                                "No priced stock for: " {cost.missing.join(", ")}
                            </div>
                        })}
                    </div>
                })
            }
            </RequirePremium>

            <div class="details-actions">
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=vm.saving
                    on_click={
                        let vm = vm_clone.clone();
                        let on_saved = StoredValue::new_local(on_saved.clone());
                        move |_| vm.save_command(on_saved.get_value())
                    }
                >
                    {icon("save")}
                    {
                        let vm = vm_clone.clone();
                        move || if vm.is_edit_mode() { " Save" } else { " Create" }
                    }
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click={
                        let on_cancel = StoredValue::new_local(on_cancel);
                        move |_| on_cancel.with_value(|f| f(()))
                    }
                >
                    {icon("cancel")}
                    " Cancel"
                </Button>
            </div>
        </div>
    }
}
