use crate::domain::a008_supplier::api;
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use contracts::domain::a008_supplier::aggregate::{week_day_names, Supplier, SupplierDto};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Comma or newline separated ingredient names
pub fn split_list(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Clone, Copy)]
struct SupplierForm {
    editing: RwSignal<Option<String>>,
    name: RwSignal<String>,
    contact_name: RwSignal<String>,
    phone: RwSignal<String>,
    website: RwSignal<String>,
    days: RwSignal<Vec<String>>,
    supplies: RwSignal<String>,
}

impl SupplierForm {
    fn new() -> Self {
        Self {
            editing: RwSignal::new(None),
            name: RwSignal::new(String::new()),
            contact_name: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            website: RwSignal::new(String::new()),
            days: RwSignal::new(Vec::new()),
            supplies: RwSignal::new(String::new()),
        }
    }

    fn reset(&self) {
        self.editing.set(None);
        self.name.set(String::new());
        self.contact_name.set(String::new());
        self.phone.set(String::new());
        self.website.set(String::new());
        self.days.set(Vec::new());
        self.supplies.set(String::new());
    }

    fn fill(&self, supplier: &Supplier) {
        self.editing.set(Some(supplier.base.id.as_string()));
        self.name.set(supplier.name().to_string());
        self.contact_name.set(supplier.contact_name.clone());
        self.phone.set(supplier.phone.clone());
        self.website.set(supplier.website.clone());
        self.days.set(supplier.delivery_days.clone());
        self.supplies.set(supplier.supplies.join(", "));
    }

    fn toggle_day(&self, day: &str) {
        self.days.update(|days| {
            if let Some(pos) = days.iter().position(|d| d == day) {
                days.remove(pos);
            } else {
                days.push(day.to_string());
            }
        });
    }

    fn to_dto(&self) -> SupplierDto {
        SupplierDto {
            name: self.name.get_untracked(),
            website: self.website.get_untracked(),
            phone: self.phone.get_untracked(),
            contact_name: self.contact_name.get_untracked(),
            delivery_days: self.days.get_untracked(),
            supplies: split_list(&self.supplies.get_untracked()),
        }
    }
}

/// Wholesalers, their delivery days and what they carry.
#[component]
#[allow(non_snake_case)]
pub fn SupplierList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<Supplier>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);
    let form = SupplierForm::new();

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_suppliers().await {
                Ok(v) => {
                    set_items.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let submit = move |_| {
        let dto = form.to_dto();
        if dto.name.trim().is_empty() {
            set_error.set(Some("Supplier name is required".to_string()));
            return;
        }
        let editing = form.editing.get_untracked();
        spawn_local(async move {
            let result = match &editing {
                Some(id) => api::update_supplier(id, &dto).await,
                None => api::create_supplier(&dto).await,
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

    let remove = move |id: String, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete supplier \"{}\"?", name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_supplier(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Suppliers">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />

            <div class="inline-form">
                <Input value=form.name placeholder="Supplier" />
                <Input value=form.contact_name placeholder="Contact" />
                <Input value=form.phone placeholder="Phone" attr:style="width: 140px;" />
                <Input value=form.website placeholder="Website" />
            </div>
            <div class="inline-form">
                {week_day_names().into_iter().map(|day| {
                    view! {
                        <label class="checkbox-label">
                            <input
                                type="checkbox"
                                prop:checked=move || form.days.get().iter().any(|d| d == day)
                                on:change=move |_| form.toggle_day(day)
                            />
                            {format!(" {}", &day[..3])}
                        </label>
                    }
                }).collect_view()}
            </div>
            <div class="inline-form">
                <Input value=form.supplies placeholder="Supplies (comma separated ingredients)" attr:style="min-width: 360px;" />
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
                <Show when=move || loading.get()>
                    <Spinner size=SpinnerSize::Tiny />
                </Show>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Supplier"</TableHeaderCell>
                        <TableHeaderCell>"Contact"</TableHeaderCell>
                        <TableHeaderCell>"Delivers"</TableHeaderCell>
                        <TableHeaderCell>"Supplies"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|supplier| {
                        let id_remove = supplier.base.id.as_string();
                        let name_remove = supplier.name().to_string();
                        let contact = [supplier.contact_name.as_str(), supplier.phone.as_str()]
                            .into_iter()
                            .filter(|s| !s.is_empty())
                            .collect::<Vec<_>>()
                            .join(" · ");
                        let days = if supplier.delivery_days.is_empty() {
                            "On request".to_string()
                        } else {
                            supplier.delivery_days.iter().map(|d| d.get(..3).unwrap_or(d.as_str())).collect::<Vec<_>>().join(", ")
                        };
                        let supplies = supplier.supplies.join(", ");
                        let website = supplier.website.clone();
                        let edit = supplier.clone();
                        view! {
                            <TableRow>
                                <TableCell>
                                    <strong>{supplier.name().to_string()}</strong>
                                    {(!website.is_empty()).then(|| view! {
                                        <div class="muted">
                                            <a href=website.clone() target="_blank" rel="noopener">{website.clone()}</a>
                                        </div>
                                    })}
                                </TableCell>
                                <TableCell>{contact}</TableCell>
                                <TableCell>{days}</TableCell>
                                <TableCell>{supplies}</TableCell>
                                <TableCell>
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
    fn test_split_list_drops_blanks() {
        assert_eq!(split_list(" Flour, Eggs ,,\nMilk\n"), vec!["Flour", "Eggs", "Milk"]);
        assert!(split_list(" , ").is_empty());
    }
}
