use crate::domain::a001_menu_category::api;
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use contracts::domain::a001_menu_category::aggregate::{CategoryKind, MenuCategory, MenuCategoryDto};
use contracts::domain::common::AggregateId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    pub icon: String,
    pub sort_order: i32,
}

impl From<MenuCategory> for CategoryRow {
    fn from(c: MenuCategory) -> Self {
        Self {
            id: c.base.id.as_string(),
            name: c.name().to_string(),
            kind: c.kind.as_str(),
            icon: c.icon,
            sort_order: c.sort_order,
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn CategoryList() -> impl IntoView {
    let (items, set_items) = signal::<Vec<CategoryRow>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let new_name = RwSignal::new(String::new());
    let new_icon = RwSignal::new(String::new());
    let new_kind = RwSignal::new(CategoryKind::Meal.as_str().to_string());

    let fetch = move || {
        spawn_local(async move {
            match api::fetch_categories().await {
                Ok(v) => {
                    set_items.set(v.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let create = move |_| {
        let name = new_name.get().trim().to_string();
        if name.is_empty() {
            set_error.set(Some("Category name is required".to_string()));
            return;
        }
        let icon_value = new_icon.get().trim().to_string();
        let dto = MenuCategoryDto {
            name,
            kind: Some(new_kind.get()),
            icon: (!icon_value.is_empty()).then_some(icon_value),
            sort_order: Some(items.with_untracked(|v| v.len() as i32)),
        };
        spawn_local(async move {
            match api::create_category(&dto).await {
                Ok(_) => {
                    new_name.set(String::new());
                    new_icon.set(String::new());
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let remove = move |id: String, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message(&format!("Delete category \"{}\"?", name)).ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match api::delete_category(&id).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Menu categories">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />

            <div class="inline-form">
                <Input value=new_name placeholder="Name, e.g. Breakfast" />
                <Input value=new_icon placeholder="Icon (emoji)" attr:style="width: 120px;" />
                <Select value=new_kind>
                    <option value="meal">"Meal"</option>
                    <option value="drink">"Drink"</option>
                    <option value="dessert">"Dessert"</option>
                </Select>
                <Button appearance=ButtonAppearance::Primary on_click=create>
                    {icon("plus")}
                    "Add category"
                </Button>
            </div>

            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>""</TableHeaderCell>
                        <TableHeaderCell>"Name"</TableHeaderCell>
                        <TableHeaderCell>"Kind"</TableHeaderCell>
                        <TableHeaderCell>"Order"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || items.get().into_iter().map(|row| {
                        let id = row.id.clone();
                        let name = row.name.clone();
                        view! {
                            <TableRow>
                                <TableCell>{row.icon}</TableCell>
                                <TableCell>{row.name}</TableCell>
                                <TableCell>{row.kind}</TableCell>
                                <TableCell>{row.sort_order}</TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        on_click=move |_| remove(id.clone(), name.clone())
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
