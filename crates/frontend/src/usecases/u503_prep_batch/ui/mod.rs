use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use crate::usecases::u503_prep_batch::api;
use contracts::usecases::u503_prep_batch::PrepDue;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Prepped items running below their minimum, with a batch button each.
#[component]
#[allow(non_snake_case)]
pub fn PrepListView() -> impl IntoView {
    let (due, set_due) = signal::<Vec<PrepDue>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_due().await {
                Ok(v) => {
                    set_due.set(v);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let prepare = move |name: String, quantity: f64| {
        spawn_local(async move {
            match api::prepare(&name, quantity).await {
                Ok(result) => {
                    let used = result
                        .plan
                        .deductions
                        .iter()
                        .map(|d| format!("{} {} {}", d.amount, d.unit, d.ingredient))
                        .collect::<Vec<_>>()
                        .join(", ");
                    set_notice.set(Some(format!(
                        "{} ready, use by {}. Used {}",
                        result.plan.prepped_item,
                        result.expiry_date.format("%d.%m.%Y"),
                        used
                    )));
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Prep list">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />
            {move || notice.get().map(|n| view! { <div class="notice-box">{n}</div> })}

            {move || if loading.get() {
                view! { <Spinner /> }.into_any()
            } else if due.get().is_empty() {
                view! { <div class="empty-state">"Every prepped item is at its minimum"</div> }.into_any()
            } else {
                view! {
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Prepped item"</TableHeaderCell>
                                <TableHeaderCell>"In stock"</TableHeaderCell>
                                <TableHeaderCell>"Minimum"</TableHeaderCell>
                                <TableHeaderCell>"Batch"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {due.get().into_iter().map(|row| {
                                let quantity = RwSignal::new(row.to_prepare.to_string());
                                let name = row.prepped_item.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><strong>{row.prepped_item.clone()}</strong></TableCell>
                                        <TableCell>{format!("{} {}", row.in_stock, row.unit)}</TableCell>
                                        <TableCell>{format!("{} {}", row.needed, row.unit)}</TableCell>
                                        <TableCell>
                                            <Input value=quantity attr:style="width: 80px;" />
                                        </TableCell>
                                        <TableCell>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Primary
                                                on_click=move |_| {
                                                    match quantity.get_untracked().trim().parse::<f64>() {
                                                        Ok(q) => prepare(name.clone(), q),
                                                        Err(_) => set_error.set(Some("Batch quantity must be a number".to_string())),
                                                    }
                                                }
                                            >
                                                {icon("prep")}
                                                "Prepare"
                                            </Button>
                                        </TableCell>
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                }.into_any()
            }}
        </div>
    }
}
