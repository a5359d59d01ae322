use crate::projections::p901_restock_list::api;
use crate::projections::p902_smart_order::api as ordering_api;
use crate::shared::components::{ErrorBox, PageHeader, TableCellMoney};
use crate::shared::icons::icon;
use contracts::projections::p901_restock_list::dto::{RestockList, RestockUrgency};
use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

fn urgency_color(urgency: RestockUrgency) -> BadgeColor {
    match urgency {
        RestockUrgency::Urgent => BadgeColor::Danger,
        RestockUrgency::OrderSoon => BadgeColor::Warning,
        RestockUrgency::CanWait => BadgeColor::Success,
    }
}

/// Shopping list: everything at or under its minimum level.
#[component]
#[allow(non_snake_case)]
pub fn RestockListView() -> impl IntoView {
    let (list, set_list) = signal(RestockList::default());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_restock_list().await {
                Ok(data) => {
                    set_list.set(data);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let auto_restock = move |stock_id: String| {
        spawn_local(async move {
            match ordering_api::auto_restock(&stock_id).await {
                Ok(order) => {
                    set_notice.set(Some(format!(
                        "Ordered {} from {} ({})",
                        order.lines.first().map(|l| l.ingredient.as_str()).unwrap_or_default(),
                        order.supplier_name,
                        format_gbp(order.total)
                    )));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let print = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader
                title="Restock list"
                subtitle=Signal::derive(move || list.with(|l| {
                    Some(format!("{} line(s), {} urgent", l.lines.len(), l.urgent_count()))
                }))
            >
                <Button appearance=ButtonAppearance::Secondary on_click=print>
                    "Print"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />
            {move || notice.get().map(|n| view! { <div class="notice-box">{n}</div> })}

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            <Show
                when=move || !list.with(|l| l.lines.is_empty())
                fallback=|| view! { <div class="empty-state">"Nothing needs ordering"</div> }
            >
                <Table>
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell>"Ingredient"</TableHeaderCell>
                            <TableHeaderCell>"In stock"</TableHeaderCell>
                            <TableHeaderCell>"Minimum"</TableHeaderCell>
                            <TableHeaderCell>"Order"</TableHeaderCell>
                            <TableHeaderCell>"Unit price"</TableHeaderCell>
                            <TableHeaderCell>"Est. cost"</TableHeaderCell>
                            <TableHeaderCell>"Urgency"</TableHeaderCell>
                            <TableHeaderCell>""</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        {move || list.get().lines.into_iter().map(|line| {
                            let cost = line.estimated_cost;
                            let stock_id = line.stock_id.clone();
                            view! {
                            <TableRow>
                                <TableCell>{line.ingredient.clone()}</TableCell>
                                <TableCell>{format!("{} {}", line.quantity, line.unit)}</TableCell>
                                <TableCell>{line.minimum_level.to_string()}</TableCell>
                                <TableCell><strong>{format!("{} {}", line.order_amount, line.unit)}</strong></TableCell>
                                <TableCell>{format_gbp(line.unit_price)}</TableCell>
                                <TableCellMoney value=Signal::derive(move || Some(cost)) />
                                <TableCell>
                                    <Badge appearance=BadgeAppearance::Tint color=urgency_color(line.urgency)>
                                        {line.urgency.label()}
                                    </Badge>
                                </TableCell>
                                <TableCell>
                                    <Button
                                        size=ButtonSize::Small
                                        appearance=ButtonAppearance::Subtle
                                        attr:title="Order from the supplier that delivers soonest"
                                        on_click=move |_| auto_restock(stock_id.clone())
                                    >
                                        "Auto restock"
                                    </Button>
                                </TableCell>
                            </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
                <div class="totals-line">
                    "Estimated total: "
                    <strong>{move || format_gbp(list.with(|l| l.estimated_total))}</strong>
                </div>
            </Show>
        </div>
    }
}
