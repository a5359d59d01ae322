use crate::domain::a009_supplier_order::api as history_api;
use crate::projections::p902_smart_order::api;
use crate::shared::components::{ErrorBox, PageHeader, TableCellMoney};
use crate::shared::date_utils::format_datetime;
use crate::shared::icons::icon;
use contracts::domain::a009_supplier_order::aggregate::{SupplierOrder, SupplierOrderStatus};
use contracts::projections::p902_smart_order::dto::{SmartOrder, SupplierGroup};
use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

pub fn delivery_label(days: Option<u32>) -> String {
    match days {
        Some(0) => "Delivers today".to_string(),
        Some(1) => "Delivers tomorrow".to_string(),
        Some(n) => format!("Delivers in {} days", n),
        None => "No delivery days".to_string(),
    }
}

fn status_color(status: SupplierOrderStatus) -> BadgeColor {
    match status {
        SupplierOrderStatus::Placed => BadgeColor::Warning,
        SupplierOrderStatus::Received => BadgeColor::Success,
    }
}

/// Restock list grouped by supplier, plus the orders already sent.
#[component]
#[allow(non_snake_case)]
pub fn OrderingHubView() -> impl IntoView {
    let (smart, set_smart) = signal(SmartOrder::default());
    let (history, set_history) = signal::<Vec<SupplierOrder>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_smart_order().await {
                Ok(data) => {
                    set_smart.set(data);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            match history_api::fetch_history().await {
                Ok(data) => set_history.set(data),
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let place = move |supplier_ids: Vec<String>| {
        spawn_local(async move {
            match api::place_orders(supplier_ids).await {
                Ok(orders) => {
                    let total: f64 = orders.iter().map(|o| o.total).sum();
                    set_notice.set(Some(format!(
                        "Placed {} order(s), {}",
                        orders.len(),
                        format_gbp(total)
                    )));
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let receive = move |id: String| {
        spawn_local(async move {
            match history_api::receive(&id).await {
                Ok(order) => {
                    set_notice.set(Some(format!("Delivery from {} booked into stock", order.supplier_name)));
                    fetch();
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    let group_view = move |group: SupplierGroup| {
        let assigned = group.is_assigned();
        let supplier_id = group.supplier_id.clone().unwrap_or_default();
        let subtotal = group.subtotal;
        view! {
            <div class="order-group" class:order-group--unassigned=!assigned>
                <div class="order-group__header">
                    <strong>{group.supplier_name.clone()}</strong>
                    <span class="muted">
                        {if assigned { delivery_label(group.days_until_delivery) } else { "Add a supplier that carries these".to_string() }}
                    </span>
                    <span class="order-group__total">{format_gbp(subtotal)}</span>
                    {assigned.then(|| view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| place(vec![supplier_id.clone()])
                        >
                            "Place order"
                        </Button>
                    })}
                </div>
                <Table>
                    <TableBody>
                        {group.lines.into_iter().map(|line| {
                            let cost = line.estimated_cost;
                            view! {
                                <TableRow>
                                    <TableCell>{line.ingredient.clone()}</TableCell>
                                    <TableCell>{format!("{} {}", line.order_amount, line.unit)}</TableCell>
                                    <TableCell>{format_gbp(line.unit_price)}</TableCell>
                                    <TableCellMoney value=Signal::derive(move || Some(cost)) />
                                </TableRow>
                            }
                        }).collect_view()}
                    </TableBody>
                </Table>
            </div>
        }
    };

    view! {
        <div class="page">
            <PageHeader
                title="Ordering"
                subtitle=Signal::derive(move || smart.with(|s| {
                    Some(format!("{} supplier(s), {} estimated", s.groups.len(), format_gbp(s.total)))
                }))
            >
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || !smart.with(|s| s.groups.iter().any(|g| g.is_assigned())))
                    on_click=move |_| place(Vec::new())
                >
                    {icon("ordering")}
                    "Place all"
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
                when=move || !smart.with(|s| s.groups.is_empty())
                fallback=|| view! { <div class="empty-state">"Nothing needs ordering"</div> }
            >
                {move || smart.get().groups.into_iter().map(group_view).collect_view()}
            </Show>

            <h2 class="section-title">"Order history"</h2>
            <Table>
                <TableHeader>
                    <TableRow>
                        <TableHeaderCell>"Placed"</TableHeaderCell>
                        <TableHeaderCell>"Supplier"</TableHeaderCell>
                        <TableHeaderCell>"Lines"</TableHeaderCell>
                        <TableHeaderCell>"Total"</TableHeaderCell>
                        <TableHeaderCell>"By"</TableHeaderCell>
                        <TableHeaderCell>"Status"</TableHeaderCell>
                        <TableHeaderCell>""</TableHeaderCell>
                    </TableRow>
                </TableHeader>
                <TableBody>
                    {move || history.get().into_iter().map(|order| {
                        let id = order.id.clone();
                        let total = order.total;
                        let placed = order.status == SupplierOrderStatus::Placed;
                        let lines = order
                            .lines
                            .iter()
                            .map(|l| format!("{} {} {}", l.quantity, l.unit, l.ingredient))
                            .collect::<Vec<_>>()
                            .join(", ");
                        view! {
                            <TableRow>
                                <TableCell>{format_datetime(&order.created_at.to_rfc3339())}</TableCell>
                                <TableCell>{order.supplier_name.clone()}</TableCell>
                                <TableCell>{lines}</TableCell>
                                <TableCellMoney value=Signal::derive(move || Some(total)) />
                                <TableCell>{order.placed_by.clone()}</TableCell>
                                <TableCell>
                                    <Badge appearance=BadgeAppearance::Tint color=status_color(order.status)>
                                        {order.status.label()}
                                    </Badge>
                                </TableCell>
                                <TableCell>
                                    {placed.then(|| view! {
                                        <Button
                                            size=ButtonSize::Small
                                            appearance=ButtonAppearance::Secondary
                                            on_click=move |_| receive(id.clone())
                                        >
                                            "Receive"
                                        </Button>
                                    })}
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
    fn test_delivery_label() {
        assert_eq!(delivery_label(Some(0)), "Delivers today");
        assert_eq!(delivery_label(Some(1)), "Delivers tomorrow");
        assert_eq!(delivery_label(Some(4)), "Delivers in 4 days");
        assert_eq!(delivery_label(None), "No delivery days");
    }
}
