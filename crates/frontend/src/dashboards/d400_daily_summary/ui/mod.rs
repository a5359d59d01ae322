use crate::dashboards::d400_daily_summary::api;
use crate::domain::a006_incident_report::api as reports_api;
use crate::shared::components::{ErrorBox, PageHeader, StatCard, StatTone, TableCellMoney};
use crate::shared::date_utils::{format_local_time, today_iso};
use crate::shared::icons::icon;
use contracts::dashboards::d400_daily_summary::dto::DailySummary;
use contracts::domain::a006_incident_report::aggregate::IncidentReport;
use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// One day's takings, best sellers and incidents
#[component]
pub fn DailySummaryDashboard() -> impl IntoView {
    let date = RwSignal::new(today_iso());
    let (summary, set_summary) = signal(None::<DailySummary>);
    let (reports, set_reports) = signal(Vec::<IncidentReport>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        let day = date.get();
        if day.is_empty() {
            return;
        }
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_summary(&day).await {
                Ok(data) => {
                    set_summary.set(Some(data));
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load daily summary: {}", e);
                    set_error.set(Some(e));
                }
            }
            match reports_api::list_for_day(&day).await {
                Ok(list) => set_reports.set(list),
                Err(e) => log::warn!("Failed to load reports: {}", e),
            }
            set_loading.set(false);
        });
    });

    let stat = move |f: fn(&DailySummary) -> String| {
        Signal::derive(move || summary.with(|s| s.as_ref().map(f)))
    };

    view! {
        <div class="page dashboard">
            <PageHeader title="Daily summary">
                <input
                    type="date"
                    class="date-input"
                    prop:value=move || date.get()
                    on:change=move |ev| date.set(event_target_value(&ev))
                />
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| date.set(today_iso())
                >
                    {icon("refresh")}
                    "Today"
                </Button>
            </PageHeader>

            <ErrorBox message=error />

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            <div class="stat-grid">
                <StatCard
                    label="Revenue"
                    icon_name="analytics"
                    value=stat(|s| format_gbp(s.revenue))
                    tone=StatTone::Good
                />
                <StatCard
                    label="Orders"
                    icon_name="kitchen"
                    value=stat(|s| s.batches.to_string())
                    subtitle=stat(|s| format!("{} items sold", s.items_sold))
                />
                <StatCard
                    label="Average ticket"
                    icon_name="pos"
                    value=stat(|s| format_gbp(s.average_ticket))
                />
                <StatCard
                    label="Incidents"
                    icon_name="operations"
                    value=stat(|s| s.incidents.to_string())
                    tone=Signal::derive(move || match summary.with(|s| s.as_ref().map(|s| s.incidents)) {
                        Some(n) if n > 0 => StatTone::Warning,
                        _ => StatTone::Neutral,
                    })
                />
                <StatCard
                    label="Open tables"
                    icon_name="tables"
                    value=stat(|s| s.open_tables.to_string())
                />
            </div>

            <div class="dashboard-columns">
                <section>
                    <h3>"Top items"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Item"</TableHeaderCell>
                                <TableHeaderCell>"Qty"</TableHeaderCell>
                                <TableHeaderCell>"Revenue"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || summary.get().map(|s| s.top_items).unwrap_or_default().into_iter().map(|item| {
                                let revenue = item.revenue;
                                view! {
                                    <TableRow>
                                        <TableCell>{item.name}</TableCell>
                                        <TableCell>{item.quantity}</TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(revenue)) />
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </section>

                <section>
                    <h3>"Payments"</h3>
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Method"</TableHeaderCell>
                                <TableHeaderCell>"Payments"</TableHeaderCell>
                                <TableHeaderCell>"Amount"</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || summary.get().map(|s| s.by_method).unwrap_or_default().into_iter().map(|m| {
                                let amount = m.amount;
                                view! {
                                    <TableRow>
                                        <TableCell>{m.method.as_str()}</TableCell>
                                        <TableCell>{m.count}</TableCell>
                                        <TableCellMoney value=Signal::derive(move || Some(amount)) bold=true />
                                    </TableRow>
                                }
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </section>
            </div>

            <section>
                <h3>"Incidents"</h3>
                <Show
                    when=move || !reports.with(|r| r.is_empty())
                    fallback=|| view! { <div class="empty-state">"No incidents reported"</div> }
                >
                    <Table>
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell>"Time"</TableHeaderCell>
                                <TableHeaderCell>"Item"</TableHeaderCell>
                                <TableHeaderCell>"Qty"</TableHeaderCell>
                                <TableHeaderCell>"Reason"</TableHeaderCell>
                                <TableHeaderCell>"By"</TableHeaderCell>
                                <TableHeaderCell>""</TableHeaderCell>
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            {move || reports.get().into_iter().map(|r| view! {
                                <TableRow>
                                    <TableCell>{format_local_time(r.created_at)}</TableCell>
                                    <TableCell>{r.item_name}</TableCell>
                                    <TableCell>{r.quantity}</TableCell>
                                    <TableCell>{r.reason}</TableCell>
                                    <TableCell>{r.reported_by}</TableCell>
                                    <TableCell>
                                        {r.redo.then(|| view! {
                                            <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>"redo"</Badge>
                                        })}
                                    </TableCell>
                                </TableRow>
                            }).collect_view()}
                        </TableBody>
                    </Table>
                </Show>
            </section>
        </div>
    }
}
