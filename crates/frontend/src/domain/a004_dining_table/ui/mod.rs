use crate::domain::a004_dining_table::api;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use contracts::domain::a004_dining_table::aggregate::{DiningTable, TableStatus};
use contracts::domain::common::AggregateId;
use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::{BTreeMap, HashMap};
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct TableCard {
    pub id: String,
    pub name: String,
    pub zone: String,
    pub seats: i32,
    pub status: TableStatus,
}

impl From<DiningTable> for TableCard {
    fn from(t: DiningTable) -> Self {
        Self {
            id: t.base.id.as_string(),
            name: t.name().to_string(),
            zone: t.zone,
            seats: t.seats,
            status: t.status,
        }
    }
}

/// Tables by zone, zones and tables in natural order ("Table 2" before "Table 10").
pub fn group_by_zone(cards: Vec<TableCard>) -> Vec<(String, Vec<TableCard>)> {
    let mut zones: BTreeMap<String, Vec<TableCard>> = BTreeMap::new();
    for card in cards {
        zones.entry(card.zone.clone()).or_default().push(card);
    }
    zones
        .into_iter()
        .map(|(zone, mut cards)| {
            cards.sort_by_key(|c| natural_key(&c.name));
            (zone, cards)
        })
        .collect()
}

fn natural_key(name: &str) -> (String, u64) {
    let digits: String = name.chars().filter(|c| c.is_ascii_digit()).collect();
    let prefix: String = name.chars().filter(|c| !c.is_ascii_digit()).collect();
    (prefix.trim().to_lowercase(), digits.parse().unwrap_or(0))
}

#[component]
#[allow(non_snake_case)]
pub fn TableBoard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let (tables, set_tables) = signal::<Vec<TableCard>>(Vec::new());
    let (totals, set_totals) = signal::<HashMap<String, (f64, u32)>>(HashMap::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (loading, set_loading) = signal(false);

    let fetch = move || {
        set_loading.set(true);
        spawn_local(async move {
            match api::fetch_tables().await {
                Ok(list) => {
                    let cards: Vec<TableCard> = list.into_iter().map(Into::into).collect();
                    let mut balances = HashMap::new();
                    for card in &cards {
                        match api::fetch_total(&card.id).await {
                            Ok(t) if t.unpaid_items > 0 => {
                                balances.insert(card.id.clone(), (t.total, t.unpaid_items));
                            }
                            Ok(_) => {}
                            Err(e) => log::warn!("Total for {} unavailable: {}", card.name, e),
                        }
                    }
                    set_tables.set(cards);
                    set_totals.set(balances);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_loading.set(false);
        });
    };

    let toggle_status = move |card: TableCard| {
        let next = match card.status {
            TableStatus::Free => TableStatus::Occupied,
            TableStatus::Occupied => TableStatus::Free,
        };
        spawn_local(async move {
            match api::set_status(&card.id, next).await {
                Ok(()) => fetch(),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <PageHeader title="Tables" subtitle="Tap a table to open it on the till".to_string()>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| fetch()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
            </PageHeader>

            <ErrorBox message=error />

            <Show when=move || loading.get()>
                <Spinner />
            </Show>

            {move || group_by_zone(tables.get()).into_iter().map(|(zone, cards)| {
                view! {
                    <section class="table-zone">
                        <h3>{zone}</h3>
                        <div class="table-grid">
                            {cards.into_iter().map(|card| {
                                let balance = totals.with(|t| t.get(&card.id).copied());
                                let occupied = card.status == TableStatus::Occupied || balance.is_some();
                                let name_open = card.name.clone();
                                let card_toggle = card.clone();
                                view! {
                                    <div
                                        class="table-card"
                                        class:table-occupied=occupied
                                        on:click=move |_| ctx.open_pos_for_table(&name_open)
                                    >
                                        <div class="table-card-name">{card.name.clone()}</div>
                                        <div class="table-card-seats">{format!("{} seats", card.seats)}</div>
                                        {match balance {
                                            Some((total, items)) => view! {
                                                <div class="table-card-total">
                                                    <strong>{format_gbp(total)}</strong>
                                                    <span>{format!(" · {} item(s)", items)}</span>
                                                </div>
                                            }.into_any(),
                                            None => view! {
                                                <Badge
                                                    appearance=BadgeAppearance::Tint
                                                    color=if occupied { BadgeColor::Brand } else { BadgeColor::Success }
                                                >
                                                    {card.status.as_str()}
                                                </Badge>
                                            }.into_any(),
                                        }}
                                        <div class="table-card-actions" on:click=|ev| ev.stop_propagation()>
                                            <Button
                                                size=ButtonSize::Small
                                                appearance=ButtonAppearance::Subtle
                                                on_click=move |_| toggle_status(card_toggle.clone())
                                            >
                                                {if card.status == TableStatus::Free { "Seat" } else { "Free" }}
                                            </Button>
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </section>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, zone: &str) -> TableCard {
        TableCard {
            id: name.to_string(),
            name: name.to_string(),
            zone: zone.to_string(),
            seats: 4,
            status: TableStatus::Free,
        }
    }

    #[test]
    fn test_group_by_zone_orders_tables_naturally() {
        let groups = group_by_zone(vec![
            card("Table 10", "Main"),
            card("Table 2", "Main"),
            card("Table 1", "Terrace"),
        ]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Main");
        let names: Vec<_> = groups[0].1.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Table 2", "Table 10"]);
    }
}
