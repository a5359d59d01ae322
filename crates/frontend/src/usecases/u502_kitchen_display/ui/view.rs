use super::card::BatchCard;
use crate::domain::a001_menu_category::api as category_api;
use crate::domain::a002_meal::api as meal_api;
use crate::domain::a006_incident_report::ui::{ReportDialog, ReportTarget};
use crate::shared::browser_storage;
use crate::shared::components::{ErrorBox, PageHeader};
use crate::shared::icons::icon;
use crate::usecases::u502_kitchen_display::api;
use chrono::Utc;
use contracts::domain::a002_meal::aggregate::IngredientsIndex;
use contracts::domain::a005_order_line::aggregate::DeliveryStatus;
use contracts::domain::a006_incident_report::aggregate::IncidentReport;
use contracts::usecases::u502_kitchen_display::batch::{
    apply_manual_order, group_batches, move_batch, KitchenBatch,
};
use contracts::usecases::u502_kitchen_display::categories::{merge_categories, retain_active, toggle};
use contracts::usecases::u502_kitchen_display::prep_summary::summarize;
use contracts::usecases::u502_kitchen_display::request::EstimatedDelay;
use contracts::usecases::u502_kitchen_display::row::KitchenRow;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thaw::*;

const POLL_MS: u32 = 5_000;
const CLOCK_MS: u32 = 1_000;

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn KitchenDisplayView() -> impl IntoView {
    let rows = RwSignal::new(Vec::<KitchenRow>::new());
    let all_categories = RwSignal::new(merge_categories(std::iter::empty()));
    let active = RwSignal::new(retain_active(
        &all_categories.get_untracked(),
        &browser_storage::load_kds_categories(),
    ));
    let manual_order = RwSignal::new(Vec::<String>::new());
    let delay = RwSignal::new(None::<EstimatedDelay>);
    let paused = RwSignal::new(false);
    let index = RwSignal::new(IngredientsIndex::new());
    let last_cleared = RwSignal::new(browser_storage::load_last_cleared());
    let now = RwSignal::new(Utc::now());
    let dragging = RwSignal::new(None::<usize>);
    let report_open = RwSignal::new(false);
    let report_target = RwSignal::new(None::<ReportTarget>);
    let (error, set_error) = signal(None::<String>);
    let (notice, set_notice) = signal(None::<String>);

    let batches = Memo::new(move |_| {
        let grouped = active.with(|a| group_batches(rows.get(), a));
        manual_order.with(|order| apply_manual_order(grouped, order))
    });

    let refresh = move || async move {
        match api::fetch_rows().await {
            Ok(list) => {
                rows.set(list);
                set_error.set(None);
            }
            Err(e) => set_error.set(Some(e)),
        }
        match api::fetch_delay().await {
            Ok(d) => delay.set(Some(d)),
            Err(e) => log::warn!("Estimated delay unavailable: {}", e),
        }
    };

    // Categories, recipes and pause state once; orders on a timer
    spawn_local(async move {
        match category_api::fetch_categories().await {
            Ok(list) => {
                let names: Vec<String> = list.iter().map(|c| c.normalized_name()).collect();
                let merged = merge_categories(names.iter().map(String::as_str));
                active.set(retain_active(&merged, &browser_storage::load_kds_categories()));
                all_categories.set(merged);
            }
            Err(e) => log::warn!("Categories unavailable: {}", e),
        }
        match meal_api::fetch_ingredients_index().await {
            Ok(map) => index.set(map),
            Err(e) => log::warn!("Ingredients index unavailable: {}", e),
        }
        match api::fetch_pause().await {
            Ok(status) => paused.set(status.is_paused),
            Err(e) => log::warn!("Pause status unavailable: {}", e),
        }
    });

    let alive = Arc::new(AtomicBool::new(true));
    {
        let alive = alive.clone();
        on_cleanup(move || alive.store(false, Ordering::Relaxed));
    }
    {
        let alive = alive.clone();
        spawn_local(async move {
            while alive.load(Ordering::Relaxed) {
                refresh().await;
                TimeoutFuture::new(POLL_MS).await;
            }
        });
    }
    spawn_local(async move {
        while alive.load(Ordering::Relaxed) {
            TimeoutFuture::new(CLOCK_MS).await;
            if alive.load(Ordering::Relaxed) {
                now.set(Utc::now());
            }
        }
    });

    let set_active = move |next: Vec<String>| {
        browser_storage::save_kds_categories(&next);
        active.set(next);
    };

    let on_drop = move |to: usize| {
        let Some(from) = dragging.get_untracked() else {
            return;
        };
        dragging.set(None);
        let mut list = batches.get_untracked();
        move_batch(&mut list, from, to);
        manual_order.set(list.into_iter().map(|b| b.key).collect());
    };

    let on_bump = move |batch: KitchenBatch| {
        spawn_local(async move {
            for id in batch.row_ids() {
                if let Err(e) = api::bump_row(&id).await {
                    set_error.set(Some(e));
                    break;
                }
            }
            manual_order.update(|order| order.retain(|k| *k != batch.key));
            refresh().await;
        });
    };

    let on_delivery = move |(batch_id, status): (String, DeliveryStatus)| {
        spawn_local(async move {
            match api::set_delivery_status(&batch_id, status).await {
                Ok(response) => {
                    set_notice.set(match (status, response.delivery_code) {
                        (DeliveryStatus::Accepted, Some(code)) => Some(format!("Delivery accepted, code {}", code)),
                        (DeliveryStatus::Declined, _) => Some("Delivery declined".to_string()),
                        _ => None,
                    });
                    refresh().await;
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let on_report = move |target: ReportTarget| {
        report_target.set(Some(target));
        report_open.set(true);
    };

    let on_report_done = move |report: IncidentReport| {
        set_notice.set(Some(if report.redo {
            format!("{} reported and sent again", report.item_name)
        } else {
            format!("{} reported", report.item_name)
        }));
        spawn_local(refresh());
    };

    let clear_all = move |_| {
        if !confirm("Clear every order from the kitchen screen?") {
            return;
        }
        spawn_local(async move {
            match api::clear_all().await {
                Ok(cleared) => {
                    browser_storage::save_last_cleared(&cleared.ids);
                    set_notice.set(Some(format!("Cleared {} row(s)", cleared.ids.len())));
                    last_cleared.set(cleared.ids);
                    manual_order.set(Vec::new());
                    refresh().await;
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let restore = move |_| {
        let ids = last_cleared.get_untracked();
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::restore(ids).await {
                Ok(result) => {
                    browser_storage::save_last_cleared(&[]);
                    last_cleared.set(Vec::new());
                    set_notice.set(Some(format!("Restored {} row(s)", result.affected)));
                    refresh().await;
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let toggle_pause = move |_| {
        let next = !paused.get_untracked();
        spawn_local(async move {
            match api::set_pause(next).await {
                Ok(status) => paused.set(status.is_paused),
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <div class="page kds">
            <PageHeader
                title="Kitchen"
                subtitle=Signal::derive(move || delay.get().map(|d| {
                    format!("{} open order(s) · about {} min", d.open_batches, d.delay)
                }))
            >
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=toggle_pause
                >
                    {move || if paused.get() { icon("play") } else { icon("pause") }}
                    {move || if paused.get() { "Resume remote orders" } else { "Pause remote orders" }}
                </Button>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || last_cleared.with(|ids| ids.is_empty()))
                    on_click=restore
                >
                    "Restore"
                </Button>
                <Button appearance=ButtonAppearance::Subtle on_click=clear_all>
                    {icon("delete")}
                    "Clear all"
                </Button>
            </PageHeader>

            <Show when=move || paused.get()>
                <div class="warning-box">"Kitchen paused: delivery and collection orders are refused"</div>
            </Show>
            <ErrorBox message=error />
            {move || notice.get().map(|n| view! { <div class="notice-box">{n}</div> })}

            <div class="kds-categories">
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| set_active(all_categories.get_untracked())
                >
                    "All"
                </Button>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| set_active(Vec::new())
                >
                    "None"
                </Button>
                {move || all_categories.get().into_iter().map(|category| {
                    let on = active.with(|a| a.contains(&category));
                    let name = category.clone();
                    view! {
                        <button
                            class="kds-toggle"
                            class:kds-toggle--on=on
                            on:click=move |_| {
                                let next = toggle(&all_categories.get_untracked(), &active.get_untracked(), &name);
                                set_active(next);
                            }
                        >
                            {category}
                        </button>
                    }
                }).collect_view()}
            </div>

            <Show
                when=move || !batches.with(|b| b.is_empty())
                fallback=|| view! { <div class="empty-state">"No orders on the pass"</div> }
            >
                <div class="kds-board">
                    {move || {
                        let recipes = index.get();
                        batches.get().into_iter().enumerate().map(|(position, batch)| {
                            let prep = summarize(&batch, &recipes);
                            view! {
                                <BatchCard
                                    batch=batch
                                    position=position
                                    now=now
                                    prep=prep
                                    dragging=dragging
                                    on_drop=on_drop
                                    on_bump=on_bump
                                    on_delivery=on_delivery
                                    on_report=on_report
                                />
                            }
                        }).collect_view()
                    }}
                </div>
            </Show>

            <ReportDialog open=report_open target=report_target on_done=on_report_done />
        </div>
    }
}
