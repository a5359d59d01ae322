use crate::domain::a006_incident_report::ui::ReportTarget;
use crate::shared::date_utils::format_local_time;
use chrono::{DateTime, Utc};
use contracts::domain::a005_order_line::aggregate::{DeliveryStatus, OrderType};
use contracts::usecases::u502_kitchen_display::batch::KitchenBatch;
use contracts::usecases::u502_kitchen_display::elapsed::Elapsed;
use contracts::usecases::u502_kitchen_display::prep_summary::total_portions;
use leptos::prelude::*;
use thaw::*;

/// One placement on the pass. Cards are draggable; dropping one card on
/// another reorders the board locally.
#[component]
pub fn BatchCard(
    batch: KitchenBatch,
    position: usize,
    #[prop(into)] now: Signal<DateTime<Utc>>,
    prep: Vec<(String, u32)>,
    dragging: RwSignal<Option<usize>>,
    #[prop(into)] on_drop: Callback<usize>,
    #[prop(into)] on_bump: Callback<KitchenBatch>,
    #[prop(into)] on_delivery: Callback<(String, DeliveryStatus)>,
    #[prop(into)] on_report: Callback<ReportTarget>,
) -> impl IntoView {
    let created_at = batch.created_at;
    let elapsed = move || Elapsed::between(created_at, now.get());
    let awaiting = batch.awaits_decision();
    let paid = batch.is_paid();
    let batch_id = batch.batch_id.clone().unwrap_or_else(|| batch.key.clone());
    let accept_id = batch_id.clone();
    let decline_id = batch_id;
    let for_bump = batch.clone();
    let portions = total_portions(&prep);

    view! {
        <div
            class=move || {
                let mut class = format!("kds-card {}", elapsed().level().css_class());
                if paid {
                    class.push_str(" kds-card--paid");
                }
                if dragging.get() == Some(position) {
                    class.push_str(" kds-card--dragging");
                }
                class
            }
            draggable="true"
            on:dragstart=move |ev: web_sys::DragEvent| {
                if let Some(dt) = ev.data_transfer() {
                    let _ = dt.set_data("text/plain", &position.to_string());
                }
                dragging.set(Some(position));
            }
            on:dragend=move |_| dragging.set(None)
            on:dragover=move |ev: web_sys::DragEvent| ev.prevent_default()
            on:drop=move |ev: web_sys::DragEvent| {
                ev.prevent_default();
                on_drop.run(position);
            }
        >
            <div class="kds-card__header">
                <span class="kds-card__title">{batch.title()}</span>
                <span class="kds-card__time">{format_local_time(batch.created_at)}</span>
            </div>
            <div class="kds-card__meta">
                <span class="kds-card__elapsed">{move || elapsed().text()}</span>
                {(batch.order_type == OrderType::Takeaway).then(|| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>"Takeaway"</Badge>
                })}
                {paid.then(|| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"Paid"</Badge>
                })}
                {batch.delivery_code.clone().map(|code| view! {
                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Informative>
                        {format!("Code {}", code)}
                    </Badge>
                })}
            </div>

            <ul class="kds-card__items">
                {batch.items.iter().map(|item| {
                    let target = ReportTarget {
                        order_id: item.id.clone(),
                        item_name: item.meal_name.clone(),
                        quantity: item.quantity,
                    };
                    view! {
                        <li class="kds-item">
                            <div class="kds-item__line">
                                <span class="kds-item__qty">{format!("{}×", item.quantity)}</span>
                                <span class="kds-item__name">{item.meal_name.clone()}</span>
                                <button
                                    class="kds-item__report"
                                    title="Report a problem"
                                    on:click=move |_| on_report.run(target.clone())
                                >
                                    "!"
                                </button>
                            </div>
                            {item.options_text().map(|o| view! { <div class="kds-item__options">{o}</div> })}
                            {item.note_text().map(|n| view! { <div class="kds-item__note">{format!("Note: {}", n)}</div> })}
                        </li>
                    }
                }).collect_view()}
            </ul>

            {(!prep.is_empty()).then(|| view! {
                <div class="kds-card__prep">
                    <div class="kds-card__prep-title">{format!("Prep ({} portions)", portions)}</div>
                    <div class="kds-card__prep-list">
                        {prep.iter().map(|(label, count)| view! {
                            <span class="prep-chip">{format!("{} {}", count, label)}</span>
                        }).collect_view()}
                    </div>
                </div>
            })}

            <div class="kds-card__actions">
                {if awaiting {
                    view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_delivery.run((accept_id.clone(), DeliveryStatus::Accepted))
                        >
                            "Accept"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_delivery.run((decline_id.clone(), DeliveryStatus::Declined))
                        >
                            "Decline"
                        </Button>
                    }.into_any()
                } else {
                    view! {
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| on_bump.run(for_bump.clone())
                        >
                            "Done"
                        </Button>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
