use super::dialogs::PosDialogs;
use crate::domain::a006_incident_report::ui::ReportTarget;
use crate::usecases::u501_pos_terminal::state::PosState;
use contracts::domain::a007_payment::aggregate::PaymentMethod;
use contracts::shared::money::format_gbp;
use contracts::usecases::u501_pos_terminal::CartItem;
use leptos::prelude::*;
use thaw::*;

fn item_details(item: &CartItem) -> Option<String> {
    let parts: Vec<&str> = [item.options.as_deref(), item.note.as_deref()]
        .into_iter()
        .flatten()
        .filter(|s| !s.trim().is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" · "))
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Cart being built, the table's sent bill, adjustments and payment actions
#[component]
pub fn BillPanel(
    state: PosState,
    dialogs: PosDialogs,
    report_target: RwSignal<Option<ReportTarget>>,
) -> impl IntoView {
    let has_table = move || state.table.with(|t| t.is_some());
    let has_bill = move || state.bill_lines.with(|l| !l.is_empty());
    let service_label = move || format!("{}%", state.service_rate.get());

    // Newest unpaid row of a stacked bill item is the one reported on
    let report = move |item: CartItem| {
        let target = state.bill_lines.with_untracked(|lines| {
            lines
                .iter()
                .filter(|l| l.meal_name == item.name && (l.unit_price() - item.price).abs() < 0.005)
                .max_by_key(|l| l.created_at)
                .map(|l| ReportTarget {
                    order_id: l.id.clone(),
                    item_name: l.meal_name.clone(),
                    quantity: l.quantity,
                })
        });
        if target.is_some() {
            report_target.set(target);
            dialogs.report.set(true);
        }
    };

    view! {
        <aside class="pos-bill">
            <section class="pos-cart">
                <h3>
                    "New items "
                    <span class="muted">{move || format!("({})", state.cart.with(|c| c.item_count()))}</span>
                </h3>
                <Show
                    when=move || !state.cart.with(|c| c.is_empty())
                    fallback=|| view! { <div class="empty-state">"Tap menu items to add them"</div> }
                >
                    {move || state.cart.get().items.into_iter().map(|item| {
                        let dec = item.id.clone();
                        let inc = item.id.clone();
                        let rm = item.id.clone();
                        view! {
                            <div class="cart-line">
                                <div class="cart-line__text">
                                    <span class="cart-line__name">{item.name.clone()}</span>
                                    {item_details(&item).map(|d| view! { <span class="cart-line__details">{d}</span> })}
                                </div>
                                <div class="cart-line__qty">
                                    <button on:click=move |_| state.update_cart(|c| c.change_quantity(&dec, -1))>"−"</button>
                                    <span>{item.quantity}</span>
                                    <button on:click=move |_| state.update_cart(|c| c.change_quantity(&inc, 1))>"+"</button>
                                </div>
                                <span class="cart-line__total">{format_gbp(item.line_total())}</span>
                                <button class="cart-line__remove" on:click=move |_| state.update_cart(|c| c.remove(&rm))>
                                    "×"
                                </button>
                            </div>
                        }
                    }).collect_view()}
                </Show>
                <div class="pos-cart__actions">
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || state.busy.get() || state.cart.with(|c| c.is_empty()))
                        on_click=move |_| state.place_order_command()
                    >
                        "Send to kitchen"
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| state.hold()>
                        "Hold"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| {
                            if confirm("Clear the cart?") {
                                state.update_cart(|c| c.clear());
                            }
                        }
                    >
                        "Clear"
                    </Button>
                </div>
            </section>

            <Show when=has_table>
                <section class="pos-sent">
                    <h3>"On the bill"</h3>
                    <Show
                        when=has_bill
                        fallback=|| view! { <div class="empty-state">"Nothing sent yet"</div> }
                    >
                        {move || state.bill().items.into_iter().map(|item| {
                            let details = item_details(&item);
                            let total = format_gbp(item.line_total());
                            let for_report = item.clone();
                            view! {
                                <div class="cart-line cart-line--sent">
                                    <div class="cart-line__text">
                                        <span class="cart-line__name">{format!("{} × {}", item.quantity, item.name)}</span>
                                        {details.map(|d| view! { <span class="cart-line__details">{d}</span> })}
                                    </div>
                                    <span class="cart-line__total">{total}</span>
                                    <button
                                        class="cart-line__report"
                                        title="Report a problem"
                                        on:click=move |_| report(for_report.clone())
                                    >
                                        "!"
                                    </button>
                                </div>
                            }
                        }).collect_view()}
                    </Show>
                </section>
            </Show>

            <section class="pos-adjustments">
                <div class="inline-form">
                    <Select value=state.discount_kind attr:style="width: 90px;">
                        <option value="percent">"% off"</option>
                        <option value="amount">"£ off"</option>
                    </Select>
                    <Input value=state.discount_value placeholder="Discount" attr:style="width: 100px;" />
                    <Checkbox checked=state.service_enabled label="Service" />
                    <span class="muted">{service_label}</span>
                </div>
                {move || {
                    let totals = state.totals();
                    view! {
                        <div class="pos-totals">
                            <div><span>"Subtotal"</span><span>{format_gbp(totals.subtotal)}</span></div>
                            {(totals.discount > 0.0).then(|| view! {
                                <div><span>"Discount"</span><span>{format!("−{}", format_gbp(totals.discount))}</span></div>
                            })}
                            {(totals.service > 0.0).then(|| view! {
                                <div><span>"Service"</span><span>{format_gbp(totals.service)}</span></div>
                            })}
                            <div class="pos-totals__grand"><span>"Total"</span><span>{format_gbp(totals.grand_total)}</span></div>
                            {(totals.shares_paid > 0.0).then(|| view! {
                                <div><span>"Paid in shares"</span><span>{format!("−{}", format_gbp(totals.shares_paid))}</span></div>
                                <div class="pos-totals__grand"><span>"Still owed"</span><span>{format_gbp(totals.amount_due)}</span></div>
                            })}
                        </div>
                    }
                }}
            </section>

            <section class="pos-payment">
                <Select value=state.payment_method>
                    <option value=PaymentMethod::Card.as_str()>"Card"</option>
                    <option value=PaymentMethod::Cash.as_str()>"Cash"</option>
                </Select>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=state.busy
                    on_click=move |_| state.complete_payment_command()
                >
                    "Complete payment"
                </Button>
                <Show when=has_table>
                    <div class="pos-payment__table-actions">
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || !has_bill())
                            on_click=move |_| dialogs.split_items.set(true)
                        >
                            "Split items"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            disabled=Signal::derive(move || !has_bill())
                            on_click=move |_| dialogs.split_people.set(true)
                        >
                            "Split people"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| dialogs.transfer.set(true)
                        >
                            "Transfer"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            disabled=Signal::derive(move || !has_bill())
                            on_click=move |_| {
                                if confirm("Remove every unpaid item from this table?") {
                                    state.clear_unpaid_command();
                                }
                            }
                        >
                            "Clear unpaid"
                        </Button>
                        <Button
                            size=ButtonSize::Small
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| {
                                let message = if has_bill() {
                                    "This table still has unpaid items. Close it anyway?"
                                } else {
                                    "Close this table?"
                                };
                                if confirm(message) {
                                    state.close_table_command();
                                }
                            }
                        >
                            "Close table"
                        </Button>
                    </div>
                </Show>
            </section>
        </aside>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_details_joins_option_and_note() {
        let item = CartItem {
            id: "m1-1".into(),
            meal_id: Some("m1".into()),
            name: "Full English".into(),
            price: 9.5,
            quantity: 1,
            category: "breakfast".into(),
            options: Some("Brown Bread".into()),
            note: Some("no beans".into()),
        };
        assert_eq!(item_details(&item).as_deref(), Some("Brown Bread · no beans"));

        let plain = CartItem {
            options: None,
            note: Some("  ".into()),
            ..item
        };
        assert_eq!(item_details(&plain), None);
    }
}
