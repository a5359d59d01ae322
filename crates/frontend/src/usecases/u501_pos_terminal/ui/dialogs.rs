use crate::usecases::u501_pos_terminal::api;
use crate::usecases::u501_pos_terminal::state::PosState;
use crate::shared::components::ErrorBox;
use crate::shared::date_utils::format_local_time;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::domain::a005_order_line::aggregate::OrderLine;
use contracts::shared::money::format_gbp;
use contracts::usecases::u501_pos_terminal::meal_options::choices_for;
use contracts::usecases::u501_pos_terminal::request::SplitByPeopleResponse;
use contracts::usecases::u501_pos_terminal::split::selected_total;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Open flags of the till dialogs
#[derive(Clone, Copy)]
pub struct PosDialogs {
    pub customise: RwSignal<bool>,
    pub misc: RwSignal<bool>,
    pub table_map: RwSignal<bool>,
    pub held: RwSignal<bool>,
    pub split_items: RwSignal<bool>,
    pub split_people: RwSignal<bool>,
    pub transfer: RwSignal<bool>,
    pub receipt: RwSignal<bool>,
    pub report: RwSignal<bool>,
}

impl PosDialogs {
    pub fn new() -> Self {
        Self {
            customise: RwSignal::new(false),
            misc: RwSignal::new(false),
            table_map: RwSignal::new(false),
            held: RwSignal::new(false),
            split_items: RwSignal::new(false),
            split_people: RwSignal::new(false),
            transfer: RwSignal::new(false),
            receipt: RwSignal::new(false),
            report: RwSignal::new(false),
        }
    }
}

/// Option choice (e.g. bread) and a free note for one menu item
#[component]
pub fn CustomiseDialog(
    state: PosState,
    open: RwSignal<bool>,
    meal: RwSignal<Option<Meal>>,
) -> impl IntoView {
    let option = RwSignal::new(String::new());
    let note = RwSignal::new(String::new());

    Effect::new(move |_| {
        if let Some(m) = meal.get() {
            option.set(choices_for(m.name()).first().map(|c| c.to_string()).unwrap_or_default());
            note.set(String::new());
        }
    });

    let add = move |_| {
        if let Some(m) = meal.get_untracked() {
            let chosen = option.get_untracked();
            let text = note.get_untracked();
            state.add_customised(
                &m,
                (!chosen.is_empty()).then_some(chosen),
                (!text.trim().is_empty()).then_some(text),
            );
        }
        open.set(false);
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || meal.get().map(|m| m.name().to_string()).unwrap_or_default()}
                    </DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Small>
                            {move || {
                                let choices = meal.get().map(|m| choices_for(m.name())).unwrap_or_default();
                                (!choices.is_empty()).then(|| view! {
                                    <div class="choice-buttons">
                                        {choices.iter().map(|choice| {
                                            let value = choice.to_string();
                                            let selected = value.clone();
                                            view! {
                                                <button
                                                    class="choice-button"
                                                    class:choice-selected=move || option.get() == selected
                                                    on:click=move |_| option.set(value.clone())
                                                >
                                                    {*choice}
                                                </button>
                                            }
                                        }).collect_view()}
                                    </div>
                                })
                            }}
                            <label>"Note for the kitchen"</label>
                            <Textarea value=note placeholder="e.g. no mushrooms" />
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=add>
                            "Add to order"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Off-menu item with a typed price
#[component]
pub fn MiscItemDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    let name = RwSignal::new(String::new());
    let price = RwSignal::new(String::new());

    let add = move |_| {
        if state.add_misc(&name.get_untracked(), &price.get_untracked()) {
            name.set(String::new());
            price.set(String::new());
            open.set(false);
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Misc item"</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Small>
                            <ErrorBox message=state.error />
                            <Input value=name placeholder="Item name" />
                            <Input value=price placeholder="Price £" />
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=add>"Add"</Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Floor plan: pick a table, or takeaway
#[component]
pub fn TableMapDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    let pick = move |table: Option<String>| {
        state.select_table(table);
        open.set(false);
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Choose a table"</DialogTitle>
                    <DialogContent>
                        <div class="table-grid table-grid--compact">
                            {move || state.tables.get().into_iter().map(|t| {
                                let name = t.name().to_string();
                                let label = name.clone();
                                let current = state.table.get().as_deref() == Some(name.as_str());
                                view! {
                                    <button
                                        class="table-card"
                                        class:table-occupied=!t.is_free()
                                        class:table-current=current
                                        on:click=move |_| pick(Some(name.clone()))
                                    >
                                        {label}
                                    </button>
                                }
                            }).collect_view()}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| pick(None)>
                            "Takeaway"
                        </Button>
                        <Button appearance=ButtonAppearance::Subtle on_click=move |_| open.set(false)>
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn HeldTicketsDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Held orders"</DialogTitle>
                    <DialogContent>
                        <Show
                            when=move || !state.held.with(|h| h.is_empty())
                            fallback=|| view! { <div class="empty-state">"No held orders"</div> }
                        >
                            <Table>
                                <TableBody>
                                    {move || state.held.get().0.into_iter().map(|ticket| {
                                        let id = ticket.id;
                                        let count: u32 = ticket.items.iter().map(|i| i.quantity).sum();
                                        view! {
                                            <TableRow>
                                                <TableCell>{format_local_time(ticket.created_at)}</TableCell>
                                                <TableCell>{ticket.table.clone().unwrap_or_else(|| "Takeaway".to_string())}</TableCell>
                                                <TableCell>{format!("{} item(s)", count)}</TableCell>
                                                <TableCell>{format_gbp(ticket.total)}</TableCell>
                                                <TableCell>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Primary
                                                        on_click=move |_| {
                                                            state.resume(id);
                                                            open.set(false);
                                                        }
                                                    >
                                                        "Resume"
                                                    </Button>
                                                    <Button
                                                        size=ButtonSize::Small
                                                        appearance=ButtonAppearance::Subtle
                                                        on_click=move |_| state.discard_held(id)
                                                    >
                                                        "Discard"
                                                    </Button>
                                                </TableCell>
                                            </TableRow>
                                        }
                                    }).collect_view()}
                                </TableBody>
                            </Table>
                        </Show>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Pay for ticked rows only
#[component]
pub fn SplitItemsDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    let selected = RwSignal::new(Vec::<String>::new());

    Effect::new(move |_| {
        if open.get() {
            selected.set(Vec::new());
        }
    });

    let toggle = move |id: String| {
        selected.update(|ids| {
            if let Some(pos) = ids.iter().position(|i| *i == id) {
                ids.remove(pos);
            } else {
                ids.push(id);
            }
        })
    };

    let total = move || {
        state
            .bill_lines
            .with(|lines| selected.with(|ids| selected_total(lines, ids)))
    };

    let pay = move |_| {
        let ids = selected.get_untracked();
        if ids.is_empty() {
            return;
        }
        state.split_pay_command(ids, move || open.set(false));
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Split by items"</DialogTitle>
                    <DialogContent>
                        <div class="split-list">
                            {move || state.bill_lines.get().into_iter().map(|line: OrderLine| {
                                let id = line.id.clone();
                                let checked_id = line.id.clone();
                                view! {
                                    <label class="split-row">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || selected.with(|ids| ids.contains(&checked_id))
                                            on:change=move |_| toggle(id.clone())
                                        />
                                        <span class="split-row__name">
                                            {format!("{} × {}", line.quantity, line.meal_name)}
                                        </span>
                                        <span class="split-row__price">{format_gbp(line.total_price)}</span>
                                    </label>
                                }
                            }).collect_view()}
                        </div>
                        <div class="totals-line">
                            "Selected: " <strong>{move || format_gbp(total())}</strong>
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || selected.with(|ids| ids.is_empty()))
                            on_click=pay
                        >
                            {move || format!("Pay {} by {}", format_gbp(total()), state.payment_method.get())}
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Even shares paid one at a time; the last one settles the table
#[component]
pub fn SplitPeopleDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    let people = RwSignal::new("2".to_string());
    let split = RwSignal::new(None::<SplitByPeopleResponse>);
    let paid = RwSignal::new(Vec::<bool>::new());
    let remaining = RwSignal::new(None::<f64>);
    let (error, set_error) = signal(None::<String>);

    Effect::new(move |_| {
        if open.get() {
            split.set(None);
            paid.set(Vec::new());
            remaining.set(None);
            set_error.set(None);
        }
    });

    let calculate = move |_| {
        let Some(table) = state.table.get_untracked() else {
            return;
        };
        let Ok(count) = people.get_untracked().trim().parse::<u32>() else {
            set_error.set(Some("Enter the number of people".to_string()));
            return;
        };
        spawn_local(async move {
            match api::split_by_people(&table, count).await {
                Ok(response) => {
                    paid.set(vec![false; response.shares.len()]);
                    remaining.set(Some(response.total));
                    split.set(Some(response));
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    let pay_share = move |index: usize, amount: f64| {
        let Some(table) = state.table.get_untracked() else {
            return;
        };
        let method = state.method();
        spawn_local(async move {
            match api::pay_share(&table, amount, method).await {
                Ok(response) => {
                    paid.update(|p| {
                        if let Some(flag) = p.get_mut(index) {
                            *flag = true;
                        }
                    });
                    remaining.set(Some(response.remaining));
                    state.refresh_bill();
                    if response.settled {
                        open.set(false);
                        state.load_tables();
                    }
                }
                Err(e) => set_error.set(Some(e)),
            }
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Split by people"</DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Small>
                            <ErrorBox message=error />
                            <div class="inline-form">
                                <Input value=people input_type=InputType::Number attr:style="width: 100px;" />
                                <Button appearance=ButtonAppearance::Secondary on_click=calculate>
                                    "Calculate"
                                </Button>
                            </div>
                            {move || split.get().map(|s| view! {
                                <div class="share-list">
                                    <div>"Total: " <strong>{format_gbp(s.total)}</strong></div>
                                    {s.shares.iter().copied().enumerate().map(|(index, amount)| {
                                        let done = move || paid.with(|p| p.get(index).copied().unwrap_or(false));
                                        view! {
                                            <div class="share-row">
                                                <span>{format!("Person {}", index + 1)}</span>
                                                <strong>{format_gbp(amount)}</strong>
                                                {move || if done() {
                                                    view! {
                                                        <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Success>"paid"</Badge>
                                                    }.into_any()
                                                } else {
                                                    view! {
                                                        <Button
                                                            size=ButtonSize::Small
                                                            appearance=ButtonAppearance::Primary
                                                            on_click=move |_| pay_share(index, amount)
                                                        >
                                                            "Pay"
                                                        </Button>
                                                    }.into_any()
                                                }}
                                            </div>
                                        }
                                    }).collect_view()}
                                </div>
                            })}
                            {move || remaining.get().map(|r| view! {
                                <div class="totals-line">"Remaining: " <strong>{format_gbp(r)}</strong></div>
                            })}
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| {
                            open.set(false);
                            state.refresh_bill();
                        }>
                            "Close"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

/// Moves the table's open rows to another table
#[component]
pub fn TransferDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    let target = RwSignal::new(String::new());

    let confirm = move |_| {
        let to = target.get_untracked();
        if to.is_empty() {
            return;
        }
        state.transfer_command(to);
        open.set(false);
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || format!("Move {} to", state.table.get().unwrap_or_default())}
                    </DialogTitle>
                    <DialogContent>
                        <Select value=target>
                            <option value="">"Select table"</option>
                            {move || {
                                let current = state.table.get();
                                state.tables.get().into_iter()
                                    .filter(|t| Some(t.name()) != current.as_deref())
                                    .map(|t| {
                                        let name = t.name().to_string();
                                        let label = if t.is_free() { name.clone() } else { format!("{} (occupied)", name) };
                                        view! { <option value=name>{label}</option> }
                                    })
                                    .collect_view()
                            }}
                        </Select>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button appearance=ButtonAppearance::Primary on_click=confirm>"Move"</Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[component]
pub fn ReceiptDialog(state: PosState, open: RwSignal<bool>) -> impl IntoView {
    Effect::new(move |_| {
        if state.receipt.with(|r| r.is_some()) {
            open.set(true);
        }
    });

    let close = move |_| {
        open.set(false);
        state.receipt.set(None);
    };

    let print = move |_| {
        if let Some(window) = web_sys::window() {
            let _ = window.print();
        }
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Receipt"</DialogTitle>
                    <DialogContent>
                        <pre class="receipt">{move || state.receipt.get().unwrap_or_default()}</pre>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=print>"Print"</Button>
                        <Button appearance=ButtonAppearance::Primary on_click=close>"Done"</Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
