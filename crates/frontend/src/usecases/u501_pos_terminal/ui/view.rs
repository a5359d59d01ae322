use super::bill_panel::BillPanel;
use super::dialogs::{
    CustomiseDialog, HeldTicketsDialog, MiscItemDialog, PosDialogs, ReceiptDialog,
    SplitItemsDialog, SplitPeopleDialog, TableMapDialog, TransferDialog,
};
use super::menu_panel::{CategorySidebar, MenuGrid};
use crate::domain::a006_incident_report::ui::{ReportDialog, ReportTarget};
use crate::layout::global_context::{AppGlobalContext, POS_TABLE_STATE};
use crate::shared::components::ErrorBox;
use crate::usecases::u501_pos_terminal::state::PosState;
use contracts::domain::a002_meal::aggregate::Meal;
use contracts::domain::a005_order_line::aggregate::OrderType;
use contracts::domain::a006_incident_report::aggregate::IncidentReport;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn PosTerminalView() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let state = PosState::new();
    let dialogs = PosDialogs::new();
    let customising = RwSignal::new(None::<Meal>);
    let report_target = RwSignal::new(None::<ReportTarget>);

    state.load();

    // Table handed over from the table board
    Effect::new(move |_| {
        ctx.form_states.track();
        if let Some(value) = ctx.take_form_state(POS_TABLE_STATE) {
            if let Some(table) = value.as_str() {
                state.select_table(Some(table.to_string()));
            }
        }
    });

    let on_customise = move |meal: Meal| {
        customising.set(Some(meal));
        dialogs.customise.set(true);
    };

    let on_report_done = move |report: IncidentReport| state.report_done(report.redo);

    view! {
        <div class="pos-terminal">
            <div class="pos-toolbar">
                <select
                    class="pos-select"
                    prop:value=move || state.table.get().unwrap_or_default()
                    on:change=move |ev| {
                        let picked = event_target_value(&ev);
                        state.select_table((!picked.is_empty()).then_some(picked));
                    }
                >
                    <option value="">"Takeaway"</option>
                    {move || {
                        let current = state.table.get();
                        state.tables.get().into_iter().map(|t| {
                            let name = t.name().to_string();
                            let selected = current.as_deref() == Some(name.as_str());
                            let label = if t.is_free() { name.clone() } else { format!("{} •", name) };
                            view! { <option value=name selected=selected>{label}</option> }
                        }).collect_view()
                    }}
                </select>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| dialogs.table_map.set(true)>
                    "Table map"
                </Button>
                <select
                    class="pos-select"
                    prop:value=move || state.order_type.get().as_str()
                    on:change=move |ev| {
                        if let Some(t) = OrderType::parse(&event_target_value(&ev)) {
                            state.set_order_type(t);
                        }
                    }
                >
                    {OrderType::ALL.iter().map(|t| view! {
                        <option value=t.as_str()>{t.label()}</option>
                    }).collect_view()}
                </select>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| dialogs.held.set(true)>
                    {move || format!("Held ({})", state.held.with(|h| h.len()))}
                </Button>
                <div class="pos-toolbar__status">
                    {move || state.notice.get().map(|n| view! { <span class="notice">{n}</span> })}
                    <Show when=move || state.busy.get()>
                        <Spinner size=SpinnerSize::Tiny />
                    </Show>
                </div>
            </div>

            <ErrorBox message=state.error />

            <div class="pos-body">
                <CategorySidebar state=state />
                <MenuGrid
                    state=state
                    on_customise=on_customise
                    on_misc=move |_| dialogs.misc.set(true)
                />
                <BillPanel state=state dialogs=dialogs report_target=report_target />
            </div>

            <CustomiseDialog state=state open=dialogs.customise meal=customising />
            <MiscItemDialog state=state open=dialogs.misc />
            <TableMapDialog state=state open=dialogs.table_map />
            <HeldTicketsDialog state=state open=dialogs.held />
            <SplitItemsDialog state=state open=dialogs.split_items />
            <SplitPeopleDialog state=state open=dialogs.split_people />
            <TransferDialog state=state open=dialogs.transfer />
            <ReceiptDialog state=state open=dialogs.receipt />
            <ReportDialog open=dialogs.report target=report_target on_done=on_report_done />
        </div>
    }
}
