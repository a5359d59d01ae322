use crate::domain::a006_incident_report::api;
use crate::shared::components::ErrorBox;
use contracts::domain::a006_incident_report::aggregate::{
    IncidentReport, IncidentReportDto, REPORT_REASONS,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Order row the report is about
#[derive(Clone, Debug, PartialEq)]
pub struct ReportTarget {
    pub order_id: String,
    pub item_name: String,
    pub quantity: u32,
}

/// Broken / waste / refund / complaint report for one order row.
/// With "Send again" ticked the kitchen gets a free copy of the item.
#[component]
pub fn ReportDialog(
    open: RwSignal<bool>,
    target: RwSignal<Option<ReportTarget>>,
    #[prop(into)] on_done: Callback<IncidentReport>,
) -> impl IntoView {
    let reason = RwSignal::new(REPORT_REASONS[0].to_string());
    let other = RwSignal::new(String::new());
    let quantity = RwSignal::new("1".to_string());
    let redo = RwSignal::new(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (sending, set_sending) = signal(false);

    // Fresh form for every row
    Effect::new(move |_| {
        if let Some(t) = target.get() {
            reason.set(REPORT_REASONS[0].to_string());
            other.set(String::new());
            quantity.set(t.quantity.max(1).to_string());
            redo.set(false);
            set_error.set(None);
        }
    });

    let submit = move |_| {
        let Some(t) = target.get_untracked() else {
            return;
        };
        let reason_text = if reason.get_untracked() == "Other" {
            other.get_untracked().trim().to_string()
        } else {
            reason.get_untracked()
        };
        let Ok(qty) = quantity.get_untracked().trim().parse::<u32>() else {
            set_error.set(Some("Quantity must be a whole number".to_string()));
            return;
        };
        let dto = IncidentReportDto {
            order_id: t.order_id,
            item_name: t.item_name,
            reason: reason_text,
            reported_by: None,
            quantity: qty,
            redo: redo.get_untracked(),
        };
        if let Err(e) = dto.validate() {
            set_error.set(Some(e));
            return;
        }
        set_sending.set(true);
        spawn_local(async move {
            match api::create_report(&dto).await {
                Ok(report) => {
                    open.set(false);
                    on_done.run(report);
                }
                Err(e) => set_error.set(Some(e)),
            }
            set_sending.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>
                        {move || target.get().map(|t| format!("Report: {}", t.item_name)).unwrap_or_default()}
                    </DialogTitle>
                    <DialogContent>
                        <Flex vertical=true gap=FlexGap::Small>
                            <ErrorBox message=error />
                            <label>"Reason"</label>
                            <Select value=reason>
                                {REPORT_REASONS.iter().map(|r| view! {
                                    <option value=*r>{*r}</option>
                                }).collect_view()}
                                <option value="Other">"Other"</option>
                            </Select>
                            <Show when=move || reason.get() == "Other">
                                <Input value=other placeholder="Describe the problem" />
                            </Show>
                            <label>"Quantity"</label>
                            <Input value=quantity input_type=InputType::Number />
                            <Checkbox checked=redo label="Send again to the kitchen (no charge)" />
                        </Flex>
                    </DialogContent>
                    <DialogActions>
                        <Button appearance=ButtonAppearance::Secondary on_click=move |_| open.set(false)>
                            "Cancel"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=sending
                            on_click=submit
                        >
                            "Submit report"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
