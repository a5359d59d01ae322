//! Table cell for pound amounts.
//!
//! ```rust,ignore
//! <TableCellMoney value=Signal::derive(move || Some(total)) />
//! <TableCellMoney value=margin bold=true color_by_sign=true />
//! ```

use contracts::shared::money::format_gbp;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableCellMoney(
    #[prop(into)]
    value: Signal<Option<f64>>,

    /// Positive values green, negative red
    #[prop(optional, default = false)]
    color_by_sign: bool,

    #[prop(optional, default = false)]
    bold: bool,
) -> impl IntoView {
    let text = move || match value.get() {
        Some(v) => format_gbp(v),
        None => "-".to_string(),
    };

    let style = move || {
        let mut styles = Vec::new();
        if color_by_sign {
            match value.get() {
                Some(v) if v > 0.0 => styles.push("color: var(--color-success-700)"),
                Some(v) if v < 0.0 => styles.push("color: var(--color-error-700)"),
                _ => {}
            }
        }
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell class="text-right">
            <span style=style>{text}</span>
        </TableCell>
    }
}
