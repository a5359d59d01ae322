use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::cart::Cart;
use super::totals::Totals;
use crate::domain::a007_payment::aggregate::PaymentMethod;
use crate::shared::money::format_gbp;

pub const VENUE_NAME: &str = "MAKS OS BISTRO";
pub const VAT_RATE_PERCENT: f64 = 0.0;
pub const RECEIPT_WIDTH: usize = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub total: f64,
    pub note: Option<String>,
}

/// Customer receipt printed after payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub table_number: Option<String>,
    pub printed_at: DateTime<Utc>,
    pub lines: Vec<ReceiptLine>,
    pub totals: Totals,
    pub payment_method: PaymentMethod,
}

impl Receipt {
    pub fn new(
        table_number: Option<String>,
        bill: &Cart,
        totals: Totals,
        payment_method: PaymentMethod,
        printed_at: DateTime<Utc>,
    ) -> Self {
        let lines = bill
            .items
            .iter()
            .map(|i| {
                let note = [i.options.as_deref(), i.note.as_deref()]
                    .into_iter()
                    .flatten()
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");
                ReceiptLine {
                    name: i.name.clone(),
                    quantity: i.quantity,
                    total: i.line_total(),
                    note: (!note.is_empty()).then_some(note),
                }
            })
            .collect();
        Self {
            table_number,
            printed_at,
            lines,
            totals,
            payment_method,
        }
    }

    /// "Takeaway" when no table was served.
    pub fn table_label(&self) -> String {
        match self.table_number.as_deref().map(str::trim) {
            Some(table) if !table.is_empty() => format!("Table: {}", table),
            _ => "Takeaway".to_string(),
        }
    }

    /// Fixed-width text for a receipt printer or a `<pre>` block.
    pub fn render_text(&self, width: usize) -> String {
        let width = width.max(24);
        let mut out = Vec::new();
        out.push(center(VENUE_NAME, width));
        out.push(center(&self.table_label(), width));
        out.push(center(&self.printed_at.format("%d/%m/%Y %H:%M").to_string(), width));
        out.push("-".repeat(width));

        for line in &self.lines {
            let label = format!("{} x {}", line.quantity, line.name);
            out.extend(pair(&label, &format_gbp(line.total), width));
            if let Some(note) = &line.note {
                out.extend(wrap(note, width - 2).into_iter().map(|l| format!("  {}", l)));
            }
        }

        out.push("-".repeat(width));
        out.extend(pair("Subtotal", &format_gbp(self.totals.subtotal), width));
        if self.totals.discount > 0.0 {
            out.extend(pair("Discount", &format!("-{}", format_gbp(self.totals.discount)), width));
        }
        if self.totals.service > 0.0 {
            out.extend(pair("Service", &format_gbp(self.totals.service), width));
        }
        out.extend(pair(&format!("VAT ({}%)", VAT_RATE_PERCENT), &format_gbp(0.0), width));
        out.extend(pair("TOTAL", &format_gbp(self.totals.grand_total), width));
        if self.totals.shares_paid > 0.0 {
            out.extend(pair("Paid in shares", &format!("-{}", format_gbp(self.totals.shares_paid)), width));
            out.extend(pair("DUE", &format_gbp(self.totals.amount_due), width));
        }
        out.extend(pair("Paid by", self.payment_method.as_str(), width));
        out.push("-".repeat(width));
        out.push(center("Thank you for dining!", width));
        out.push(center("Powered by MAKS OS", width));
        out.join("\n")
    }
}

fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    format!("{}{}", " ".repeat((width - len) / 2), text)
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut line = String::new();
    for token in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(token);
            continue;
        }
        if line.chars().count() + 1 + token.chars().count() > width.max(8) {
            out.push(std::mem::take(&mut line));
            line.push_str(token);
        } else {
            line.push(' ');
            line.push_str(token);
        }
    }
    if !line.is_empty() {
        out.push(line);
    }
    out
}

/// Label left, value right; long labels wrap above the value.
fn pair(label: &str, value: &str, width: usize) -> Vec<String> {
    let label_len = label.chars().count();
    let value_len = value.chars().count();
    if label_len + value_len < width {
        let gap = width - label_len - value_len;
        return vec![format!("{}{}{}", label, " ".repeat(gap), value)];
    }
    let mut lines = wrap(label, width.saturating_sub(value_len + 1));
    lines.push(format!("{:>width$}", value, width = width));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_pos_terminal::totals::{compute_totals, BillAdjustments};

    fn receipt(table: Option<&str>) -> Receipt {
        let mut bill = Cart::new();
        bill.add_meal("m1", "Latte", 3.0, "drinks");
        bill.add_customised("m2", "Full English", 9.5, "meals", Some("Brown Bread"), None, 1);
        let totals = compute_totals(bill.subtotal(), &BillAdjustments::default());
        Receipt::new(table.map(str::to_string), &bill, totals, PaymentMethod::Card, Utc::now())
    }

    #[test]
    fn test_table_label() {
        assert_eq!(receipt(Some("Table 4")).table_label(), "Table: Table 4");
        assert_eq!(receipt(None).table_label(), "Takeaway");
        assert_eq!(receipt(Some(" ")).table_label(), "Takeaway");
    }

    #[test]
    fn test_render_text_layout() {
        let text = receipt(None).render_text(RECEIPT_WIDTH);
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains(VENUE_NAME));
        assert!(lines.iter().all(|l| l.chars().count() <= RECEIPT_WIDTH));
        assert!(text.contains("1 x Latte"));
        assert!(text.contains("  Brown Bread"));
        assert!(text.contains("VAT (0%)"));
        let total_line = lines.iter().find(|l| l.starts_with("TOTAL")).unwrap();
        assert!(total_line.ends_with("£12.50"));
        assert!(text.contains("Card"));
    }

    #[test]
    fn test_render_text_with_shares() {
        let mut r = receipt(Some("Table 2"));
        r.totals = r.totals.less_shares(5.0);
        let text = r.render_text(RECEIPT_WIDTH);
        assert!(text.contains("Paid in shares"));
        let due_line = text.lines().find(|l| l.starts_with("DUE")).unwrap();
        assert!(due_line.ends_with("£7.50"));
        assert!(!receipt(None).render_text(RECEIPT_WIDTH).contains("DUE"));
    }
}
