//! Printable receipts.

use stockroom_core::Currency;

use crate::sale::FinalizedSale;

const RULE: &str = "----------------------------------------";

/// Render a plain-text receipt.
///
/// ```text
/// Receipt RCP-001
/// Date: 2024-01-20
/// Customer: John Doe
/// ----------------------------------------
/// Paracetamol 500mg x2 @ ₹24.00 = ₹48.00
/// Vitamin C x1 @ ₹45.00 = ₹45.00
/// ----------------------------------------
/// Total: ₹93.00
/// Payment: Cash
/// ```
pub fn render_receipt(sale: &FinalizedSale, currency: &Currency) -> String {
    let mut lines = vec![
        format!("Receipt {}", sale.receipt_no),
        format!("Date: {}", sale.date),
        format!("Customer: {}", sale.customer_label()),
        RULE.to_string(),
    ];
    lines.extend(sale.lines.iter().map(|line| {
        format!(
            "{} x{} @ {} = {}",
            line.name,
            line.quantity,
            line.unit_price.format(currency),
            line.line_total().format(currency),
        )
    }));
    lines.push(RULE.to_string());
    lines.push(format!("Total: {}", sale.total.format(currency)));
    lines.push(format!("Payment: {}", sale.payment_method));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
