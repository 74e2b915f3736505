//! The interactive till loop.

use std::io::{self, BufRead, Write};

use chrono::Utc;
use tracing::warn;

use stockroom_core::Currency;
use stockroom_events::NotificationSink;
use stockroom_products::Catalog;
use stockroom_sales::{SaleSession, SalesLedger, SalesSummary, render_receipt};

use crate::input::{HELP, Input};

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Till state: at most one open sale at a time.
pub struct Till<'a, C, L, N> {
    catalog: &'a C,
    ledger: &'a L,
    sink: &'a N,
    currency: Currency,
    session: Option<SaleSession<'a, C, L, N>>,
}

impl<'a, C, L, N> Till<'a, C, L, N>
where
    C: Catalog,
    L: SalesLedger,
    N: NotificationSink,
{
    pub fn new(catalog: &'a C, ledger: &'a L, sink: &'a N, currency: Currency) -> Self {
        Self {
            catalog,
            ledger,
            sink,
            currency,
            session: None,
        }
    }

    pub fn has_open_sale(&self) -> bool {
        self.session.is_some()
    }

    /// Read commands until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut out: impl Write) -> io::Result<()> {
        writeln!(out, "stockroom till, type `help` for commands")?;
        for line in input.lines() {
            let line = line?;
            let flow = match Input::parse(&line) {
                Ok(cmd) => self.execute(cmd, &mut out)?,
                Err(err) => {
                    writeln!(out, "error: {err}")?;
                    Flow::Continue
                }
            };
            out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }

        if let Some(session) = self.session.take() {
            warn!(session_id = %session.id(), "input closed with an open sale; discarding it");
            session.cancel();
        }
        Ok(())
    }

    pub fn execute(&mut self, input: Input, out: &mut impl Write) -> io::Result<Flow> {
        match input {
            Input::Blank => {}
            Input::Help => writeln!(out, "{HELP}")?,
            Input::Quit => return Ok(Flow::Quit),
            Input::Catalog(term) => self.print_catalog(term.as_deref().unwrap_or(""), out)?,
            Input::New => {
                if self.session.is_some() {
                    writeln!(out, "a sale is already open")?;
                } else {
                    let session = SaleSession::open(self.catalog, self.ledger, self.sink)
                        .with_currency(self.currency);
                    self.session = Some(session);
                    writeln!(out, "new sale opened")?;
                }
            }
            Input::Sales => self.print_sales(out)?,
            Input::Summary => {
                let today = Utc::now().date_naive();
                self.print_summary("all time", self.ledger.summary(), out)?;
                self.print_summary("today", self.ledger.summary_on(today), out)?;
            }
            Input::Receipt(no) => match self.ledger.find(&no) {
                Some(sale) => write!(out, "{}", render_receipt(&sale, &self.currency))?,
                None => writeln!(out, "no receipt {no}")?,
            },
            Input::Export => match serde_json::to_string_pretty(&self.ledger.sales()) {
                Ok(json) => writeln!(out, "{json}")?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Input::Cancel => match self.session.take() {
                Some(session) => {
                    session.cancel();
                    writeln!(out, "sale cancelled")?;
                }
                None => writeln!(out, "{NO_OPEN_SALE}")?,
            },
            other => self.execute_in_sale(other, out)?,
        }
        Ok(Flow::Continue)
    }

    fn execute_in_sale(&mut self, input: Input, out: &mut impl Write) -> io::Result<()> {
        let Some(session) = self.session.as_mut() else {
            return writeln!(out, "{NO_OPEN_SALE}");
        };

        match input {
            Input::Add(id) => match session.add_product(id) {
                Ok(()) => writeln!(out, "total {}", session.formatted_total())?,
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Input::Quantity(id, qty) => match session.update_quantity(id, qty) {
                Ok(changed) => {
                    if !changed {
                        writeln!(out, "product {id} is not in this sale")?;
                    }
                    writeln!(out, "total {}", session.formatted_total())?;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            Input::Remove(id) => {
                if !session.remove_product(id) {
                    writeln!(out, "product {id} is not in this sale")?;
                }
                writeln!(out, "total {}", session.formatted_total())?;
            }
            Input::Customer(name) => session.set_customer(name),
            Input::Total => writeln!(out, "total {}", session.formatted_total())?,
            Input::Show => {
                let draft = session.draft();
                if draft.is_empty() {
                    writeln!(out, "no items added yet")?;
                }
                for line in draft.lines() {
                    writeln!(
                        out,
                        "{:>3}  {} x{} @ {} = {}",
                        line.product_id,
                        line.name,
                        line.quantity,
                        line.unit_price.format(&self.currency),
                        line.line_total().format(&self.currency),
                    )?;
                }
                if !draft.customer_name().is_empty() {
                    writeln!(out, "customer: {}", draft.customer_name())?;
                }
                writeln!(out, "total {}", session.formatted_total())?;
            }
            Input::Complete => match session.complete() {
                Ok(sale) => {
                    writeln!(out, "recorded {}", sale.receipt_no)?;
                    self.session = None;
                }
                Err(err) => writeln!(out, "error: {err}")?,
            },
            _ => {}
        }
        Ok(())
    }

    fn print_catalog(&self, term: &str, out: &mut impl Write) -> io::Result<()> {
        let hits = self.catalog.search(term);
        if hits.is_empty() {
            return writeln!(out, "no matching products");
        }
        for p in hits {
            writeln!(
                out,
                "{:>3}  {:<24} {:>10}  stock {:>4}  {}",
                p.id,
                p.name,
                p.unit_price.format(&self.currency),
                p.stock,
                p.stock_status(),
            )?;
        }
        Ok(())
    }

    fn print_sales(&self, out: &mut impl Write) -> io::Result<()> {
        let sales = self.ledger.sales();
        if sales.is_empty() {
            return writeln!(out, "no sales recorded");
        }
        for sale in sales {
            writeln!(
                out,
                "{}  {}  {:<20} {:>10}  {}",
                sale.receipt_no,
                sale.date,
                sale.customer_label(),
                sale.total.format(&self.currency),
                sale.payment_method,
            )?;
        }
        Ok(())
    }

    fn print_summary(
        &self,
        label: &str,
        summary: SalesSummary,
        out: &mut impl Write,
    ) -> io::Result<()> {
        writeln!(
            out,
            "{label}: {} orders, revenue {}, average {}",
            summary.order_count,
            summary.revenue.format(&self.currency),
            summary.average_order_value.format(&self.currency),
        )
    }
}

const NO_OPEN_SALE: &str = "no open sale; type `new` first";
