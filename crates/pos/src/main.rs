use anyhow::Context;
use clap::Parser;

use stockroom_pos::{Config, ConsoleSink, Till};
use stockroom_products::InMemoryCatalog;

fn main() -> anyhow::Result<()> {
    stockroom_observability::init();

    let config = Config::parse();
    tracing::info!(
        currency = config.currency.code(),
        payment_method = %config.payment_method,
        receipt_prefix = %config.receipt_prefix,
        "starting till"
    );

    let catalog = InMemoryCatalog::demo();
    let ledger = config.ledger();
    let sink = ConsoleSink;

    let mut till = Till::new(&catalog, &ledger, &sink, config.currency);
    till.run(std::io::stdin().lock(), std::io::stdout().lock())
        .context("terminal I/O failed")?;

    tracing::info!("till closed");
    Ok(())
}
