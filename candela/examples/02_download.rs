mod common;
use candela::{Candela, Pacing, parse_from_date};
use common::{get_connector, init_tracing};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let candela = Candela::builder()
        .with_connector(get_connector())
        .pacing(Pacing::FixedDelay { delay_ms: 400 })
        .request_timeout(Duration::from_secs(60))
        .build()?;

    let report = candela
        .download()
        .symbols(&["BTC-USD", "ETH-USD", "NOT-A-PAIR"])?
        .timeframe("1d")
        .limit(300)
        .from(parse_from_date("2023-06-01")?)
        .run()
        .await?;

    for (symbol, rows) in &report.series {
        let last = rows.last().map(|c| c.close);
        println!("{symbol}: {} daily candles, last close {last:?}", rows.len());
    }
    for w in &report.warnings {
        println!("warning: {} -> {}", w.symbol, w.error);
    }
    Ok(())
}
