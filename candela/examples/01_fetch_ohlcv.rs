mod common;
use candela::{Candela, parse_from_date};
use common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let candela = Candela::builder().with_connector(get_connector()).build()?;

    let from = parse_from_date("2024-01-01 00:00:00")?;
    println!("Fetching 4h candles for BTC-USD since {from}...");
    let rows = candela.fetch_ohlcv("BTC-USD", "4h", 120, from).await?;

    println!("\n## {} candles", rows.len());
    for c in rows.iter().rev().take(10) {
        println!(
            " - {}  O {:>10.2}  H {:>10.2}  L {:>10.2}  C {:>10.2}  V {:>12.4}",
            c.ts, c.open, c.high, c.low, c.close, c.volume
        );
    }
    if rows.len() > 10 {
        println!("... and {} older", rows.len() - 10);
    }

    let bars = candela.fetch_ohlc("ETH-USD", "1d", 5, from).await?;
    println!("\n## Last daily bar for ETH-USD: {:?}", bars.last());
    Ok(())
}
