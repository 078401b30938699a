mod common;
use candela::Candela;
use common::{get_connector, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let candela = Candela::builder().with_connector(get_connector()).build()?;

    let symbols = candela.symbols().await?;
    println!("{} products listed; first few:", symbols.len());
    for s in symbols.iter().take(5) {
        println!(" - {s}");
    }

    let ticker = candela.ticker("BTC-USD").await?;
    println!(
        "\nBTC-USD last {:?}, mid {:?}",
        ticker.price_f64(),
        ticker.mid_f64()
    );
    Ok(())
}
