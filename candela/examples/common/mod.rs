use candela::CandelaConnector;
use std::sync::Arc;

#[must_use]
pub fn get_connector() -> Arc<dyn CandelaConnector> {
    if std::env::var("CANDELA_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(candela_mock::MockConnector::new())
    } else {
        match candela_coinbase::CoinbaseConnector::new_default() {
            Ok(c) => Arc::new(c),
            Err(e) => {
                eprintln!("coinbase connector unavailable ({e}); falling back to mock");
                Arc::new(candela_mock::MockConnector::new())
            }
        }
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
