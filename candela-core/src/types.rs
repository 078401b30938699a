//! Re-export of foundational types from `candela-types`.
// Consolidated re-exports so downstream crates can depend on `candela-core` only

pub use candela_types::{CandelaError, Capability};

pub use candela_types::{CandelaConfig, CoinbaseConfig, Pacing};

pub use candela_types::{Candle, OhlcBar, Product, RawCandle, Ticker};
