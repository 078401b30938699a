//! Candela-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod candle;
mod capability;
mod config;
mod error;
mod product;

pub use candle::{Candle, OhlcBar, RawCandle};
pub use capability::Capability;
pub use config::{CandelaConfig, CoinbaseConfig, Pacing};
pub use error::CandelaError;
pub use product::{Product, Ticker};
