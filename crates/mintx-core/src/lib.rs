pub mod config;
pub mod error;
pub mod types;
pub mod units;

pub use config::NetworkConfig;
pub use types::{Address, Bytes, CoinSymbol, Hash, PublicKey};
