use num_bigint::BigUint;

use crate::types::CoinSymbol;

/// Chain id of the main network.
pub const MAINNET_CHAIN_ID: u8 = 1;
/// Chain id of the test network.
pub const TESTNET_CHAIN_ID: u8 = 2;

/// Network parameters passed explicitly to builders and fee estimation.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Chain id embedded in issued checks.
    pub chain_id: u8,
    /// Gas price used when a builder does not set one.
    pub default_gas_price: u64,
    /// Size of one fee unit in pip (10^15 = 0.001 coin).
    pub fee_unit: BigUint,
    /// Fee units charged per byte of extra payload and service data.
    pub payload_byte_fee: u64,
    /// Coin used for checks when the builder does not set one.
    pub base_coin: CoinSymbol,
}

impl NetworkConfig {
    pub fn mainnet() -> Self {
        Self::default()
    }

    pub fn testnet() -> Self {
        Self {
            chain_id: TESTNET_CHAIN_ID,
            ..Self::default()
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            chain_id: MAINNET_CHAIN_ID,
            default_gas_price: 1,
            fee_unit: BigUint::from(10u32).pow(15), // 0.001 coin
            payload_byte_fee: 2,
            base_coin: CoinSymbol::new("MNT").unwrap_or_default(),
        }
    }
}
