use mintx_core::config::NetworkConfig;
use num_bigint::BigUint;

use crate::transaction::Transaction;

impl Transaction {
    /// Fee units before the gas price multiplier is applied.
    pub fn fee_units(&self, config: &NetworkConfig) -> u64 {
        let blob_len = (self.extra_payload().len() + self.service_data().len()) as u64;
        self.operation_type()
            .base_fee_units()
            .saturating_add(config.payload_byte_fee.saturating_mul(blob_len))
    }

    /// Expected commission in pip.
    pub fn estimate_fee(&self, config: &NetworkConfig) -> BigUint {
        BigUint::from(self.fee_units(config)) * BigUint::from(self.gas_price()) * &config.fee_unit
    }
}
