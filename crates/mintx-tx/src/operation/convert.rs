use mintx_core::error::TransactionError;
use mintx_core::types::CoinSymbol;
use mintx_rlp::RlpItem;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{amount_field, coin_field, coin_item, require, Operation, OperationType};
use crate::transaction::{Transaction, TransactionBuilder};

/// Convert `value` pip of `from_coin` into `to_coin` through the reserve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertCoin {
    pub from_coin: CoinSymbol,
    pub to_coin: CoinSymbol,
    pub value: BigUint,
}

impl Operation for ConvertCoin {
    const TYPE: OperationType = OperationType::ConvertCoin;
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![
            coin_item(&self.from_coin),
            coin_item(&self.to_coin),
            RlpItem::biguint(&self.value),
        ]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Ok(Self {
            from_coin: coin_field(fields, 0, "from_coin")?,
            to_coin: coin_field(fields, 1, "to_coin")?,
            value: amount_field(fields, 2, "value")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ConvertCoinBuilder {
    tx: TransactionBuilder,
    from_coin: Option<CoinSymbol>,
    to_coin: Option<CoinSymbol>,
    value: Option<BigUint>,
}

impl ConvertCoinBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            from_coin: None,
            to_coin: None,
            value: None,
        }
    }

    pub fn from_coin(mut self, coin: CoinSymbol) -> Self {
        self.from_coin = Some(coin);
        self
    }

    pub fn to_coin(mut self, coin: CoinSymbol) -> Self {
        self.to_coin = Some(coin);
        self
    }

    pub fn value(mut self, value: BigUint) -> Self {
        self.value = Some(value);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let ty = ConvertCoin::TYPE;
        let payload = ConvertCoin {
            from_coin: require(self.from_coin, ty, "from_coin")?,
            to_coin: require(self.to_coin, ty, "to_coin")?,
            value: require(self.value, ty, "value")?,
        };
        Ok(self.tx.build(payload))
    }
}
