use mintx_core::error::TransactionError;
use mintx_core::types::CoinSymbol;
use mintx_rlp::RlpItem;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{amount_field, coin_field, coin_item, require, string_field, u8_field, Operation, OperationType};
use crate::transaction::{Transaction, TransactionBuilder};

/// Issue a new coin backed by a reserve of the base coin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCoin {
    /// Free-form display name, UTF-8.
    pub name: String,
    pub symbol: CoinSymbol,
    pub initial_amount: BigUint,
    pub initial_reserve: BigUint,
    /// Constant reserve ratio, percent.
    pub reserve_ratio: u8,
}

impl Operation for CreateCoin {
    const TYPE: OperationType = OperationType::CreateCoin;
    const FIELD_COUNT: usize = 5;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::bytes(self.name.as_bytes().to_vec()),
            coin_item(&self.symbol),
            RlpItem::biguint(&self.initial_amount),
            RlpItem::biguint(&self.initial_reserve),
            RlpItem::uint(self.reserve_ratio as u64),
        ]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Ok(Self {
            name: string_field(fields, 0, "name")?,
            symbol: coin_field(fields, 1, "symbol")?,
            initial_amount: amount_field(fields, 2, "initial_amount")?,
            initial_reserve: amount_field(fields, 3, "initial_reserve")?,
            reserve_ratio: u8_field(fields, 4, "reserve_ratio")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct CreateCoinBuilder {
    tx: TransactionBuilder,
    name: Option<String>,
    symbol: Option<CoinSymbol>,
    initial_amount: Option<BigUint>,
    initial_reserve: Option<BigUint>,
    reserve_ratio: Option<u8>,
}

impl CreateCoinBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            name: None,
            symbol: None,
            initial_amount: None,
            initial_reserve: None,
            reserve_ratio: None,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn symbol(mut self, symbol: CoinSymbol) -> Self {
        self.symbol = Some(symbol);
        self
    }

    pub fn initial_amount(mut self, amount: BigUint) -> Self {
        self.initial_amount = Some(amount);
        self
    }

    pub fn initial_reserve(mut self, reserve: BigUint) -> Self {
        self.initial_reserve = Some(reserve);
        self
    }

    pub fn reserve_ratio(mut self, ratio: u8) -> Self {
        self.reserve_ratio = Some(ratio);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let ty = CreateCoin::TYPE;
        let payload = CreateCoin {
            name: require(self.name, ty, "name")?,
            symbol: require(self.symbol, ty, "symbol")?,
            initial_amount: require(self.initial_amount, ty, "initial_amount")?,
            initial_reserve: require(self.initial_reserve, ty, "initial_reserve")?,
            reserve_ratio: require(self.reserve_ratio, ty, "reserve_ratio")?,
        };
        Ok(self.tx.build(payload))
    }
}
