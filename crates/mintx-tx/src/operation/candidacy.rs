use mintx_core::error::TransactionError;
use mintx_core::types::{Address, CoinSymbol, PublicKey};
use mintx_rlp::RlpItem;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{
    address_field, amount_field, coin_field, coin_item, public_key_field, require, u32_field,
    Operation, OperationType,
};
use crate::transaction::{Transaction, TransactionBuilder};

/// Register a validator candidate with an initial self-stake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclareCandidacy {
    /// Reward address of the candidate.
    pub address: Address,
    pub pub_key: PublicKey,
    /// Commission, percent.
    pub commission: u32,
    pub coin: CoinSymbol,
    pub stake: BigUint,
}

impl Operation for DeclareCandidacy {
    const TYPE: OperationType = OperationType::DeclareCandidacy;
    const FIELD_COUNT: usize = 5;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::bytes(self.address.as_bytes().to_vec()),
            RlpItem::bytes(self.pub_key.as_bytes().to_vec()),
            RlpItem::uint(self.commission as u64),
            coin_item(&self.coin),
            RlpItem::biguint(&self.stake),
        ]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Ok(Self {
            address: address_field(fields, 0, "address")?,
            pub_key: public_key_field(fields, 1, "pub_key")?,
            commission: u32_field(fields, 2, "commission")?,
            coin: coin_field(fields, 3, "coin")?,
            stake: amount_field(fields, 4, "stake")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateOnline {
    pub pub_key: PublicKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateOffline {
    pub pub_key: PublicKey,
}

impl Operation for SetCandidateOnline {
    const TYPE: OperationType = OperationType::SetCandidateOnline;
    const FIELD_COUNT: usize = 1;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![RlpItem::bytes(self.pub_key.as_bytes().to_vec())]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Ok(Self {
            pub_key: public_key_field(fields, 0, "pub_key")?,
        })
    }
}

impl Operation for SetCandidateOffline {
    const TYPE: OperationType = OperationType::SetCandidateOffline;
    const FIELD_COUNT: usize = 1;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![RlpItem::bytes(self.pub_key.as_bytes().to_vec())]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Ok(Self {
            pub_key: public_key_field(fields, 0, "pub_key")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DeclareCandidacyBuilder {
    tx: TransactionBuilder,
    address: Option<Address>,
    pub_key: Option<PublicKey>,
    commission: Option<u32>,
    coin: Option<CoinSymbol>,
    stake: Option<BigUint>,
}

impl DeclareCandidacyBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            address: None,
            pub_key: None,
            commission: None,
            coin: None,
            stake: None,
        }
    }

    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn pub_key(mut self, pub_key: PublicKey) -> Self {
        self.pub_key = Some(pub_key);
        self
    }

    pub fn commission(mut self, commission: u32) -> Self {
        self.commission = Some(commission);
        self
    }

    pub fn coin(mut self, coin: CoinSymbol) -> Self {
        self.coin = Some(coin);
        self
    }

    pub fn stake(mut self, stake: BigUint) -> Self {
        self.stake = Some(stake);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let ty = DeclareCandidacy::TYPE;
        let payload = DeclareCandidacy {
            address: require(self.address, ty, "address")?,
            pub_key: require(self.pub_key, ty, "pub_key")?,
            commission: require(self.commission, ty, "commission")?,
            coin: require(self.coin, ty, "coin")?,
            stake: require(self.stake, ty, "stake")?,
        };
        Ok(self.tx.build(payload))
    }
}

/// Builds either a `SetCandidateOnline` or a `SetCandidateOffline`.
#[derive(Debug, Clone)]
pub struct SetCandidateStatusBuilder {
    tx: TransactionBuilder,
    online: bool,
    pub_key: Option<PublicKey>,
}

impl SetCandidateStatusBuilder {
    pub(crate) fn new(tx: TransactionBuilder, online: bool) -> Self {
        Self {
            tx,
            online,
            pub_key: None,
        }
    }

    pub fn pub_key(mut self, pub_key: PublicKey) -> Self {
        self.pub_key = Some(pub_key);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        if self.online {
            let pub_key = require(self.pub_key, SetCandidateOnline::TYPE, "pub_key")?;
            Ok(self.tx.build(SetCandidateOnline { pub_key }))
        } else {
            let pub_key = require(self.pub_key, SetCandidateOffline::TYPE, "pub_key")?;
            Ok(self.tx.build(SetCandidateOffline { pub_key }))
        }
    }
}
