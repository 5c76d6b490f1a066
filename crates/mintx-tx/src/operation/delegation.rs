use mintx_core::error::TransactionError;
use mintx_core::types::{CoinSymbol, PublicKey};
use mintx_rlp::RlpItem;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{amount_field, coin_field, coin_item, public_key_field, require, Operation, OperationType};
use crate::transaction::{Transaction, TransactionBuilder};

/// Stake `stake` pip of `coin` on the candidate `pub_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegate {
    pub pub_key: PublicKey,
    pub coin: CoinSymbol,
    pub stake: BigUint,
}

/// Withdraw `stake` pip of `coin` from the candidate `pub_key`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unbond {
    pub pub_key: PublicKey,
    pub coin: CoinSymbol,
    pub stake: BigUint,
}

fn stake_fields(pub_key: &PublicKey, coin: &CoinSymbol, stake: &BigUint) -> Vec<RlpItem> {
    vec![
        RlpItem::bytes(pub_key.as_bytes().to_vec()),
        coin_item(coin),
        RlpItem::biguint(stake),
    ]
}

fn parse_stake_fields(
    fields: &[RlpItem],
) -> Result<(PublicKey, CoinSymbol, BigUint), TransactionError> {
    Ok((
        public_key_field(fields, 0, "pub_key")?,
        coin_field(fields, 1, "coin")?,
        amount_field(fields, 2, "stake")?,
    ))
}

impl Operation for Delegate {
    const TYPE: OperationType = OperationType::Delegate;
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<RlpItem> {
        stake_fields(&self.pub_key, &self.coin, &self.stake)
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        let (pub_key, coin, stake) = parse_stake_fields(fields)?;
        Ok(Self {
            pub_key,
            coin,
            stake,
        })
    }
}

impl Operation for Unbond {
    const TYPE: OperationType = OperationType::Unbond;
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<RlpItem> {
        stake_fields(&self.pub_key, &self.coin, &self.stake)
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        let (pub_key, coin, stake) = parse_stake_fields(fields)?;
        Ok(Self {
            pub_key,
            coin,
            stake,
        })
    }
}

#[derive(Debug, Clone)]
pub struct DelegateBuilder {
    tx: TransactionBuilder,
    pub_key: Option<PublicKey>,
    coin: Option<CoinSymbol>,
    stake: Option<BigUint>,
}

impl DelegateBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            pub_key: None,
            coin: None,
            stake: None,
        }
    }

    pub fn pub_key(mut self, pub_key: PublicKey) -> Self {
        self.pub_key = Some(pub_key);
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
        let ty = Delegate::TYPE;
        let payload = Delegate {
            pub_key: require(self.pub_key, ty, "pub_key")?,
            coin: require(self.coin, ty, "coin")?,
            stake: require(self.stake, ty, "stake")?,
        };
        Ok(self.tx.build(payload))
    }
}

#[derive(Debug, Clone)]
pub struct UnbondBuilder {
    tx: TransactionBuilder,
    pub_key: Option<PublicKey>,
    coin: Option<CoinSymbol>,
    stake: Option<BigUint>,
}

impl UnbondBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            pub_key: None,
            coin: None,
            stake: None,
        }
    }

    pub fn pub_key(mut self, pub_key: PublicKey) -> Self {
        self.pub_key = Some(pub_key);
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
        let ty = Unbond::TYPE;
        let payload = Unbond {
            pub_key: require(self.pub_key, ty, "pub_key")?,
            coin: require(self.coin, ty, "coin")?,
            stake: require(self.stake, ty, "stake")?,
        };
        Ok(self.tx.build(payload))
    }
}
