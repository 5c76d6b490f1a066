use mintx_core::error::TransactionError;
use mintx_core::types::{Address, CoinSymbol};
use mintx_rlp::RlpItem;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::{address_field, amount_field, coin_field, coin_item, require, Operation, OperationType};
use crate::transaction::{Transaction, TransactionBuilder};

/// Transfer `value` pip of `coin` to `to`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendCoin {
    pub coin: CoinSymbol,
    pub to: Address,
    pub value: BigUint,
}

impl Operation for SendCoin {
    const TYPE: OperationType = OperationType::SendCoin;
    const FIELD_COUNT: usize = 3;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![
            coin_item(&self.coin),
            RlpItem::bytes(self.to.as_bytes().to_vec()),
            RlpItem::biguint(&self.value),
        ]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Ok(Self {
            coin: coin_field(fields, 0, "coin")?,
            to: address_field(fields, 1, "to")?,
            value: amount_field(fields, 2, "value")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct SendCoinBuilder {
    tx: TransactionBuilder,
    coin: Option<CoinSymbol>,
    to: Option<Address>,
    value: Option<BigUint>,
}

impl SendCoinBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            coin: None,
            to: None,
            value: None,
        }
    }

    pub fn coin(mut self, coin: CoinSymbol) -> Self {
        self.coin = Some(coin);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    /// Amount in pip; see `mintx_core::units::to_pip` for decimal input.
    pub fn value(mut self, value: BigUint) -> Self {
        self.value = Some(value);
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let ty = SendCoin::TYPE;
        let payload = SendCoin {
            coin: require(self.coin, ty, "coin")?,
            to: require(self.to, ty, "to")?,
            value: require(self.value, ty, "value")?,
        };
        Ok(self.tx.build(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::strategies;
    use mintx_core::units::coins;
    use proptest::prelude::*;

    fn sample() -> SendCoin {
        SendCoin {
            coin: CoinSymbol::new("MNT").unwrap(),
            to: "Mxfe60014a6e9ac91618f5d1cab3fd58cded61ee99".parse().unwrap(),
            value: coins(1),
        }
    }

    #[test]
    fn test_known_encoding() {
        assert_eq!(
            hex::encode(sample().encode()),
            "e98a4d4e540000000000000094fe60014a6e9ac91618f5d1cab3fd58cded61ee99880de0b6b3a7640000"
        );
    }

    #[test]
    fn test_coin_field_is_ten_bytes() {
        let fields = sample().to_fields();
        assert_eq!(fields[0].as_bytes().unwrap().len(), 10);
        let decoded = SendCoin::decode(&sample().encode()).unwrap();
        assert_eq!(decoded.coin.as_str(), "MNT");
    }

    #[test]
    fn test_zero_value_roundtrip() {
        let mut p = sample();
        p.value = BigUint::from(0u32);
        assert_eq!(SendCoin::decode(&p.encode()).unwrap(), p);
    }

    #[test]
    fn test_wrong_arity() {
        let mut fields = sample().to_fields();
        fields.push(RlpItem::uint(1));
        let bytes = RlpItem::list(fields).encode();
        assert!(matches!(
            SendCoin::decode(&bytes),
            Err(TransactionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_bad_address_length() {
        let mut fields = sample().to_fields();
        fields[1] = RlpItem::bytes(vec![1u8; 19]);
        let bytes = RlpItem::list(fields).encode();
        assert!(matches!(
            SendCoin::decode(&bytes),
            Err(TransactionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_builder_requires_fields_at_build() {
        let builder = TransactionBuilder::new(1).send_coin().coin(CoinSymbol::new("MNT").unwrap());
        match builder.build() {
            Err(TransactionError::IncompleteOperation { operation, field }) => {
                assert_eq!(operation, "SendCoin");
                assert_eq!(field, "to");
            }
            other => panic!("expected IncompleteOperation, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn prop_roundtrip(to in any::<[u8; 20]>(), value in any::<u128>(), len in 0usize..=10) {
            let p = SendCoin {
                coin: CoinSymbol::new(&"X".repeat(len)).unwrap(),
                to: Address::new(to),
                value: BigUint::from(value),
            };
            prop_assert_eq!(SendCoin::decode(&p.encode()).unwrap(), p);
        }
    }

    #[test]
    fn test_from_fields_short_list() {
        assert!(matches!(
            SendCoin::from_fields(&[]),
            Err(TransactionError::MalformedPayload(_))
        ));
        let fields = sample().to_fields();
        assert!(matches!(
            SendCoin::from_fields(&fields[..2]),
            Err(TransactionError::MalformedPayload(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip_wide_amounts(
            coin in strategies::coin(),
            to in strategies::address(),
            value in strategies::amount(),
        ) {
            let p = SendCoin { coin, to, value };
            prop_assert_eq!(SendCoin::decode(&p.encode()).unwrap(), p);
        }
    }
}
