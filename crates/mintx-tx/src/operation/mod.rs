use std::fmt;

use mintx_core::error::TransactionError;
use mintx_core::types::{Address, Bytes, CoinSymbol, PublicKey};
use mintx_rlp::{decode_exact, encode_list, RlpItem};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

pub mod candidacy;
pub mod convert;
pub mod create_coin;
pub mod delegation;
pub mod redeem_check;
pub mod send;

pub use candidacy::{
    DeclareCandidacy, DeclareCandidacyBuilder, SetCandidateOffline, SetCandidateOnline,
    SetCandidateStatusBuilder,
};
pub use convert::{ConvertCoin, ConvertCoinBuilder};
pub use create_coin::{CreateCoin, CreateCoinBuilder};
pub use delegation::{Delegate, DelegateBuilder, Unbond, UnbondBuilder};
pub use redeem_check::{RedeemCheck, RedeemCheckBuilder};
pub use send::{SendCoin, SendCoinBuilder};

/// Transaction type tag. Each tag maps to exactly one [`Payload`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum OperationType {
    SendCoin = 0x01,
    ConvertCoin = 0x02,
    CreateCoin = 0x03,
    DeclareCandidacy = 0x04,
    Delegate = 0x05,
    Unbond = 0x06,
    RedeemCheck = 0x07,
    SetCandidateOnline = 0x08,
    SetCandidateOffline = 0x09,
}

impl OperationType {
    pub const ALL: [OperationType; 9] = [
        OperationType::SendCoin,
        OperationType::ConvertCoin,
        OperationType::CreateCoin,
        OperationType::DeclareCandidacy,
        OperationType::Delegate,
        OperationType::Unbond,
        OperationType::RedeemCheck,
        OperationType::SetCandidateOnline,
        OperationType::SetCandidateOffline,
    ];

    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn from_tag(tag: u8) -> Result<Self, TransactionError> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.tag() == tag)
            .ok_or(TransactionError::UnknownOperationType(tag))
    }

    pub fn name(self) -> &'static str {
        match self {
            OperationType::SendCoin => "SendCoin",
            OperationType::ConvertCoin => "ConvertCoin",
            OperationType::CreateCoin => "CreateCoin",
            OperationType::DeclareCandidacy => "DeclareCandidacy",
            OperationType::Delegate => "Delegate",
            OperationType::Unbond => "Unbond",
            OperationType::RedeemCheck => "RedeemCheck",
            OperationType::SetCandidateOnline => "SetCandidateOnline",
            OperationType::SetCandidateOffline => "SetCandidateOffline",
        }
    }

    /// Base fee in fee units (1 unit = 0.001 coin at gas price 1).
    pub fn base_fee_units(self) -> u64 {
        match self {
            OperationType::SendCoin => 10,
            OperationType::ConvertCoin => 100,
            OperationType::CreateCoin => 1_000,
            OperationType::DeclareCandidacy => 10_000,
            OperationType::Delegate => 100,
            OperationType::Unbond => 100,
            OperationType::RedeemCheck => 10,
            OperationType::SetCandidateOnline => 100,
            OperationType::SetCandidateOffline => 100,
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A payload variant with a fixed field layout.
pub trait Operation: Sized {
    const TYPE: OperationType;
    /// Exact number of fields in the encoded list.
    const FIELD_COUNT: usize;

    fn to_fields(&self) -> Vec<RlpItem>;

    /// Build from a field list. A short list is `MalformedPayload`; use
    /// [`Operation::from_item`] to also reject extra fields.
    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError>;

    fn encode(&self) -> Vec<u8> {
        encode_list(&self.to_fields())
    }

    fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        let item = decode_exact(bytes).map_err(|e| malformed(Self::TYPE, e))?;
        Self::from_item(&item)
    }

    fn from_item(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_list().map_err(|e| malformed(Self::TYPE, e))?;
        if fields.len() != Self::FIELD_COUNT {
            return Err(TransactionError::MalformedPayload(format!(
                "{} expects {} fields, got {}",
                Self::TYPE,
                Self::FIELD_COUNT,
                fields.len()
            )));
        }
        Self::from_fields(fields)
    }
}

/// The closed set of transaction payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Payload {
    SendCoin(SendCoin),
    ConvertCoin(ConvertCoin),
    CreateCoin(CreateCoin),
    DeclareCandidacy(DeclareCandidacy),
    Delegate(Delegate),
    Unbond(Unbond),
    RedeemCheck(RedeemCheck),
    SetCandidateOnline(SetCandidateOnline),
    SetCandidateOffline(SetCandidateOffline),
}

impl Payload {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Payload::SendCoin(_) => OperationType::SendCoin,
            Payload::ConvertCoin(_) => OperationType::ConvertCoin,
            Payload::CreateCoin(_) => OperationType::CreateCoin,
            Payload::DeclareCandidacy(_) => OperationType::DeclareCandidacy,
            Payload::Delegate(_) => OperationType::Delegate,
            Payload::Unbond(_) => OperationType::Unbond,
            Payload::RedeemCheck(_) => OperationType::RedeemCheck,
            Payload::SetCandidateOnline(_) => OperationType::SetCandidateOnline,
            Payload::SetCandidateOffline(_) => OperationType::SetCandidateOffline,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            Payload::SendCoin(p) => p.encode(),
            Payload::ConvertCoin(p) => p.encode(),
            Payload::CreateCoin(p) => p.encode(),
            Payload::DeclareCandidacy(p) => p.encode(),
            Payload::Delegate(p) => p.encode(),
            Payload::Unbond(p) => p.encode(),
            Payload::RedeemCheck(p) => p.encode(),
            Payload::SetCandidateOnline(p) => p.encode(),
            Payload::SetCandidateOffline(p) => p.encode(),
        }
    }

    /// Decode payload bytes as the variant selected by `ty`.
    pub fn decode(ty: OperationType, bytes: &[u8]) -> Result<Self, TransactionError> {
        let item = decode_exact(bytes).map_err(|e| malformed(ty, e))?;
        Self::decode_fields(ty, &item)
    }

    /// Decode the payload slot of an envelope.
    ///
    /// The slot normally holds the payload's encoding as a byte string, but an
    /// inline list of fields is accepted too.
    pub fn from_item(ty: OperationType, item: &RlpItem) -> Result<Self, TransactionError> {
        match item {
            RlpItem::Bytes(bytes) => Self::decode(ty, bytes),
            RlpItem::List(_) => Self::decode_fields(ty, item),
        }
    }

    fn decode_fields(ty: OperationType, item: &RlpItem) -> Result<Self, TransactionError> {
        Ok(match ty {
            OperationType::SendCoin => Payload::SendCoin(SendCoin::from_item(item)?),
            OperationType::ConvertCoin => Payload::ConvertCoin(ConvertCoin::from_item(item)?),
            OperationType::CreateCoin => Payload::CreateCoin(CreateCoin::from_item(item)?),
            OperationType::DeclareCandidacy => {
                Payload::DeclareCandidacy(DeclareCandidacy::from_item(item)?)
            }
            OperationType::Delegate => Payload::Delegate(Delegate::from_item(item)?),
            OperationType::Unbond => Payload::Unbond(Unbond::from_item(item)?),
            OperationType::RedeemCheck => Payload::RedeemCheck(RedeemCheck::from_item(item)?),
            OperationType::SetCandidateOnline => {
                Payload::SetCandidateOnline(SetCandidateOnline::from_item(item)?)
            }
            OperationType::SetCandidateOffline => {
                Payload::SetCandidateOffline(SetCandidateOffline::from_item(item)?)
            }
        })
    }
}

impl From<SendCoin> for Payload {
    fn from(p: SendCoin) -> Self {
        Payload::SendCoin(p)
    }
}

impl From<ConvertCoin> for Payload {
    fn from(p: ConvertCoin) -> Self {
        Payload::ConvertCoin(p)
    }
}

impl From<CreateCoin> for Payload {
    fn from(p: CreateCoin) -> Self {
        Payload::CreateCoin(p)
    }
}

impl From<DeclareCandidacy> for Payload {
    fn from(p: DeclareCandidacy) -> Self {
        Payload::DeclareCandidacy(p)
    }
}

impl From<Delegate> for Payload {
    fn from(p: Delegate) -> Self {
        Payload::Delegate(p)
    }
}

impl From<Unbond> for Payload {
    fn from(p: Unbond) -> Self {
        Payload::Unbond(p)
    }
}

impl From<RedeemCheck> for Payload {
    fn from(p: RedeemCheck) -> Self {
        Payload::RedeemCheck(p)
    }
}

impl From<SetCandidateOnline> for Payload {
    fn from(p: SetCandidateOnline) -> Self {
        Payload::SetCandidateOnline(p)
    }
}

impl From<SetCandidateOffline> for Payload {
    fn from(p: SetCandidateOffline) -> Self {
        Payload::SetCandidateOffline(p)
    }
}

fn malformed(ty: OperationType, e: impl fmt::Display) -> TransactionError {
    TransactionError::MalformedPayload(format!("{ty}: {e}"))
}

fn field_error(field: &str, e: impl fmt::Display) -> TransactionError {
    TransactionError::MalformedPayload(format!("field `{field}`: {e}"))
}

/// Unwrap a builder field or report it as missing.
pub(crate) fn require<T>(
    value: Option<T>,
    operation: OperationType,
    field: &'static str,
) -> Result<T, TransactionError> {
    value.ok_or(TransactionError::IncompleteOperation {
        operation: operation.name(),
        field,
    })
}

/// Field `index` of a payload list, or `MalformedPayload` if the list is short.
fn item_at<'a>(
    fields: &'a [RlpItem],
    index: usize,
    field: &str,
) -> Result<&'a RlpItem, TransactionError> {
    fields
        .get(index)
        .ok_or_else(|| TransactionError::MalformedPayload(format!("missing field `{field}`")))
}

pub(crate) fn coin_field(
    fields: &[RlpItem],
    index: usize,
    field: &str,
) -> Result<CoinSymbol, TransactionError> {
    let raw = item_at(fields, index, field)?
        .as_bytes()
        .map_err(|e| field_error(field, e))?;
    CoinSymbol::from_padded(raw).map_err(|e| field_error(field, e))
}

pub(crate) fn address_field(
    fields: &[RlpItem],
    index: usize,
    field: &str,
) -> Result<Address, TransactionError> {
    let raw = item_at(fields, index, field)?
        .as_bytes()
        .map_err(|e| field_error(field, e))?;
    Address::from_slice(raw).map_err(|e| field_error(field, e))
}

pub(crate) fn public_key_field(
    fields: &[RlpItem],
    index: usize,
    field: &str,
) -> Result<PublicKey, TransactionError> {
    let raw = item_at(fields, index, field)?
        .as_bytes()
        .map_err(|e| field_error(field, e))?;
    PublicKey::from_slice(raw).map_err(|e| field_error(field, e))
}

pub(crate) fn amount_field(
    fields: &[RlpItem],
    index: usize,
    field: &str,
) -> Result<BigUint, TransactionError> {
    item_at(fields, index, field)?
        .as_biguint()
        .map_err(|e| field_error(field, e))
}

pub(crate) fn u32_field(fields: &[RlpItem], index: usize, field: &str) -> Result<u32, TransactionError> {
    item_at(fields, index, field)?
        .as_u32()
        .map_err(|e| field_error(field, e))
}

pub(crate) fn u8_field(fields: &[RlpItem], index: usize, field: &str) -> Result<u8, TransactionError> {
    item_at(fields, index, field)?
        .as_u8()
        .map_err(|e| field_error(field, e))
}

pub(crate) fn bytes_field(
    fields: &[RlpItem],
    index: usize,
    field: &str,
) -> Result<Bytes, TransactionError> {
    item_at(fields, index, field)?
        .as_bytes()
        .map(Bytes::from)
        .map_err(|e| field_error(field, e))
}

pub(crate) fn string_field(
    fields: &[RlpItem],
    index: usize,
    field: &str,
) -> Result<String, TransactionError> {
    let raw = item_at(fields, index, field)?
        .as_bytes()
        .map_err(|e| field_error(field, e))?;
    String::from_utf8(raw.to_vec()).map_err(|e| field_error(field, e))
}

pub(crate) fn coin_item(coin: &CoinSymbol) -> RlpItem {
    RlpItem::bytes(coin.to_padded().to_vec())
}

#[cfg(test)]
pub(crate) mod strategies {
    use mintx_core::types::{Address, CoinSymbol, PublicKey};
    use num_bigint::BigUint;
    use proptest::prelude::*;

    /// Symbols of 0 to 10 characters.
    pub(crate) fn coin() -> impl Strategy<Value = CoinSymbol> {
        "[A-Z0-9]{0,10}".prop_map(|s| CoinSymbol::new(&s).unwrap())
    }

    /// Amounts up to 256 bits, zero included.
    pub(crate) fn amount() -> impl Strategy<Value = BigUint> {
        proptest::collection::vec(any::<u8>(), 0..32).prop_map(|b| BigUint::from_bytes_be(&b))
    }

    pub(crate) fn address() -> impl Strategy<Value = Address> {
        any::<[u8; 20]>().prop_map(Address::new)
    }

    /// Raw 32-byte validator keys and 33-byte compressed keys.
    pub(crate) fn public_key() -> impl Strategy<Value = PublicKey> {
        proptest::collection::vec(any::<u8>(), 32..=33).prop_map(|b| PublicKey::from_slice(&b).unwrap())
    }
}
