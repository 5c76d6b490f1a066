use mintx_core::config::NetworkConfig;
use mintx_core::error::{CryptoError, RlpError, TransactionError, ValueError};
use mintx_core::types::{decode_prefixed_hex, Address, Bytes, Hash, TRANSACTION_PREFIX};
use mintx_crypto::hash::digest;
use mintx_crypto::keys::{recover_address, PrivateKey, RecoverableSignature};
use mintx_rlp::{decode_exact, encode_list, RlpItem};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::operation::{
    ConvertCoinBuilder, CreateCoinBuilder, DeclareCandidacyBuilder, DelegateBuilder,
    OperationType, Payload, RedeemCheckBuilder, SendCoinBuilder, SetCandidateStatusBuilder,
    UnbondBuilder,
};

/// Number of envelope fields covered by the signing hash.
const UNSIGNED_FIELD_COUNT: usize = 6;
const SINGLE_FIELD_COUNT: usize = UNSIGNED_FIELD_COUNT + 3;
const MULTI_FIELD_COUNT: usize = UNSIGNED_FIELD_COUNT + 1;
/// `v` is the recovery id offset by this constant.
const V_OFFSET: u8 = 27;

/// Envelope settings shared by every operation builder.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    nonce: u64,
    gas_price: u64,
    extra_payload: Bytes,
    service_data: Bytes,
}

impl TransactionBuilder {
    /// Start a transaction with gas price 1 and empty payload blobs.
    pub fn new(nonce: u64) -> Self {
        Self {
            nonce,
            gas_price: 1,
            extra_payload: Bytes::default(),
            service_data: Bytes::default(),
        }
    }

    /// Start a transaction with the network's default gas price.
    pub fn with_config(config: &NetworkConfig, nonce: u64) -> Self {
        Self {
            gas_price: config.default_gas_price,
            ..Self::new(nonce)
        }
    }

    pub fn gas_price(mut self, gas_price: u64) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Opaque user data carried with the transaction, e.g. a memo.
    pub fn payload(mut self, extra: impl Into<Bytes>) -> Self {
        self.extra_payload = extra.into();
        self
    }

    pub fn service_data(mut self, data: impl Into<Bytes>) -> Self {
        self.service_data = data.into();
        self
    }

    pub fn send_coin(self) -> SendCoinBuilder {
        SendCoinBuilder::new(self)
    }

    pub fn convert_coin(self) -> ConvertCoinBuilder {
        ConvertCoinBuilder::new(self)
    }

    pub fn create_coin(self) -> CreateCoinBuilder {
        CreateCoinBuilder::new(self)
    }

    pub fn declare_candidacy(self) -> DeclareCandidacyBuilder {
        DeclareCandidacyBuilder::new(self)
    }

    pub fn delegate(self) -> DelegateBuilder {
        DelegateBuilder::new(self)
    }

    pub fn unbond(self) -> UnbondBuilder {
        UnbondBuilder::new(self)
    }

    pub fn redeem_check(self) -> RedeemCheckBuilder {
        RedeemCheckBuilder::new(self)
    }

    pub fn set_candidate_online(self) -> SetCandidateStatusBuilder {
        SetCandidateStatusBuilder::new(self, true)
    }

    pub fn set_candidate_offline(self) -> SetCandidateStatusBuilder {
        SetCandidateStatusBuilder::new(self, false)
    }

    /// Finish the envelope around an already constructed payload.
    pub fn build(self, payload: impl Into<Payload>) -> Transaction {
        Transaction {
            nonce: self.nonce,
            gas_price: self.gas_price,
            payload: payload.into(),
            extra_payload: self.extra_payload,
            service_data: self.service_data,
        }
    }
}

/// An unsigned transaction. The operation type is always the payload's own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    nonce: u64,
    gas_price: u64,
    payload: Payload,
    extra_payload: Bytes,
    service_data: Bytes,
}

impl Transaction {
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn gas_price(&self) -> u64 {
        self.gas_price
    }

    pub fn operation_type(&self) -> OperationType {
        self.payload.operation_type()
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn extra_payload(&self) -> &Bytes {
        &self.extra_payload
    }

    pub fn service_data(&self) -> &Bytes {
        &self.service_data
    }

    fn unsigned_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::uint(self.nonce),
            RlpItem::uint(self.gas_price),
            RlpItem::uint(self.operation_type().tag() as u64),
            RlpItem::bytes(self.payload.encode()),
            RlpItem::bytes(self.extra_payload.as_slice()),
            RlpItem::bytes(self.service_data.as_slice()),
        ]
    }

    /// `[nonce, gasPrice, type, payload, extraPayload, serviceData]`
    pub fn encode_for_signing(&self) -> Vec<u8> {
        encode_list(&self.unsigned_fields())
    }

    pub fn signing_hash(&self) -> Hash {
        digest(&self.encode_for_signing())
    }

    /// Full encoding with the zero signature, for sizing before signing.
    pub fn encode_placeholder(&self) -> Vec<u8> {
        let mut fields = self.unsigned_fields();
        fields.extend(Signature::EMPTY.to_items());
        encode_list(&fields)
    }

    /// Sign with a single key. The key is consumed and zeroed on drop.
    pub fn sign(self, key: PrivateKey) -> Result<SignedTransaction, TransactionError> {
        let hash = self.signing_hash();
        trace!(hash = %hash, "computed signing hash");
        let sig = key.sign_hash(hash.as_bytes())?;
        drop(key);
        debug!(
            operation = %self.operation_type(),
            nonce = self.nonce,
            "transaction signed"
        );
        Ok(self.attach_signature(SignatureData::Single(Signature::from_recoverable(&sig))))
    }

    /// Sign with every key of a multisig account, in the given order.
    pub fn sign_multisig(self, keys: Vec<PrivateKey>) -> Result<SignedTransaction, TransactionError> {
        if keys.is_empty() {
            return Err(TransactionError::IncompleteOperation {
                operation: self.operation_type().name(),
                field: "signatures",
            });
        }
        let hash = self.signing_hash();
        trace!(hash = %hash, signers = keys.len(), "computed signing hash");
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            let sig = key.sign_hash(hash.as_bytes())?;
            entries.push(MultisigEntry {
                address: key.address(),
                signature: Signature::from_recoverable(&sig),
            });
        }
        debug!(
            operation = %self.operation_type(),
            nonce = self.nonce,
            signers = entries.len(),
            "multisig transaction signed"
        );
        Ok(self.attach_signature(SignatureData::Multi(entries)))
    }

    /// Pair with signature material produced elsewhere.
    pub fn attach_signature(self, signature: SignatureData) -> SignedTransaction {
        SignedTransaction {
            transaction: self,
            signature,
        }
    }
}

/// Wire form of one ECDSA signature. `v` is 27 or 28 once signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub v: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl Signature {
    /// Sentinel carried by unsigned transactions.
    pub const EMPTY: Signature = Signature {
        v: 1,
        r: [0u8; 32],
        s: [0u8; 32],
    };

    pub fn from_recoverable(sig: &RecoverableSignature) -> Self {
        Self {
            v: V_OFFSET + sig.recovery_id,
            r: sig.r,
            s: sig.s,
        }
    }

    pub fn to_recoverable(&self) -> Result<RecoverableSignature, CryptoError> {
        match self.v.checked_sub(V_OFFSET) {
            Some(recovery_id @ (0 | 1)) => Ok(RecoverableSignature {
                recovery_id,
                r: self.r,
                s: self.s,
            }),
            _ => Err(CryptoError::InvalidSignature),
        }
    }

    /// `v`, `r`, `s` as minimal integers.
    pub fn to_items(self) -> [RlpItem; 3] {
        [
            RlpItem::uint(self.v as u64),
            RlpItem::uint_be(&self.r),
            RlpItem::uint_be(&self.s),
        ]
    }

    pub fn from_items(v: &RlpItem, r: &RlpItem, s: &RlpItem) -> Result<Self, RlpError> {
        Ok(Self {
            v: v.as_u8()?,
            r: r.as_be_array::<32>()?,
            s: s.as_be_array::<32>()?,
        })
    }
}

/// One signer of a multisig transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultisigEntry {
    pub address: Address,
    pub signature: Signature,
}

impl MultisigEntry {
    fn to_item(&self) -> RlpItem {
        let mut fields = vec![RlpItem::bytes(self.address.as_bytes().to_vec())];
        fields.extend(self.signature.to_items());
        RlpItem::list(fields)
    }

    fn from_item(item: &RlpItem) -> Result<Self, TransactionError> {
        let fields = item.as_list()?;
        if fields.len() != 4 {
            return Err(TransactionError::MalformedTransaction(format!(
                "multisig entry expects 4 fields, got {}",
                fields.len()
            )));
        }
        Ok(Self {
            address: Address::from_slice(fields[0].as_bytes()?)?,
            signature: Signature::from_items(&fields[1], &fields[2], &fields[3])?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignatureData {
    Single(Signature),
    Multi(Vec<MultisigEntry>),
}

/// A transaction together with its signature material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    transaction: Transaction,
    signature: SignatureData,
}

impl SignedTransaction {
    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signature(&self) -> &SignatureData {
        &self.signature
    }

    /// Drop the signature, e.g. to sign again.
    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut fields = self.transaction.unsigned_fields();
        match &self.signature {
            SignatureData::Single(sig) => fields.extend(sig.to_items()),
            SignatureData::Multi(entries) => fields.push(RlpItem::list(
                entries.iter().map(MultisigEntry::to_item).collect(),
            )),
        }
        encode_list(&fields)
    }

    /// Bare lowercase hex of the full encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.encode())
    }

    /// Hex with the transaction marker, as sent to the network.
    pub fn to_submission(&self) -> String {
        format!("{TRANSACTION_PREFIX}{}", self.to_hex())
    }

    /// Transaction id: Keccak-256 of the full encoding.
    pub fn hash(&self) -> Hash {
        digest(&self.encode())
    }

    /// Address of the signer of a single-signature transaction.
    pub fn recover_signer(&self) -> Result<Address, TransactionError> {
        match &self.signature {
            SignatureData::Single(sig) => {
                let hash = self.transaction.signing_hash();
                Ok(recover_address(hash.as_bytes(), &sig.to_recoverable()?)?)
            }
            SignatureData::Multi(_) => Err(TransactionError::MalformedTransaction(
                "multisig transaction has no single signer".to_string(),
            )),
        }
    }

    /// Addresses recovered from every signature, in encoding order.
    pub fn recover_signers(&self) -> Result<Vec<Address>, TransactionError> {
        let hash = self.transaction.signing_hash();
        let signatures: Vec<&Signature> = match &self.signature {
            SignatureData::Single(sig) => vec![sig],
            SignatureData::Multi(entries) => entries.iter().map(|e| &e.signature).collect(),
        };
        signatures
            .into_iter()
            .map(|sig| -> Result<Address, TransactionError> {
                Ok(recover_address(hash.as_bytes(), &sig.to_recoverable()?)?)
            })
            .collect()
    }

    /// Decode a signed transaction, accepting either a bare or `Mt`-prefixed
    /// hex string, and require it to carry `expected`.
    ///
    /// The type tag is checked before the payload bytes are interpreted.
    pub fn from_encoded(hex: &str, expected: OperationType) -> Result<Self, TransactionError> {
        let bytes = parse_hex(hex)?;
        decode_envelope(&bytes, Some(expected))
    }

    /// Decode a signed transaction of any operation type from hex.
    pub fn from_hex(hex: &str) -> Result<Self, TransactionError> {
        let bytes = parse_hex(hex)?;
        decode_envelope(&bytes, None)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, TransactionError> {
        decode_envelope(bytes, None)
    }
}

fn parse_hex(s: &str) -> Result<Vec<u8>, ValueError> {
    if s.starts_with(TRANSACTION_PREFIX) {
        decode_prefixed_hex(s, TRANSACTION_PREFIX)
    } else {
        Bytes::from_hex(s).map(Bytes::into_vec)
    }
}

fn decode_envelope(
    bytes: &[u8],
    expected: Option<OperationType>,
) -> Result<SignedTransaction, TransactionError> {
    let result = decode_fields(bytes, expected);
    if let Err(e) = &result {
        debug!(reason = %e, "rejected transaction encoding");
    }
    result
}

fn decode_fields(
    bytes: &[u8],
    expected: Option<OperationType>,
) -> Result<SignedTransaction, TransactionError> {
    let item = decode_exact(bytes)?;
    let fields = item.as_list()?;
    let multisig = match fields.len() {
        SINGLE_FIELD_COUNT => false,
        MULTI_FIELD_COUNT if fields[UNSIGNED_FIELD_COUNT].is_list() => true,
        n => {
            return Err(TransactionError::MalformedTransaction(format!(
                "expected {SINGLE_FIELD_COUNT} fields or {MULTI_FIELD_COUNT} with a signature list, got {n}"
            )))
        }
    };

    let ty = OperationType::from_tag(fields[2].as_u8()?)?;
    if let Some(expected) = expected {
        if expected != ty {
            return Err(TransactionError::TypeMismatch {
                expected: expected.name(),
                actual: ty.name(),
            });
        }
    }

    let transaction = Transaction {
        nonce: fields[0].as_u64()?,
        gas_price: fields[1].as_u64()?,
        payload: Payload::from_item(ty, &fields[3])?,
        extra_payload: Bytes::from(fields[4].as_bytes()?),
        service_data: Bytes::from(fields[5].as_bytes()?),
    };

    let signature = if multisig {
        let entries = fields[UNSIGNED_FIELD_COUNT]
            .as_list()?
            .iter()
            .map(MultisigEntry::from_item)
            .collect::<Result<Vec<_>, _>>()?;
        SignatureData::Multi(entries)
    } else {
        SignatureData::Single(Signature::from_items(&fields[6], &fields[7], &fields[8])?)
    };

    Ok(SignedTransaction {
        transaction,
        signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::{
        ConvertCoin, CreateCoin, DeclareCandidacy, Delegate, Operation, RedeemCheck, SendCoin,
        SetCandidateOffline, SetCandidateOnline, Unbond,
    };
    use mintx_core::types::CoinSymbol;
    use mintx_core::units::coins;
    use mintx_crypto::keys::RAW_SIGNATURE_LEN;
    use proptest::prelude::*;

    // Vectors for this key are recorded in DESIGN.md (Test vectors).
    const KEY: &str = "07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142";
    const SIGNED_SEND: &str = "f873010101aae98a4d4e540000000000000094fe60014a6e9ac91618f5d1cab3fd58cded61ee99880de0b6b3a764000080801ba00520bd581be3a81ca842b4693a3d68a171b986ebdacea1c918ed592f85e31836a035e460d4185ddbf3fee28732138656b26bfef5f3cba565e2bba6ccfd630a2865";

    fn key() -> PrivateKey {
        PrivateKey::from_hex(KEY).unwrap()
    }

    fn send_tx() -> Transaction {
        TransactionBuilder::new(1)
            .gas_price(1)
            .send_coin()
            .coin(CoinSymbol::new("MNT").unwrap())
            .to("Mxfe60014a6e9ac91618f5d1cab3fd58cded61ee99".parse().unwrap())
            .value(coins(1))
            .build()
            .unwrap()
    }

    #[test]
    fn test_signing_hash() {
        assert_eq!(
            hex::encode(send_tx().signing_hash().as_bytes()),
            "c0be127edafa4adcc3c720914e06ff63b5e90080cdd124a7c8f2f7c49df18353"
        );
    }

    #[test]
    fn test_sign_known_vector() {
        let signed = send_tx().sign(key()).unwrap();
        assert_eq!(signed.to_hex(), SIGNED_SEND);
        assert_eq!(signed.to_submission(), format!("Mt{SIGNED_SEND}"));
        assert_eq!(
            signed.hash().to_string(),
            "Mte599c87f6601f83988c63666441d4f4f852fb090bcbd65e034102f6c57b3e159"
        );
    }

    #[test]
    fn test_signing_is_deterministic() {
        let a = send_tx().sign(key()).unwrap();
        let b = send_tx().sign(key()).unwrap();
        assert_eq!(a.transaction().signing_hash(), b.transaction().signing_hash());
        assert_eq!(a.encode(), b.encode());
    }

    #[test]
    fn test_extra_payload_changes_hash() {
        let tx = TransactionBuilder::new(1)
            .payload("memo")
            .build(SendCoin::decode(&send_tx().payload().encode()).unwrap());
        assert_eq!(
            hex::encode(tx.signing_hash().as_bytes()),
            "0a5fe868d651625b60becba0b544f1015ff29b9bc3d762ac5ef4b46075052fbb"
        );
    }

    #[test]
    fn test_decode_known_vector() {
        let signed = SignedTransaction::from_encoded(SIGNED_SEND, OperationType::SendCoin).unwrap();
        let tx = signed.transaction();
        assert_eq!(tx.nonce(), 1);
        assert_eq!(tx.gas_price(), 1);
        match tx.payload() {
            Payload::SendCoin(p) => {
                assert_eq!(p.to.to_string(), "Mxfe60014a6e9ac91618f5d1cab3fd58cded61ee99");
                assert_eq!(p.value, coins(1));
                assert_eq!(p.coin.as_str(), "MNT");
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(signed.to_hex(), SIGNED_SEND);
    }

    #[test]
    fn test_decode_accepts_marker() {
        let a = SignedTransaction::from_hex(SIGNED_SEND).unwrap();
        let b = SignedTransaction::from_hex(&format!("Mt{SIGNED_SEND}")).unwrap();
        let c = SignedTransaction::from_hex(&format!("0x{SIGNED_SEND}")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_type_mismatch() {
        let result = SignedTransaction::from_encoded(SIGNED_SEND, OperationType::Delegate);
        assert!(matches!(
            result,
            Err(TransactionError::TypeMismatch {
                expected: "Delegate",
                actual: "SendCoin"
            })
        ));
    }

    #[test]
    fn test_recover_signer() {
        let signed = SignedTransaction::from_hex(SIGNED_SEND).unwrap();
        assert_eq!(
            signed.recover_signer().unwrap().to_string(),
            "Mx31e61a05adbd13c6b625262704bc305bf7725026"
        );
    }

    #[test]
    fn test_placeholder_encoding() {
        let tx = send_tx();
        let placeholder = tx.encode_placeholder();
        let item = decode_exact(&placeholder).unwrap();
        let fields = item.as_list().unwrap();
        assert_eq!(fields.len(), 9);
        assert_eq!(fields[6], RlpItem::bytes(vec![1u8]));
        assert_eq!(fields[7], RlpItem::bytes(Vec::new()));
        assert_eq!(fields[8], RlpItem::bytes(Vec::new()));
    }

    #[test]
    fn test_multisig_roundtrip() {
        let keys = vec![key(), PrivateKey::from_passphrase("second").unwrap()];
        let expected = vec![key().address(), PrivateKey::from_passphrase("second").unwrap().address()];
        let signed = send_tx().sign_multisig(keys).unwrap();

        let decoded = SignedTransaction::decode(&signed.encode()).unwrap();
        assert_eq!(decoded, signed);
        assert!(matches!(decoded.signature(), SignatureData::Multi(e) if e.len() == 2));
        assert_eq!(decoded.recover_signers().unwrap(), expected);
        assert!(decoded.recover_signer().is_err());
    }

    #[test]
    fn test_multisig_requires_keys() {
        assert!(matches!(
            send_tx().sign_multisig(Vec::new()),
            Err(TransactionError::IncompleteOperation { field: "signatures", .. })
        ));
    }

    #[test]
    fn test_resign_overwrites() {
        let first = send_tx().sign(key()).unwrap();
        let other = PrivateKey::from_passphrase("other").unwrap();
        let other_address = other.address();
        let second = first.clone().into_transaction().sign(other).unwrap();
        assert_ne!(first.signature(), second.signature());
        assert_eq!(second.recover_signer().unwrap(), other_address);
    }

    #[test]
    fn test_wrong_field_count() {
        let mut fields = send_tx().unsigned_fields();
        fields.push(RlpItem::uint(27));
        let bytes = encode_list(&fields);
        assert!(matches!(
            SignedTransaction::decode(&bytes),
            Err(TransactionError::MalformedTransaction(_))
        ));
        // seven fields but the last is a scalar
        let mut fields = send_tx().unsigned_fields();
        fields.push(RlpItem::uint(1));
        assert!(matches!(
            SignedTransaction::decode(&encode_list(&fields)),
            Err(TransactionError::MalformedTransaction(_))
        ));
    }

    #[test]
    fn test_unknown_type_tag() {
        let mut bytes = hex::decode(SIGNED_SEND).unwrap();
        // nonce 01, gasPrice 01, then the type byte
        bytes[4] = 0x0c;
        assert!(matches!(
            SignedTransaction::decode(&bytes),
            Err(TransactionError::UnknownOperationType(0x0c))
        ));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = hex::decode(SIGNED_SEND).unwrap();
        assert!(matches!(
            SignedTransaction::decode(&bytes[..bytes.len() - 1]),
            Err(TransactionError::Rlp(_))
        ));
    }

    #[test]
    fn test_invalid_v() {
        let sig = Signature { v: 29, ..Signature::EMPTY };
        assert_eq!(sig.to_recoverable(), Err(CryptoError::InvalidSignature));
        assert!(Signature::EMPTY.to_recoverable().is_err());
    }

    #[test]
    fn test_with_config_gas_price() {
        let mut config = NetworkConfig::testnet();
        config.default_gas_price = 5;
        let tx = TransactionBuilder::with_config(&config, 9).build(
            SendCoin::decode(&send_tx().payload().encode()).unwrap(),
        );
        assert_eq!(tx.gas_price(), 5);
        assert_eq!(tx.nonce(), 9);
    }

    #[test]
    fn test_serde_roundtrip() {
        let signed = send_tx().sign(key()).unwrap();
        let json = serde_json::to_string(&signed).unwrap();
        let back: SignedTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, signed);
    }

    fn any_payload() -> impl Strategy<Value = Payload> {
        use crate::operation::strategies::{address, amount, coin, public_key};
        prop_oneof![
            (coin(), address(), amount())
                .prop_map(|(coin, to, value)| Payload::from(SendCoin { coin, to, value })),
            (coin(), coin(), amount()).prop_map(|(from_coin, to_coin, value)| {
                Payload::from(ConvertCoin { from_coin, to_coin, value })
            }),
            (any::<String>(), coin(), amount(), amount(), any::<u8>()).prop_map(
                |(name, symbol, initial_amount, initial_reserve, reserve_ratio)| {
                    Payload::from(CreateCoin {
                        name,
                        symbol,
                        initial_amount,
                        initial_reserve,
                        reserve_ratio,
                    })
                }
            ),
            (address(), public_key(), any::<u32>(), coin(), amount()).prop_map(
                |(address, pub_key, commission, coin, stake)| {
                    Payload::from(DeclareCandidacy { address, pub_key, commission, coin, stake })
                }
            ),
            (public_key(), coin(), amount())
                .prop_map(|(pub_key, coin, stake)| Payload::from(Delegate { pub_key, coin, stake })),
            (public_key(), coin(), amount())
                .prop_map(|(pub_key, coin, stake)| Payload::from(Unbond { pub_key, coin, stake })),
            (
                proptest::collection::vec(any::<u8>(), 0..200),
                any::<[u8; 32]>(),
                any::<[u8; 32]>(),
                any::<u8>(),
            )
                .prop_map(|(raw, r, s, v)| {
                    let mut proof = [0u8; RAW_SIGNATURE_LEN];
                    proof[..32].copy_from_slice(&r);
                    proof[32..64].copy_from_slice(&s);
                    proof[64] = v;
                    Payload::from(RedeemCheck::with_proof(Bytes::new(raw), proof))
                }),
            public_key().prop_map(|pub_key| Payload::from(SetCandidateOnline { pub_key })),
            public_key().prop_map(|pub_key| Payload::from(SetCandidateOffline { pub_key })),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_sign_then_decode(
            nonce in any::<u64>(),
            gas_price in any::<u64>(),
            extra in proptest::collection::vec(any::<u8>(), 0..64),
            service in proptest::collection::vec(any::<u8>(), 0..64),
            payload in any_payload(),
        ) {
            let ty = payload.operation_type();
            let signed = TransactionBuilder::new(nonce)
                .gas_price(gas_price)
                .payload(extra)
                .service_data(service)
                .build(payload)
                .sign(key())
                .unwrap();
            let back = SignedTransaction::from_encoded(&signed.to_submission(), ty).unwrap();
            prop_assert_eq!(back.recover_signer().unwrap(), key().address());
            prop_assert_eq!(back, signed);
        }
    }
}
