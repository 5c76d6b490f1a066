use mintx_core::error::TransactionError;
use mintx_core::types::Bytes;
use mintx_crypto::keys::RAW_SIGNATURE_LEN;
use mintx_rlp::RlpItem;
use serde::{Deserialize, Serialize};

use super::{bytes_field, require, Operation, OperationType};
use crate::transaction::{Transaction, TransactionBuilder};

/// Redeem a signed check. `proof` binds the redeemer's address to the check passphrase.
///
/// Every constructor, including deserialization, rejects a proof that is not
/// 65 bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RedeemCheckFields")]
pub struct RedeemCheck {
    raw_check: Bytes,
    proof: Bytes,
}

#[derive(Deserialize)]
struct RedeemCheckFields {
    raw_check: Bytes,
    proof: Bytes,
}

impl TryFrom<RedeemCheckFields> for RedeemCheck {
    type Error = TransactionError;

    fn try_from(fields: RedeemCheckFields) -> Result<Self, Self::Error> {
        Self::new(fields.raw_check, fields.proof)
    }
}

impl RedeemCheck {
    pub fn new(raw_check: Bytes, proof: Bytes) -> Result<Self, TransactionError> {
        check_proof_len(&proof)?;
        Ok(Self { raw_check, proof })
    }

    pub fn with_proof(raw_check: Bytes, proof: [u8; RAW_SIGNATURE_LEN]) -> Self {
        Self {
            raw_check,
            proof: Bytes::new(proof.to_vec()),
        }
    }

    /// The full signed check encoding.
    pub fn raw_check(&self) -> &Bytes {
        &self.raw_check
    }

    /// `r || s || recovery_id`.
    pub fn proof(&self) -> &Bytes {
        &self.proof
    }
}

fn check_proof_len(proof: &Bytes) -> Result<(), TransactionError> {
    if proof.len() != RAW_SIGNATURE_LEN {
        return Err(TransactionError::MalformedPayload(format!(
            "field `proof`: expected {RAW_SIGNATURE_LEN} bytes, got {}",
            proof.len()
        )));
    }
    Ok(())
}

impl Operation for RedeemCheck {
    const TYPE: OperationType = OperationType::RedeemCheck;
    const FIELD_COUNT: usize = 2;

    fn to_fields(&self) -> Vec<RlpItem> {
        vec![
            RlpItem::bytes(self.raw_check.as_slice()),
            RlpItem::bytes(self.proof.as_slice()),
        ]
    }

    fn from_fields(fields: &[RlpItem]) -> Result<Self, TransactionError> {
        Self::new(
            bytes_field(fields, 0, "raw_check")?,
            bytes_field(fields, 1, "proof")?,
        )
    }
}

#[derive(Debug, Clone)]
pub struct RedeemCheckBuilder {
    tx: TransactionBuilder,
    raw_check: Option<Bytes>,
    proof: Option<Bytes>,
}

impl RedeemCheckBuilder {
    pub(crate) fn new(tx: TransactionBuilder) -> Self {
        Self {
            tx,
            raw_check: None,
            proof: None,
        }
    }

    pub fn raw_check(mut self, raw_check: impl Into<Bytes>) -> Self {
        self.raw_check = Some(raw_check.into());
        self
    }

    pub fn proof(mut self, proof: impl Into<Bytes>) -> Self {
        self.proof = Some(proof.into());
        self
    }

    pub fn build(self) -> Result<Transaction, TransactionError> {
        let ty = RedeemCheck::TYPE;
        let payload = RedeemCheck::new(
            require(self.raw_check, ty, "raw_check")?,
            require(self.proof, ty, "proof")?,
        )?;
        Ok(self.tx.build(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SignedTransaction;
    use mintx_crypto::keys::PrivateKey;
    use proptest::prelude::*;

    const KEY: &str = "07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142";

    #[test]
    fn test_roundtrip() {
        let p = RedeemCheck::new(Bytes::new(vec![0xf8; 162]), Bytes::new(vec![7u8; 65])).unwrap();
        assert_eq!(RedeemCheck::decode(&p.encode()).unwrap(), p);
    }

    #[test]
    fn test_long_fields_use_long_headers() {
        let p = RedeemCheck::new(Bytes::new(vec![0xf8; 162]), Bytes::new(vec![7u8; 65])).unwrap();
        let encoded = p.encode();
        // list of 164 + 67 bytes, check header b8a2, proof header b841
        assert_eq!(&encoded[..5], &[0xf8, 0xe7, 0xb8, 0xa2, 0xf8]);
        assert_eq!(&encoded[166..168], &[0xb8, 0x41]);
        assert_eq!(encoded.len(), 2 + 164 + 67);
    }

    #[test]
    fn test_short_proof_rejected_on_decode() {
        let fields = vec![RlpItem::bytes(vec![1u8; 10]), RlpItem::bytes(vec![2u8; 64])];
        let bytes = RlpItem::list(fields).encode();
        assert!(matches!(
            RedeemCheck::decode(&bytes),
            Err(TransactionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_builder_validates_proof() {
        let result = TransactionBuilder::new(2)
            .redeem_check()
            .raw_check(vec![1u8; 10])
            .proof(vec![0u8; 66])
            .build();
        assert!(matches!(result, Err(TransactionError::MalformedPayload(_))));

        let missing = TransactionBuilder::new(2).redeem_check().raw_check(vec![1u8; 10]).build();
        assert!(matches!(
            missing,
            Err(TransactionError::IncompleteOperation { field: "proof", .. })
        ));
    }

    #[test]
    fn test_from_fields_short_list() {
        assert!(matches!(
            RedeemCheck::from_fields(&[RlpItem::bytes(vec![1u8; 10])]),
            Err(TransactionError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_serde_rejects_short_proof() {
        let json = format!(
            r#"{{"raw_check":"{}","proof":"{}"}}"#,
            "f8".repeat(10),
            "02".repeat(10)
        );
        assert!(serde_json::from_str::<RedeemCheck>(&json).is_err());

        let ok = RedeemCheck::with_proof(Bytes::new(vec![0xf8; 10]), [7u8; RAW_SIGNATURE_LEN]);
        let back: RedeemCheck = serde_json::from_str(&serde_json::to_string(&ok).unwrap()).unwrap();
        assert_eq!(back, ok);
    }

    #[test]
    fn test_signed_redeem_decodes() {
        let signed = TransactionBuilder::new(3)
            .redeem_check()
            .raw_check(vec![0xf8u8; 162])
            .proof(vec![9u8; RAW_SIGNATURE_LEN])
            .build()
            .unwrap()
            .sign(PrivateKey::from_hex(KEY).unwrap())
            .unwrap();
        let back = SignedTransaction::from_encoded(&signed.to_hex(), OperationType::RedeemCheck).unwrap();
        assert_eq!(back, signed);
    }

    proptest! {
        #[test]
        fn prop_roundtrip(
            raw_check in proptest::collection::vec(any::<u8>(), 0..300),
            proof in proptest::collection::vec(any::<u8>(), RAW_SIGNATURE_LEN..=RAW_SIGNATURE_LEN),
        ) {
            let p = RedeemCheck::new(Bytes::new(raw_check), Bytes::new(proof)).unwrap();
            prop_assert_eq!(RedeemCheck::decode(&p.encode()).unwrap(), p);
        }

        #[test]
        fn prop_wrong_proof_len_rejected(len in 0usize..130) {
            prop_assume!(len != RAW_SIGNATURE_LEN);
            prop_assert!(RedeemCheck::new(Bytes::new(vec![1u8]), Bytes::new(vec![0u8; len])).is_err());
        }
    }
}
