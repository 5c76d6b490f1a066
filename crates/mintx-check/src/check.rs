use mintx_core::config::NetworkConfig;
use mintx_core::error::CheckError;
use mintx_core::types::{decode_prefixed_hex, Address, Bytes, CoinSymbol, CHECK_PREFIX};
use mintx_crypto::hash::keccak256;
use mintx_crypto::keys::{recover_address, PrivateKey, RAW_SIGNATURE_LEN};
use mintx_rlp::{decode_exact, encode_list, RlpItem};
use mintx_tx::operation::RedeemCheck;
use mintx_tx::Signature;
use num_bigint::BigUint;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::proof::make_proof;

const CHECK_FIELD_COUNT: usize = 9;

/// A signed bearer check. Whoever knows the passphrase can redeem it
/// until `due_block`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckTransaction {
    nonce: u64,
    chain_id: u8,
    coin: CoinSymbol,
    value: BigUint,
    due_block: u64,
    /// Passphrase key's signature over the first five fields.
    #[serde(deserialize_with = "deserialize_lock")]
    lock: Bytes,
    signature: Signature,
}

impl CheckTransaction {
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub fn chain_id(&self) -> u8 {
        self.chain_id
    }

    pub fn coin(&self) -> &CoinSymbol {
        &self.coin
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn due_block(&self) -> u64 {
        self.due_block
    }

    pub fn lock(&self) -> &Bytes {
        &self.lock
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut fields = body_fields(self.nonce, self.chain_id, &self.coin, &self.value, self.due_block);
        fields.push(RlpItem::bytes(self.lock.as_slice()));
        fields.extend(self.signature.to_items());
        encode_list(&fields)
    }

    /// `Mc` + hex of the full encoding.
    pub fn to_text(&self) -> String {
        format!("{CHECK_PREFIX}{}", hex::encode(self.encode()))
    }

    pub fn from_text(text: &str) -> Result<Self, CheckError> {
        let bytes = decode_prefixed_hex(text, CHECK_PREFIX)?;
        Self::decode(&bytes)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CheckError> {
        let result = decode_check(bytes);
        if let Err(e) = &result {
            debug!(reason = %e, "rejected check encoding");
        }
        result
    }

    /// Address that issued (and funds) this check.
    pub fn recover_issuer(&self) -> Result<Address, CheckError> {
        let mut fields = body_fields(self.nonce, self.chain_id, &self.coin, &self.value, self.due_block);
        fields.push(RlpItem::bytes(self.lock.as_slice()));
        let hash = keccak256(&encode_list(&fields));
        Ok(recover_address(&hash, &self.signature.to_recoverable()?)?)
    }

    /// `RedeemCheck` payload for `redeemer`, with the proof derived from `passphrase`.
    pub fn redeem(&self, redeemer: &Address, passphrase: &str) -> Result<RedeemCheck, CheckError> {
        let proof = make_proof(redeemer, passphrase)?;
        Ok(RedeemCheck::with_proof(Bytes::new(self.encode()), proof))
    }
}

fn deserialize_lock<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
    let lock = Bytes::deserialize(deserializer)?;
    if lock.len() != RAW_SIGNATURE_LEN {
        return Err(de::Error::invalid_length(lock.len(), &"a 65-byte lock"));
    }
    Ok(lock)
}

fn body_fields(
    nonce: u64,
    chain_id: u8,
    coin: &CoinSymbol,
    value: &BigUint,
    due_block: u64,
) -> Vec<RlpItem> {
    vec![
        RlpItem::uint(nonce),
        RlpItem::uint(chain_id as u64),
        RlpItem::bytes(coin.to_padded().to_vec()),
        RlpItem::biguint(value),
        RlpItem::uint(due_block),
    ]
}

fn decode_check(bytes: &[u8]) -> Result<CheckTransaction, CheckError> {
    let item = decode_exact(bytes)?;
    let fields = item.as_list()?;
    if fields.len() != CHECK_FIELD_COUNT {
        return Err(CheckError::MalformedCheck(format!(
            "expected {CHECK_FIELD_COUNT} fields, got {}",
            fields.len()
        )));
    }
    let lock = fields[5].as_bytes()?;
    if lock.len() != RAW_SIGNATURE_LEN {
        return Err(CheckError::MalformedCheck(format!(
            "lock must be {RAW_SIGNATURE_LEN} bytes, got {}",
            lock.len()
        )));
    }
    Ok(CheckTransaction {
        nonce: fields[0].as_u64()?,
        chain_id: fields[1].as_u8()?,
        coin: CoinSymbol::from_padded(fields[2].as_bytes()?)?,
        value: fields[3].as_biguint()?,
        due_block: fields[4].as_u64()?,
        lock: Bytes::from(lock),
        signature: Signature::from_items(&fields[6], &fields[7], &fields[8])?,
    })
}

#[derive(Debug, Clone, Default)]
pub struct CheckBuilder {
    nonce: Option<u64>,
    chain_id: Option<u8>,
    coin: Option<CoinSymbol>,
    value: Option<BigUint>,
    due_block: Option<u64>,
}

impl CheckBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill chain id and coin from the network.
    pub fn with_config(config: &NetworkConfig) -> Self {
        Self {
            chain_id: Some(config.chain_id),
            coin: Some(config.base_coin.clone()),
            ..Self::default()
        }
    }

    pub fn nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn chain_id(mut self, chain_id: u8) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn coin(mut self, coin: CoinSymbol) -> Self {
        self.coin = Some(coin);
        self
    }

    /// Amount in pip.
    pub fn value(mut self, value: BigUint) -> Self {
        self.value = Some(value);
        self
    }

    /// Last block at which the check can be redeemed.
    pub fn due_block(mut self, due_block: u64) -> Self {
        self.due_block = Some(due_block);
        self
    }

    /// Lock the check with `passphrase` and sign it with the issuer's key.
    pub fn sign(self, key: PrivateKey, passphrase: &str) -> Result<CheckTransaction, CheckError> {
        let nonce = self.nonce.ok_or(CheckError::IncompleteCheck("nonce"))?;
        let chain_id = self.chain_id.ok_or(CheckError::IncompleteCheck("chain_id"))?;
        let coin = self.coin.ok_or(CheckError::IncompleteCheck("coin"))?;
        let value = self.value.ok_or(CheckError::IncompleteCheck("value"))?;
        let due_block = self.due_block.ok_or(CheckError::IncompleteCheck("due_block"))?;

        let mut fields = body_fields(nonce, chain_id, &coin, &value, due_block);
        let lock = {
            let passphrase_key = PrivateKey::from_passphrase(passphrase)?;
            passphrase_key
                .sign_hash(&keccak256(&encode_list(&fields)))?
                .to_bytes()
        };
        fields.push(RlpItem::bytes(lock.to_vec()));
        let sig = key.sign_hash(&keccak256(&encode_list(&fields)))?;
        drop(key);
        debug!(nonce, chain_id, due_block, coin = %coin, "check issued");

        Ok(CheckTransaction {
            nonce,
            chain_id,
            coin,
            value,
            due_block,
            lock: Bytes::new(lock.to_vec()),
            signature: Signature::from_recoverable(&sig),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mintx_core::error::RlpError;
    use mintx_core::units::coins;

    const KEY: &str = "07bc17abdcee8b971bb8723e36fe9d2523306d5ab2d683631693238e0f9df142";
    const CHECK_HEX: &str = "f8a001018a4d4e5400000000000000888ac7230489e80000830f423fb8410529ef0ccbf44d73d61adaa4512e7ce73618e8d0be6648209a14c1a1c5e70e5429f8b449d7ce5a733387bdaceb441fc7bff19cb4d28301c34064628fcb7d2211011ba0c4ebe16e5fc883ab136c148464dafc07012b66dc5114340579b61b1b7fb4f0f2a0386d23c13be5a9cf283237a737373b4b32516a782456e3a60f86b2f55f0ffbe9";
    const LOCK_HEX: &str = "0529ef0ccbf44d73d61adaa4512e7ce73618e8d0be6648209a14c1a1c5e70e5429f8b449d7ce5a733387bdaceb441fc7bff19cb4d28301c34064628fcb7d221101";

    fn issue() -> CheckTransaction {
        CheckBuilder::with_config(&NetworkConfig::mainnet())
            .nonce(1)
            .value(coins(10))
            .due_block(999_999)
            .sign(PrivateKey::from_hex(KEY).unwrap(), "pass")
            .unwrap()
    }

    #[test]
    fn test_known_check() {
        let check = issue();
        assert_eq!(check.lock().to_hex(), LOCK_HEX);
        assert_eq!(check.to_text(), format!("Mc{CHECK_HEX}"));
    }

    #[test]
    fn test_decode_known_check() {
        let check = CheckTransaction::from_text(&format!("Mc{CHECK_HEX}")).unwrap();
        assert_eq!(check.nonce(), 1);
        assert_eq!(check.chain_id(), 1);
        assert_eq!(check.coin().as_str(), "MNT");
        assert_eq!(check.value(), &coins(10));
        assert_eq!(check.due_block(), 999_999);
        assert_eq!(check, issue());
    }

    #[test]
    fn test_recover_issuer() {
        assert_eq!(
            issue().recover_issuer().unwrap().to_string(),
            "Mx31e61a05adbd13c6b625262704bc305bf7725026"
        );
    }

    #[test]
    fn test_missing_fields() {
        let result = CheckBuilder::new()
            .nonce(1)
            .value(coins(1))
            .due_block(10)
            .sign(PrivateKey::from_hex(KEY).unwrap(), "pass");
        assert!(matches!(result, Err(CheckError::IncompleteCheck("chain_id"))));
    }

    #[test]
    fn test_passphrase_changes_lock() {
        let other = CheckBuilder::with_config(&NetworkConfig::mainnet())
            .nonce(1)
            .value(coins(10))
            .due_block(999_999)
            .sign(PrivateKey::from_hex(KEY).unwrap(), "other")
            .unwrap();
        assert_ne!(other.lock(), issue().lock());
    }

    #[test]
    fn test_wrong_prefix() {
        assert!(matches!(
            CheckTransaction::from_text(&format!("Mt{CHECK_HEX}")),
            Err(CheckError::Value(_))
        ));
    }

    #[test]
    fn test_malformed_lock() {
        let mut fields = body_fields(1, 1, &CoinSymbol::new("MNT").unwrap(), &coins(1), 5);
        fields.push(RlpItem::bytes(vec![1u8; 64]));
        fields.extend(Signature::EMPTY.to_items());
        assert!(matches!(
            CheckTransaction::decode(&encode_list(&fields)),
            Err(CheckError::MalformedCheck(_))
        ));
    }

    #[test]
    fn test_truncated_check() {
        let bytes = hex::decode(CHECK_HEX).unwrap();
        assert!(matches!(
            CheckTransaction::decode(&bytes[..40]),
            Err(CheckError::Rlp(RlpError::TruncatedInput))
        ));
    }

    #[test]
    fn test_redeem_payload() {
        let redeemer: Address = "Mxfe60014a6e9ac91618f5d1cab3fd58cded61ee99".parse().unwrap();
        let payload = issue().redeem(&redeemer, "pass").unwrap();
        assert_eq!(payload.raw_check().to_hex(), CHECK_HEX);
        assert_eq!(payload.proof().len(), RAW_SIGNATURE_LEN);
    }

    #[test]
    fn test_serde_roundtrip() {
        let check = issue();
        let json = serde_json::to_string(&check).unwrap();
        let back: CheckTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, check);
    }

    #[test]
    fn test_serde_rejects_short_lock() {
        let mut value = serde_json::to_value(issue()).unwrap();
        value["lock"] = serde_json::Value::String("01".repeat(64));
        assert!(serde_json::from_value::<CheckTransaction>(value).is_err());
    }
}
