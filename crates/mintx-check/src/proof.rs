use mintx_core::error::CryptoError;
use mintx_core::types::Address;
use mintx_crypto::hash::keccak256_pair;
use mintx_crypto::keys::{PrivateKey, RAW_SIGNATURE_LEN};

/// Redemption proof for `redeemer`: the passphrase key's signature over
/// Keccak-256(address || passphrase), packed as `r || s || recovery_id`.
///
/// The same pair always yields the same proof.
pub fn make_proof(
    redeemer: &Address,
    passphrase: &str,
) -> Result<[u8; RAW_SIGNATURE_LEN], CryptoError> {
    let key = PrivateKey::from_passphrase(passphrase)?;
    let hash = keccak256_pair(redeemer.as_bytes(), passphrase.as_bytes());
    Ok(key.sign_hash(&hash)?.to_bytes())
}
