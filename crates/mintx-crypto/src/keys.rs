use std::fmt;

use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use mintx_core::error::CryptoError;
use mintx_core::types::{Address, PublicKey};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use crate::hash::{keccak256, sha256};

/// Length of a detached `r || s || recovery_id` signature.
pub const RAW_SIGNATURE_LEN: usize = 65;

/// A secp256k1 private key.
///
/// Not `Clone`: each key value is consumed or dropped exactly once, and the
/// secret scalar is zeroed on drop.
pub struct PrivateKey {
    signing_key: SigningKey,
}

/// Output of the signing primitive: recovery id plus the two scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// Recovery id, 0 or 1.
    pub recovery_id: u8,
    pub r: [u8; 32],
    pub s: [u8; 32],
}

impl RecoverableSignature {
    /// Pack as `r || s || recovery_id`.
    pub fn to_bytes(&self) -> [u8; RAW_SIGNATURE_LEN] {
        let mut out = [0u8; RAW_SIGNATURE_LEN];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.recovery_id;
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != RAW_SIGNATURE_LEN {
            return Err(CryptoError::InvalidSignature);
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self {
            recovery_id: bytes[64],
            r,
            s,
        })
    }
}

impl PrivateKey {
    /// Generate a new random key.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut OsRng),
        }
    }

    /// Create from 32 secret bytes. Zero and out-of-range scalars are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        // k256 left-pads short slices; the key must be exactly 32 bytes
        if bytes.len() != 32 {
            return Err(CryptoError::InvalidPrivateKey);
        }
        let signing_key = SigningKey::from_slice(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Parse 64 hex chars, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let body = s.strip_prefix("0x").unwrap_or(s);
        let bytes = Zeroizing::new(hex::decode(body).map_err(|_| CryptoError::InvalidPrivateKey)?);
        Self::from_bytes(&bytes)
    }

    /// Derive a key from a passphrase: the key bytes are SHA-256(passphrase).
    pub fn from_passphrase(passphrase: &str) -> Result<Self, CryptoError> {
        let seed = Zeroizing::new(sha256(passphrase.as_bytes()));
        Self::from_bytes(seed.as_slice())
    }

    /// Compressed (33-byte) public key.
    pub fn public_key(&self) -> PublicKey {
        compressed_public_key(self.signing_key.verifying_key())
    }

    /// Address of this key: low 20 bytes of Keccak-256 over the uncompressed point.
    pub fn address(&self) -> Address {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash (RFC 6979 nonce, low-S normalized).
    pub fn sign_hash(&self, hash: &[u8; 32]) -> Result<RecoverableSignature, CryptoError> {
        let (sig, recid) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|_| CryptoError::SigningFailed)?;
        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Ok(RecoverableSignature {
            recovery_id: recid.to_byte(),
            r,
            s,
        })
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("address", &self.address())
            .finish_non_exhaustive()
    }
}

/// Recover the compressed public key that produced `signature` over `hash`.
pub fn recover_public_key(
    hash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<PublicKey, CryptoError> {
    recover_verifying_key(hash, signature).map(|vk| compressed_public_key(&vk))
}

/// Recover the signer address of `signature` over `hash`.
pub fn recover_address(
    hash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<Address, CryptoError> {
    recover_verifying_key(hash, signature).map(|vk| address_from_verifying_key(&vk))
}

/// Address of a secp256k1 public key given in SEC1 form.
///
/// 32-byte validator keys are not curve points and are rejected.
pub fn address_from_public_key(key: &PublicKey) -> Result<Address, CryptoError> {
    let vk = VerifyingKey::from_sec1_bytes(key.as_bytes()).map_err(|_| CryptoError::InvalidPublicKey)?;
    Ok(address_from_verifying_key(&vk))
}

fn recover_verifying_key(
    hash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<VerifyingKey, CryptoError> {
    let recid = RecoveryId::from_byte(signature.recovery_id).ok_or(CryptoError::InvalidSignature)?;
    let mut raw = [0u8; 64];
    raw[..32].copy_from_slice(&signature.r);
    raw[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&raw).map_err(|_| CryptoError::InvalidSignature)?;
    VerifyingKey::recover_from_prehash(hash, &sig, recid).map_err(|_| CryptoError::RecoveryFailed)
}

fn compressed_public_key(vk: &VerifyingKey) -> PublicKey {
    let point = vk.to_encoded_point(true);
    // compressed SEC1: tag byte followed by the 32-byte x-coordinate
    let mut bytes = [0u8; 33];
    bytes.copy_from_slice(&point.as_bytes()[..33]);
    PublicKey::from_compressed(bytes)
}

fn address_from_verifying_key(vk: &VerifyingKey) -> Address {
    let point = vk.to_encoded_point(false);
    // skip the 0x04 tag
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut out = [0u8; 20];
    out.copy_from_slice(&hash[12..]);
    Address::new(out)
}
