use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Text prefix of an account address.
pub const ADDRESS_PREFIX: &str = "Mx";
/// Text prefix of a validator public key.
pub const PUBLIC_KEY_PREFIX: &str = "Mp";
/// Text prefix of a transaction hash and of a signed transaction.
pub const TRANSACTION_PREFIX: &str = "Mt";
/// Text prefix of an issued check.
pub const CHECK_PREFIX: &str = "Mc";

/// Address length in bytes.
pub const ADDRESS_LEN: usize = 20;
/// Hash length in bytes.
pub const HASH_LEN: usize = 32;
/// Wire width of a coin symbol field.
pub const COIN_SYMBOL_LEN: usize = 10;

/// Strip `prefix` from `s` and decode the remaining hex.
///
/// The hex payload must be lowercase or uppercase hex digits only.
pub fn decode_prefixed_hex(s: &str, prefix: &str) -> Result<Vec<u8>, ValueError> {
    let body = s
        .strip_prefix(prefix)
        .ok_or_else(|| ValueError::InvalidFormat(format!("expected prefix `{prefix}`")))?;
    hex::decode(body).map_err(|e| ValueError::InvalidFormat(e.to_string()))
}

/// Arbitrary-length immutable byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bytes(Vec<u8>);

impl Bytes {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Parse hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ValueError> {
        let body = s.strip_prefix("0x").unwrap_or(s);
        hex::decode(body)
            .map(Self)
            .map_err(|e| ValueError::InvalidFormat(e.to_string()))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(v: Vec<u8>) -> Self {
        Self(v)
    }
}

impl From<&[u8]> for Bytes {
    fn from(v: &[u8]) -> Self {
        Self(v.to_vec())
    }
}

impl From<&str> for Bytes {
    fn from(v: &str) -> Self {
        Self(v.as_bytes().to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl TryFrom<String> for Bytes {
    type Error = ValueError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Bytes> for String {
    fn from(b: Bytes) -> Self {
        b.to_hex()
    }
}

/// A 20-byte account address, rendered as `Mx` + 40 hex chars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    pub const fn new(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        let arr: [u8; ADDRESS_LEN] = bytes.try_into().map_err(|_| ValueError::InvalidLength {
            expected: ADDRESS_LEN.to_string(),
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl FromStr for Address {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = decode_prefixed_hex(s, ADDRESS_PREFIX)?;
        if raw.len() != ADDRESS_LEN {
            return Err(ValueError::InvalidFormat(format!(
                "address must carry {} hex chars, got {}",
                ADDRESS_LEN * 2,
                raw.len() * 2
            )));
        }
        Self::from_slice(&raw)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ADDRESS_PREFIX, hex::encode(self.0))
    }
}

impl TryFrom<String> for Address {
    type Error = ValueError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(a: Address) -> Self {
        a.to_string()
    }
}

/// A validator public key: 32 bytes, or 33 bytes in compressed SEC1 form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKey(Vec<u8>);

impl PublicKey {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        match bytes.len() {
            32 | 33 => Ok(Self(bytes.to_vec())),
            n => Err(ValueError::InvalidLength {
                expected: "32 or 33".to_string(),
                actual: n,
            }),
        }
    }

    pub fn from_compressed(bytes: [u8; 33]) -> Self {
        Self(bytes.to_vec())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Whether this is a 33-byte compressed curve point.
    pub fn is_compressed(&self) -> bool {
        self.0.len() == 33
    }
}

impl FromStr for PublicKey {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = decode_prefixed_hex(s, PUBLIC_KEY_PREFIX)?;
        Self::from_slice(&raw).map_err(|_| {
            ValueError::InvalidFormat(format!(
                "public key must carry 64 or 66 hex chars, got {}",
                raw.len() * 2
            ))
        })
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", PUBLIC_KEY_PREFIX, hex::encode(&self.0))
    }
}

impl TryFrom<String> for PublicKey {
    type Error = ValueError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<PublicKey> for String {
    fn from(k: PublicKey) -> Self {
        k.to_string()
    }
}

/// A 32-byte digest, rendered as `Mt` + 64 hex chars.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hash([u8; HASH_LEN]);

impl Hash {
    pub const fn new(bytes: [u8; HASH_LEN]) -> Self {
        Self(bytes)
    }

    pub fn from_slice(bytes: &[u8]) -> Result<Self, ValueError> {
        let arr: [u8; HASH_LEN] = bytes.try_into().map_err(|_| ValueError::InvalidLength {
            expected: HASH_LEN.to_string(),
            actual: bytes.len(),
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; HASH_LEN] {
        &self.0
    }
}

impl FromStr for Hash {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = decode_prefixed_hex(s, TRANSACTION_PREFIX)?;
        if raw.len() != HASH_LEN {
            return Err(ValueError::InvalidFormat(format!(
                "hash must carry {} hex chars, got {}",
                HASH_LEN * 2,
                raw.len() * 2
            )));
        }
        Self::from_slice(&raw)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TRANSACTION_PREFIX, hex::encode(self.0))
    }
}

impl TryFrom<String> for Hash {
    type Error = ValueError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Hash> for String {
    fn from(h: Hash) -> Self {
        h.to_string()
    }
}

/// Coin ticker: up to 10 uppercase ASCII letters or digits.
///
/// On the wire the symbol always occupies exactly 10 bytes, right-padded
/// with NUL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoinSymbol(String);

impl CoinSymbol {
    pub fn new(symbol: &str) -> Result<Self, ValueError> {
        if symbol.len() > COIN_SYMBOL_LEN {
            return Err(ValueError::InvalidLength {
                expected: format!("at most {COIN_SYMBOL_LEN}"),
                actual: symbol.len(),
            });
        }
        if !symbol
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        {
            return Err(ValueError::InvalidFormat(format!(
                "coin symbol `{symbol}` must be uppercase ASCII letters or digits"
            )));
        }
        Ok(Self(symbol.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_padded(&self) -> [u8; COIN_SYMBOL_LEN] {
        let mut out = [0u8; COIN_SYMBOL_LEN];
        out[..self.0.len()].copy_from_slice(self.0.as_bytes());
        out
    }

    /// Parse a 10-byte wire field, dropping the NUL padding.
    pub fn from_padded(bytes: &[u8]) -> Result<Self, ValueError> {
        if bytes.len() != COIN_SYMBOL_LEN {
            return Err(ValueError::InvalidLength {
                expected: COIN_SYMBOL_LEN.to_string(),
                actual: bytes.len(),
            });
        }
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(COIN_SYMBOL_LEN);
        if bytes[end..].iter().any(|&b| b != 0) {
            return Err(ValueError::InvalidFormat(
                "coin symbol has data after NUL padding".to_string(),
            ));
        }
        let symbol = std::str::from_utf8(&bytes[..end])
            .map_err(|e| ValueError::InvalidFormat(e.to_string()))?;
        Self::new(symbol)
    }
}

impl FromStr for CoinSymbol {
    type Err = ValueError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for CoinSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CoinSymbol {
    type Error = ValueError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<CoinSymbol> for String {
    fn from(c: CoinSymbol) -> Self {
        c.0
    }
}
