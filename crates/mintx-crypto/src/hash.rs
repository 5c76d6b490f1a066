use mintx_core::types::Hash;
use sha2::Sha256;
use sha3::{Digest, Keccak256};

/// Compute Keccak-256 of arbitrary data.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute Keccak-256 of the concatenation of two byte slices.
pub fn keccak256_pair(left: &[u8], right: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak256::new();
    hasher.update(left);
    hasher.update(right);
    hasher.finalize().into()
}

/// Compute SHA-256 of arbitrary data.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The digest used for signing hashes and transaction ids.
pub fn digest(data: &[u8]) -> Hash {
    Hash::new(keccak256(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            hex::encode(keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_keccak_is_not_sha3() {
        // NIST SHA3-256("") differs from Keccak-256("") in padding
        assert_ne!(
            hex::encode(keccak256(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn test_sha256_known_vector() {
        assert_eq!(
            hex::encode(sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_keccak256_pair() {
        assert_eq!(keccak256_pair(b"hello", b"world"), keccak256(b"helloworld"));
    }

    #[test]
    fn test_digest_wraps_keccak() {
        assert_eq!(digest(b"abc").as_bytes(), &keccak256(b"abc"));
    }
}
