use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength { expected: String, actual: usize },
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("invalid amount: {0}")]
    InvalidAmount(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RlpError {
    #[error("input truncated: header declares more bytes than supplied")]
    TruncatedInput,
    #[error("non-canonical length header")]
    NonCanonicalLength,
    #[error("non-canonical integer: leading zero byte")]
    NonCanonicalInteger,
    #[error("trailing bytes after item: {0}")]
    TrailingBytes(usize),
    #[error("expected list, found byte string")]
    ExpectedList,
    #[error("expected byte string, found list")]
    ExpectedBytes,
    #[error("integer does not fit in {0} bits")]
    IntegerOverflow(u32),
    #[error("list nesting exceeds depth {0}")]
    DepthLimitExceeded(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid private key")]
    InvalidPrivateKey,
    #[error("invalid public key")]
    InvalidPublicKey,
    #[error("signing primitive returned no signature")]
    SigningFailed,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("public key recovery failed")]
    RecoveryFailed,
}

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("incomplete {operation}: missing field `{field}`")]
    IncompleteOperation {
        operation: &'static str,
        field: &'static str,
    },
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("operation type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
    },
    #[error("unknown operation type: {0:#04x}")]
    UnknownOperationType(u8),
    #[error("malformed transaction: {0}")]
    MalformedTransaction(String),
    #[error("codec error: {0}")]
    Rlp(#[from] RlpError),
    #[error("value error: {0}")]
    Value(#[from] ValueError),
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("incomplete check: missing field `{0}`")]
    IncompleteCheck(&'static str),
    #[error("malformed check: {0}")]
    MalformedCheck(String),
    #[error("codec error: {0}")]
    Rlp(#[from] RlpError),
    #[error("value error: {0}")]
    Value(#[from] ValueError),
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}
