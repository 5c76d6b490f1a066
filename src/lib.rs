// Root crate re-exports for integration tests and downstream users.
pub use mintx_check as check;
pub use mintx_core as core;
pub use mintx_crypto as crypto;
pub use mintx_rlp as rlp;
pub use mintx_tx as tx;
