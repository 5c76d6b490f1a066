pub mod hash;
pub mod keys;

pub use keys::{PrivateKey, RecoverableSignature};
