pub mod fee;
pub mod operation;
pub mod transaction;

pub use operation::{Operation, OperationType, Payload};
pub use transaction::{
    MultisigEntry, Signature, SignatureData, SignedTransaction, Transaction, TransactionBuilder,
};
