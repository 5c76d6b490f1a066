pub mod check;
pub mod proof;

pub use check::{CheckBuilder, CheckTransaction};
pub use proof::make_proof;
