#![forbid(unsafe_code)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod bank_account;
pub mod customer;
pub mod errors;
pub mod parameters;
pub mod types;

pub use bank_account::{BankAccount, BankAccountType};
pub use customer::Customer;
pub use parameters::{Field, ParameterBag, Parameterized, Parameters};

pub(crate) use tracing as logger;
