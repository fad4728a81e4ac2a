#![forbid(unsafe_code)]

pub mod file;
pub mod http;
pub mod repository;

pub use file::FileBankSource;
pub use http::HttpBankSource;
pub use repository::{BankError, BankSource, InMemoryBankSource, parse_bank};
