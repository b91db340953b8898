pub mod commission;
pub mod error;
pub mod ledger;
pub mod local_client;
pub mod repo;
pub mod signals;

pub use error::DomainError;
pub use ledger::LedgerService;
pub use signals::SignalEngine;
