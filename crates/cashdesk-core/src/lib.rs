pub mod config;
pub use config::Config;

pub mod datetime;

pub mod errors;
pub use errors::{Error, Result};

pub mod ledger;
pub mod registry;
pub mod statistics;

mod desk;
pub use desk::CashDesk;
