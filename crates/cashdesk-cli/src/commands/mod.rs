mod members;
pub use members::*;

mod ledger;
pub use ledger::*;

mod statistics;
pub use statistics::*;
