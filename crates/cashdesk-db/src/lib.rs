pub mod connection;
pub use connection::Connection;

pub mod results;
pub use results::QueryError;

pub mod schema;

pub mod deposits;
pub mod members;
pub mod memberships;
