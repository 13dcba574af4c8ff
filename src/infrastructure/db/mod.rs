pub mod bulk;
pub mod connection;
pub mod datasets;
pub mod incidents;
pub mod tickets;
pub mod users;
