pub mod dataset;
pub mod error;
pub mod incident;
pub mod report;
pub mod ticket;
pub mod user;
