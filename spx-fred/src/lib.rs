pub mod client;
pub mod error;
pub mod observation;
pub mod query;
