pub mod client;
pub mod scope;
