pub mod account;
pub mod client;
pub mod password;
pub mod token;
