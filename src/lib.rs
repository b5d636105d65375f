pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod remote;
pub mod search;
