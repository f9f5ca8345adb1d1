//! Implements the bucket experimentation client
//!
//! To change the default request timeout set the BUCKET_TIMEOUT_MS
//! environment variable to the desired timeout value.
mod client;
mod error;
mod http;

pub mod models;
pub use crate::client::Client;
pub use crate::error::Error;
