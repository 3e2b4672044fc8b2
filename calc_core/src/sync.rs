/// Things that can go wrong talking to the arithmetic service
pub mod error;
pub use error::Error;

/// Client for the arithmetic service
pub mod client;
pub use client::Client;

/// Ask the service to do some arithmetic
pub mod operate;

/// Check that the service is up
pub mod health;
