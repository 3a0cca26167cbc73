//! Client library for the string analyzer daemon.
//!
//! # Example
//!
//! ```rust,no_run
//! use strings_client::StringsClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = StringsClient::new("http://127.0.0.1:8000")?;
//!
//!     let record = client.create("racecar").await?;
//!     println!("{} palindrome={}", record.id, record.properties.properties.is_palindrome);
//!
//!     let matches = client.filter_natural_language("single word palindromes").await?;
//!     println!("{} matching strings", matches.count);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{StringsClient, DEFAULT_ENDPOINT};
pub use error::ClientError;

// Re-export wire types for convenience
pub use strings_types::{
    FilterParams, HealthResponse, ListResponse, NaturalLanguageResponse, RecordView,
};
