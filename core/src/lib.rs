//! Synchronous client for the Lob address API.
//!
//! # Overview
//! Builds authenticated requests, executes them over a blocking transport,
//! classifies the response status and decodes JSON bodies into typed
//! records.
//!
//! # Design
//! - `LobClient` is immutable after construction and cheap to clone; pass it
//!   to whatever needs to talk to Lob.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so the `Transport` seam can be replaced in tests.
//! - Every operation is split into `build_*` and `parse_*` around
//!   `LobClient::execute`, keeping the I/O boundary explicit.
//! - Errors carry an `ErrorKind` so callers can tell API errors from
//!   transport faults without matching on payloads.
//!
//! ```no_run
//! use lob_core::{AddressRequest, Config, LobClient};
//!
//! fn main() -> lob_core::Result<()> {
//!     let client = LobClient::new(Config::from_env()?);
//!     let address = AddressRequest {
//!         name: Some("Lobster Test".to_string()),
//!         address_line1: Some("1005 W Burnside St".to_string()),
//!         ..Default::default()
//!     };
//!     let created = client.addresses().create(&address)?;
//!     println!("{created:?}");
//!     Ok(())
//! }
//! ```

pub mod addresses;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use addresses::Addresses;
pub use client::{check_response, LobClient};
pub use config::{Config, API_VERSION, BASE_URL, LIBRARY_VERSION};
pub use error::{Error, ErrorKind, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{Address, AddressList, AddressRequest, DeleteResponse, ErrorBody, ErrorResponse};
