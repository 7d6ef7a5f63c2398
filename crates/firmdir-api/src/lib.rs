//! Async HTTP client for the firmdir company-directory backend.
//!
//! The backend exposes a small JSON REST surface: `GET /companies` lists
//! the directory, `POST /companies` registers a new company. This crate
//! owns the transport configuration, the wire types, and the error
//! taxonomy; callers pass a [`CancellationToken`] into every request and
//! receive [`Error::Cancelled`] when it fires, distinct from every other
//! failure mode.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::DirectoryClient;
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{CompanyRecord, CreateCompanyRequest};
