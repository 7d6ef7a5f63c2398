//! Reactive data layer between `firmdir-api` and UI consumers.
//!
//! This crate owns the business logic and request-state infrastructure
//! for the firmdir workspace:
//!
//! - **[`Fetcher<T>`]** — Request lifecycle controller. Wraps one async
//!   operation at a time behind an observable
//!   `{status, data, error}` triple; a new dispatch cancels and retires
//!   the previous in-flight invocation (newest wins), and drop cancels
//!   whatever is still pending.
//!
//! - **[`FetchStream<T>`]** — Subscription handle vended by a fetcher.
//!   Exposes `current()` / `latest()` / `changed()` for reactive
//!   consumers.
//!
//! - **[`Directory`]** — Facade owning the backend client plus one
//!   fetcher per logical view: the company listing and the
//!   create-company form.
//!
//! - **Domain model** ([`model`]) and form validation ([`validate`]) —
//!   canonical [`Company`] plus the validated [`NewCompany`] input.

pub mod config;
pub mod directory;
pub mod error;
pub mod fetch;
pub mod model;
pub mod stream;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DirectoryConfig, TlsVerification};
pub use directory::Directory;
pub use error::CoreError;
pub use fetch::{FetchOutcome, FetchState, FetchStatus, Fetcher};
pub use model::Company;
pub use stream::FetchStream;
pub use validate::NewCompany;
