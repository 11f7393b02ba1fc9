//! HTTP client for the ShelfLife REST backend.
//!
//! [`ShelfLifeApi`] owns the request helper that every typed accessor is
//! built on. Callers pass a [`CallContext`] on every call: it carries the
//! bearer credentials and the cancellation token for that call, so no
//! global state is consulted while a request is in flight.

pub mod config;
pub mod context;
pub mod error;
pub mod request;
pub mod reviews;
pub mod sessions;
pub mod token_store;
pub mod works;

pub use config::ClientConfig;
pub use context::{CallContext, Credentials};
pub use error::ApiError;
pub use request::{Payload, ShelfLifeApi};
pub use token_store::{TokenStore, TokenStoreError};
