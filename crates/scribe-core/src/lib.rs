//! # Scribe Core
//!
//! The domain layer of the Scribe blogging module: entities, the error
//! taxonomy, configuration, the port traits a host (or `scribe-infra`)
//! implements, and the post lifecycle / query / publication services.
//!
//! The module is designed to be mounted inside a larger application. The
//! host supplies authentication, authorization and caching around these
//! services; this crate performs no I/O of its own beyond the injected
//! ports.

pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use config::BlogConfig;
pub use error::DomainError;
