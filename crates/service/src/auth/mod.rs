//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Resolves bearer tokens to users; a token is only honoured while a session row holds it.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use errors::AuthError;
pub use service::AuthService;
