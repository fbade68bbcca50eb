//! Account module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and profile edits live here; the store and token
//! issuer are injected collaborators.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;
pub mod token;

pub use service::AccountService;
