//! Catalog module: podcast and episode lifecycle over injected stores.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::CatalogService;
