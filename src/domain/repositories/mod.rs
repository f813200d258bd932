//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations; implementations live in
//! `crate::infrastructure::persistence`. Mock implementations are generated
//! via `mockall` for unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Short link CRUD, count and range listing
//! - [`VisitRepository`] - Visit recording, count and range listing
//!
//! Both report failures as [`StoreError`], which the application layer maps
//! to HTTP-facing errors.

pub mod error;
pub mod link_repository;
pub mod visit_repository;

pub use error::StoreError;
pub use link_repository::LinkRepository;
pub use visit_repository::VisitRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use visit_repository::MockVisitRepository;
