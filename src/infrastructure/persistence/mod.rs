//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Driver
//! errors are classified into [`crate::domain::repositories::StoreError`]
//! before they leave this module.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - Link storage and retrieval
//! - [`PgVisitRepository`] - Visit recording and listing

pub mod pg_link_repository;
pub mod pg_visit_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_visit_repository::PgVisitRepository;
