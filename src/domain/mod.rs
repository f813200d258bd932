//! Domain layer containing business entities and repository contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions and storage errors
//! - [`range`] - Range descriptor parsing and `Content-Range` computation
//!
//! The domain layer has no dependencies on the HTTP or database layers.

pub mod entities;
pub mod range;
pub mod repositories;
