//! Core domain entities.
//!
//! Entities are plain data structures without business logic. Creation and
//! update inputs live in separate structs:
//!
//! - [`Link`] / [`NewLink`] / [`LinkChanges`] - short link mappings
//! - [`LinkVisit`] / [`NewLinkVisit`] - redirect events

pub mod link;
pub mod link_visit;

pub use link::{Link, LinkChanges, NewLink};
pub use link_visit::{LinkVisit, NewLinkVisit};
