//! Application layer services implementing business logic.
//!
//! Services consume repository traits, classify storage errors into
//! [`crate::error::AppError`], and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link CRUD, code generation and listing
//! - [`services::redirect_service::RedirectService`] - Code resolution and visit recording
//! - [`services::visit_service::VisitService`] - Visit log listing

pub mod services;
