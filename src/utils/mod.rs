//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`db_error`] - SQLx error classification
//! - [`client_ip`] - Visitor address extraction

pub mod client_ip;
pub mod code_generator;
pub mod db_error;
