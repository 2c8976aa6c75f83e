//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI layers decoupled from storage and graph internals.

pub mod admin_service;
pub mod member_service;
pub mod tree_service;
