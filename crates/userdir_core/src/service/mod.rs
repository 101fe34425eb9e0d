//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls and pagination into use-case APIs.
//! - Keep the transport layer decoupled from storage details.

pub mod post_service;
pub mod user_service;
