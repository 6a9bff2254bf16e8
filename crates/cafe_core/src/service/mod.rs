//! Core use-case services.
//!
//! # Responsibility
//! - Gate every mutation behind the validation pipeline.
//! - Map repository outcomes to the caller-facing error taxonomy.
//! - Keep routing/presentation layers decoupled from storage details.

pub mod cafe_service;
pub mod employee_service;
pub mod error;
