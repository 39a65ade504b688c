//! Core use-case services.
//!
//! # Responsibility
//! - Gate raw form input through validators before any persistence call.
//! - Keep presentation layers decoupled from storage details.

pub mod student_service;
