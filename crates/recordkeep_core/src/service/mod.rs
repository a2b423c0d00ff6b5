//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep CLI layers decoupled from storage details.

pub mod finance;
pub mod health_service;
pub mod inventory_log;
pub mod inventory_service;
