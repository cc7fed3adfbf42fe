//! # Autowire Support
//!
//! Shared utilities for the autowire crates.
//!
//! This crate provides:
//! - Rendering of resolution chains for error messages
//! - Class-name derivation from Rust type names
//! - "Did you mean?" suggestions for unknown service keys

pub mod rendering;
