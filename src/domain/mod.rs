//! Domain layer for rule and documentation validation
//!
//! Architecture: Domain-Driven Design - Pure types with no I/O
//! - findings: Finding, ValidationReport and the crate error type

pub mod findings;

pub use findings::*;
