//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer.

pub mod persistence;
