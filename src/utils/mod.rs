//! Utility functions for code generation and target URL processing.
//!
//! - [`code_generator`] - Short code generation and validation
//! - [`target_normalizer`] - Target URL normalization and validation

pub mod code_generator;
pub mod target_normalizer;
