//! Core domain entities representing the business data model.
//!
//! - [`Link`] - A short code mapped to a target URL
//! - [`NewLink`] - Input data for creating a link

pub mod link;

pub use link::{Link, NewLink};
