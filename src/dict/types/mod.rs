//! Foundational data structures, error types, options and the document adapter seam.

pub mod document;
pub mod error;
pub mod models;
pub mod options;
