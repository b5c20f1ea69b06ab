//! Core dictionary lookup engine
//!
//! # Module Organization
//!
//! - [`types`]: errors, options, data model and the document adapter seam
//! - [`index`]: builds the headword index from the orthographic index
//! - [`render`]: turns a headword's fragments into displayable markup
//! - [`links`]: maps link offsets back to headwords
//! - [`resources`]: fetches and decodes images referenced by an entry
//! - [`completion`]: filters the vocabulary as the user types
//! - [`collation`]: presentation order of the vocabulary
//! - [`session`]: background opening and the active-dictionary slot
//! - [`library`]: finds dictionary files on disk

pub mod collation;
pub mod completion;
mod dictionary;
pub mod index;
pub mod library;
pub mod links;
pub mod render;
pub mod resources;
pub mod session;
pub mod types;

pub use dictionary::DictionaryIndex;
pub use types::error::{DictError, Result};
