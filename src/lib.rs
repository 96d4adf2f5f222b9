#![deny(rust_2018_idioms)]
//! Terminal editor for array-of-objects fields inside configuration documents.
//!
//! An [`ArraySection`](form::ArraySection) binds a JSON pointer of a
//! [`FormStore`](form::FormStore) document to a list of string-keyed items,
//! derives a display name and a description table for each of them, and
//! splices edits from the item editor back into the document.

mod app;
pub mod domain;
pub mod form;
pub mod io;
pub mod presentation;

pub use app::{ArraySectionUI, UiOptions};
pub use domain::{FieldDefinition, Item, PropertyMeta, parse_array_field};
pub use form::{ArraySection, FormStore, ModalSize};
pub use io::{DocumentFormat, OutputDestination, OutputOptions, emit, parse_document_str};

pub mod prelude {
    pub use super::{ArraySection, ArraySectionUI, FieldDefinition, FormStore, Item, UiOptions};
}
