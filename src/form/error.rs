use thiserror::Error;

use crate::domain::ItemError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{pointer}: expected an array, found {found}")]
    NotAnArray { pointer: String, found: &'static str },
    #[error("{pointer}: {source}")]
    InvalidItem {
        pointer: String,
        #[source]
        source: ItemError,
    },
}
