mod editor;
mod error;
mod format;
mod list_editor;
mod section;
mod store;

pub use editor::{EditorInput, EditorOutcome, ItemEditor};
pub use error::FormError;
pub use format::{
    DescriptionRow, ItemDescription, ItemDetails, SECRET_MASK, item_description, item_name,
};
pub use list_editor::{ListEditor, ListEvent, ModalSize};
pub use section::{ArraySection, EditTarget};
pub use store::FormStore;
