mod item;
mod parser;
mod schema;

pub use item::{Item, ItemError};
pub(crate) use item::kind_name;
pub use parser::{SchemaError, field_key_from_pointer, parse_array_field};
pub use schema::{FieldDefinition, PropertyMeta};
