mod array_ui;
mod input;
mod options;
mod runtime;
mod status;
mod terminal;

pub use array_ui::ArraySectionUI;
pub use options::UiOptions;
