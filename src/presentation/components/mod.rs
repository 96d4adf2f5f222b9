mod description;
mod editor;
mod footer;
mod layout;
mod section;

pub use description::{description_table, title_width};
pub use editor::render_item_editor;
pub use footer::render_footer;
pub use layout::{modal_rect, popup_rect};
pub use section::render_section;
