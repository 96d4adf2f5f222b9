mod components;
mod view;

pub use components::{description_table, modal_rect, popup_rect, title_width};
pub use view::{SectionView, UiContext, draw};
