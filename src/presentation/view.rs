use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::form::{ItemDetails, ItemEditor, ModalSize};

use super::components::{render_footer, render_item_editor, render_section};

/// What the list editor shows for one array section.
pub struct SectionView<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub details: &'a [ItemDetails],
    pub selected: Option<usize>,
    pub editable_index: Option<usize>,
    pub disabled: bool,
}

pub struct UiContext<'a> {
    pub section: SectionView<'a>,
    pub editor: Option<&'a ItemEditor>,
    pub modal_size: ModalSize,
    pub status_message: &'a str,
    pub dirty: bool,
    pub help: Option<&'a str>,
}

pub fn draw(frame: &mut Frame<'_>, ctx: UiContext<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(2)])
        .split(frame.area());

    render_section(frame, chunks[0], &ctx.section);
    render_footer(frame, chunks[1], &ctx);

    if let Some(editor) = ctx.editor {
        render_item_editor(frame, editor, ctx.modal_size);
    }
}
