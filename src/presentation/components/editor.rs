use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::form::{EditorInput, ItemEditor, ModalSize};

use super::layout::modal_rect;

/// Modal form for the item under edit, drawn over the section.
pub fn render_item_editor(frame: &mut Frame<'_>, editor: &ItemEditor, size: ModalSize) {
    let mut lines: Vec<Line<'static>> = Vec::new();
    if editor.inputs().is_empty() {
        lines.push(Line::from(Span::styled(
            "This item has no editable properties.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (index, input) in editor.inputs().iter().enumerate() {
        lines.push(input_line(input, index == editor.focus()));
        if let Some(error) = &input.error {
            lines.push(Line::from(Span::styled(
                format!("    ⚠ {error}"),
                Style::default().fg(Color::Red),
            )));
        }
    }
    if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(Color::Red),
        )));
    }
    let controls = if editor.is_read_only() {
        "Esc/Enter close"
    } else {
        "Tab/↑↓ move • Enter/Ctrl+S save • Esc cancel"
    };
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        controls,
        Style::default().fg(Color::Yellow),
    )));

    let height = lines.len() as u16 + 2;
    let area = modal_rect(frame.area(), size, height);
    frame.render_widget(Clear, area);

    let title = format!("{} – {}", editor.title(), editor.path());
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(paragraph, area);
}

fn input_line(input: &EditorInput, focused: bool) -> Line<'static> {
    let mut label = input.property.display_title().to_string();
    if input.property.required {
        label.push('*');
    }
    let shown = if input.property.secret {
        "*".repeat(input.buffer.chars().count())
    } else {
        input.buffer.clone()
    };
    let (marker, label_style, value_style) = if focused {
        (
            "» ",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White).add_modifier(Modifier::UNDERLINED),
        )
    } else {
        ("  ", Style::default().fg(Color::Gray), Style::default().fg(Color::White))
    };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{label}: "), label_style),
        Span::styled(shown, value_style),
    ])
}
