use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use super::super::view::SectionView;
use super::description::{description_table, details_block};

const EMPTY_LIST: &str = "No items yet. Press n to add one.";
const EMPTY_READ_ONLY_LIST: &str = "No items.";

/// Group header, item list and the expanded description of the selected item.
pub fn render_section(frame: &mut Frame<'_>, area: Rect, view: &SectionView<'_>) {
    let mut title = view.title.to_string();
    if view.disabled {
        title.push_str(" (read-only)");
    }
    let group = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(Color::Cyan));
    let inner = group.inner(area);
    frame.render_widget(group, area);

    let description_lines: Vec<Line<'static>> = view
        .description
        .map(|text| {
            textwrap::wrap(text, inner.width.max(1) as usize)
                .into_iter()
                .map(|line| Line::from(line.into_owned()))
                .collect()
        })
        .unwrap_or_default();
    let description_height = description_lines.len().min(4) as u16;
    let details_height = view
        .selected
        .and_then(|index| view.details.get(index))
        .map(|details| details.description.rows.len() as u16 + 2)
        .unwrap_or(3)
        .min(inner.height / 2);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(description_height),
            Constraint::Min(3),
            Constraint::Length(details_height),
        ])
        .split(inner);

    if description_height > 0 {
        let paragraph = Paragraph::new(description_lines).style(Style::default().fg(Color::Gray));
        frame.render_widget(paragraph, chunks[0]);
    }
    render_item_list(frame, chunks[1], view);
    render_details(frame, chunks[2], view);
}

fn render_item_list(frame: &mut Frame<'_>, area: Rect, view: &SectionView<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Items ({})", view.details.len()));
    if view.details.is_empty() {
        let hint = if view.disabled {
            EMPTY_READ_ONLY_LIST
        } else {
            EMPTY_LIST
        };
        let placeholder = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let items: Vec<ListItem<'_>> = view
        .details
        .iter()
        .enumerate()
        .map(|(index, details)| {
            let marker = if view.editable_index == Some(index) {
                "✎ "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{}", details.name))
        })
        .collect();
    let mut state = ListState::default();
    state.select(view.selected);
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_details(frame: &mut Frame<'_>, area: Rect, view: &SectionView<'_>) {
    match view.selected.and_then(|index| view.details.get(index)) {
        Some(details) => {
            let table = description_table(&details.description, details_block());
            frame.render_widget(table, area);
        }
        None => frame.render_widget(details_block(), area),
    }
}
