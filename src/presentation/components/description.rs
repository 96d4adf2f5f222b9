use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
};
use unicode_width::UnicodeWidthStr;

use crate::form::ItemDescription;

/// Two-column `title: | value` table for the expanded view of one item.
pub fn description_table<'a>(description: &'a ItemDescription, block: Block<'a>) -> Table<'a> {
    let rows: Vec<Row<'a>> = description
        .rows
        .iter()
        .map(|row| {
            Row::new(vec![
                Cell::from(format!("{}:", row.title)).style(
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD),
                ),
                Cell::from(row.value.as_str()),
            ])
        })
        .collect();
    Table::new(rows, [Constraint::Length(title_width(description)), Constraint::Min(1)])
        .block(block)
        .column_spacing(1)
}

/// Display width of the widest `"{title}:"` cell.
pub fn title_width(description: &ItemDescription) -> u16 {
    description
        .rows
        .iter()
        .map(|row| row.title.width() + 1)
        .max()
        .unwrap_or(0)
        .min(u16::MAX as usize) as u16
}

pub fn details_block() -> Block<'static> {
    Block::default().borders(Borders::ALL).title("Details")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::DescriptionRow;

    #[test]
    fn title_width_counts_wide_characters() {
        let description = ItemDescription {
            rows: vec![
                DescriptionRow {
                    key: "a".into(),
                    title: "名前".into(),
                    value: "x".into(),
                },
                DescriptionRow {
                    key: "b".into(),
                    title: "id".into(),
                    value: "y".into(),
                },
            ],
        };
        assert_eq!(title_width(&description), 5);
        assert_eq!(title_width(&ItemDescription::default()), 0);
    }
}
