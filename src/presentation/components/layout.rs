use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::form::ModalSize;

pub fn popup_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let inner = vertical[1];
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(inner.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(inner);
    horizontal[1]
}

/// Centered popup sized by the modal hint, never wider or taller than `area`.
pub fn modal_rect(area: Rect, size: ModalSize, content_height: u16) -> Rect {
    let width = (area.width as u32 * size.width_percent() as u32 / 100) as u16;
    let width = width.max(30).min(area.width);
    let height = content_height.min(area.height);
    popup_rect(area, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modal_width_follows_size_hint() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(modal_rect(area, ModalSize::Small, 10).width, 50);
        assert_eq!(modal_rect(area, ModalSize::Large, 10).width, 90);
        let tiny = Rect::new(0, 0, 20, 5);
        let rect = modal_rect(tiny, ModalSize::Small, 10);
        assert_eq!((rect.width, rect.height), (20, 5));
    }
}
