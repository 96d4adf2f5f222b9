use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Save,
    Quit,
    Select(i32),
    Edit,
    Add,
    Remove,
    ResetStatus,
    None,
}

pub const LIST_HELP: &str =
    "↑/↓ select • Enter edit • n add • d remove • Ctrl+S save • Ctrl+Q quit";
pub const READ_ONLY_HELP: &str = "↑/↓ select • Enter view • Ctrl+Q quit";

/// Map a key press in the item list to a command.
pub fn classify(key: &KeyEvent) -> KeyCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('s') | KeyCode::Char('S') => KeyCommand::Save,
            KeyCode::Char('q') | KeyCode::Char('Q') => KeyCommand::Quit,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyCommand::Quit,
            KeyCode::Char('n') | KeyCode::Char('N') => KeyCommand::Add,
            KeyCode::Char('d') | KeyCode::Char('D') => KeyCommand::Remove,
            _ => KeyCommand::None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => KeyCommand::Select(-1),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => KeyCommand::Select(1),
        KeyCode::PageUp => KeyCommand::Select(-10),
        KeyCode::PageDown => KeyCommand::Select(10),
        KeyCode::Enter | KeyCode::Char('e') => KeyCommand::Edit,
        KeyCode::Char('n') | KeyCode::Char('a') | KeyCode::Insert => KeyCommand::Add,
        KeyCode::Char('d') | KeyCode::Delete => KeyCommand::Remove,
        KeyCode::Char('q') => KeyCommand::Quit,
        KeyCode::Esc => KeyCommand::ResetStatus,
        _ => KeyCommand::None,
    }
}

/// Keys that abandon the item editor regardless of focus.
pub fn is_editor_abort(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(
            key.code,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('c') | KeyCode::Char('C')
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn control_chords_map_to_app_commands() {
        assert_eq!(
            classify(&key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            KeyCommand::Save
        );
        assert_eq!(
            classify(&key(KeyCode::Char('n'), KeyModifiers::CONTROL)),
            KeyCommand::Add
        );
        assert_eq!(
            classify(&key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            KeyCommand::None
        );
    }

    #[test]
    fn plain_keys_drive_the_list() {
        assert_eq!(classify(&key(KeyCode::Down, KeyModifiers::NONE)), KeyCommand::Select(1));
        assert_eq!(
            classify(&key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            KeyCommand::Select(-1)
        );
        assert_eq!(classify(&key(KeyCode::Enter, KeyModifiers::NONE)), KeyCommand::Edit);
        assert_eq!(classify(&key(KeyCode::Delete, KeyModifiers::NONE)), KeyCommand::Remove);
    }

    #[test]
    fn editor_abort_needs_control() {
        assert!(is_editor_abort(&key(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert!(!is_editor_abort(&key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }
}
