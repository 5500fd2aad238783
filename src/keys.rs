use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Everything the viewer can be asked to do from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Toggle the n-th level (0-based) of the current map.
    ToggleLevel(usize),
    NextMap,
    PrevMap,
    FocusNext,
    FocusPrev,
    CloseFocused,
    FlipSplitSide,
}

pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char(c @ '1'..='9') => Some(Action::ToggleLevel(c as usize - '1' as usize)),
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(']') | KeyCode::Char('n') => Some(Action::NextMap),
        KeyCode::Char('[') | KeyCode::Char('p') => Some(Action::PrevMap),
        KeyCode::Tab => Some(Action::FocusNext),
        KeyCode::BackTab => Some(Action::FocusPrev),
        KeyCode::Char('x') | KeyCode::Delete => Some(Action::CloseFocused),
        KeyCode::Char('s') => Some(Action::FlipSplitSide),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_digits_toggle_levels() {
        assert_eq!(action_for(plain(KeyCode::Char('1'))), Some(Action::ToggleLevel(0)));
        assert_eq!(action_for(plain(KeyCode::Char('9'))), Some(Action::ToggleLevel(8)));
        assert_eq!(action_for(plain(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(action_for(plain(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(action_for(plain(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_ctrl_digit_ignored() {
        assert_eq!(
            action_for(KeyEvent::new(KeyCode::Char('1'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_release_ignored() {
        let mut key = plain(KeyCode::Char('x'));
        key.kind = KeyEventKind::Release;
        assert_eq!(action_for(key), None);
    }

    #[test]
    fn test_navigation() {
        assert_eq!(action_for(plain(KeyCode::Tab)), Some(Action::FocusNext));
        assert_eq!(action_for(plain(KeyCode::BackTab)), Some(Action::FocusPrev));
        assert_eq!(action_for(plain(KeyCode::Char(']'))), Some(Action::NextMap));
        assert_eq!(action_for(plain(KeyCode::Char('['))), Some(Action::PrevMap));
        assert_eq!(action_for(plain(KeyCode::Char('x'))), Some(Action::CloseFocused));
        assert_eq!(action_for(plain(KeyCode::Char('s'))), Some(Action::FlipSplitSide));
    }
}
