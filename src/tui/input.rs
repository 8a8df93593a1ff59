use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// 会话识别的按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// 可打印 ASCII 字符
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    /// Ctrl-C / Ctrl-Q / Ctrl-X
    Quit,
}

impl Key {
    /// 把 crossterm 解码出的按键映射为会话按键。
    ///
    /// 会话不认识的转义序列（F 键、Insert、Alt+字符等）退化为 `Escape`；
    /// 认识但不处理的按键（左右方向键等）返回 `None`。
    pub fn from_event(event: KeyEvent) -> Option<Key> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let alt = event.modifiers.contains(KeyModifiers::ALT);

        match event.code {
            KeyCode::Char(c) if ctrl => match c.to_ascii_lowercase() {
                'c' | 'q' | 'x' => Some(Key::Quit),
                // 部分终端用 ^H 表示退格
                'h' => Some(Key::Backspace),
                _ => None,
            },
            KeyCode::Char(_) if alt => Some(Key::Escape),
            KeyCode::Char(c) if is_printable(c) => Some(Key::Char(c)),
            KeyCode::Char(_) => None,
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Delete => Some(Key::Delete),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::PageUp => Some(Key::PageUp),
            KeyCode::PageDown => Some(Key::PageDown),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            KeyCode::F(_) | KeyCode::Insert | KeyCode::BackTab => Some(Key::Escape),
            _ => None,
        }
    }
}

/// 0x20..=0x7E
pub fn is_printable(c: char) -> bool {
    matches!(c, ' '..='~')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn printable_ascii_is_text() {
        assert_eq!(Key::from_event(key(KeyCode::Char('v'))), Some(Key::Char('v')));
        assert_eq!(Key::from_event(key(KeyCode::Char(' '))), Some(Key::Char(' ')));
        assert_eq!(Key::from_event(key(KeyCode::Char('~'))), Some(Key::Char('~')));
        assert_eq!(
            Key::from_event(KeyEvent::new(KeyCode::Char('V'), KeyModifiers::SHIFT)),
            Some(Key::Char('V'))
        );
    }

    #[test]
    fn non_ascii_is_ignored() {
        assert_eq!(Key::from_event(key(KeyCode::Char('é'))), None);
        assert_eq!(Key::from_event(key(KeyCode::Char('包'))), None);
    }

    #[test]
    fn quit_chords() {
        for c in ['c', 'q', 'x'] {
            assert_eq!(Key::from_event(ctrl(c)), Some(Key::Quit));
        }
        assert_eq!(Key::from_event(ctrl('a')), None);
        assert_eq!(Key::from_event(ctrl('h')), Some(Key::Backspace));
    }

    #[test]
    fn navigation_keys() {
        assert_eq!(Key::from_event(key(KeyCode::Up)), Some(Key::Up));
        assert_eq!(Key::from_event(key(KeyCode::Down)), Some(Key::Down));
        assert_eq!(Key::from_event(key(KeyCode::PageUp)), Some(Key::PageUp));
        assert_eq!(Key::from_event(key(KeyCode::PageDown)), Some(Key::PageDown));
        assert_eq!(Key::from_event(key(KeyCode::Home)), Some(Key::Home));
        assert_eq!(Key::from_event(key(KeyCode::End)), Some(Key::End));
        assert_eq!(Key::from_event(key(KeyCode::Delete)), Some(Key::Delete));
        assert_eq!(Key::from_event(key(KeyCode::Left)), None);
    }

    #[test]
    fn unknown_sequences_degrade_to_escape() {
        assert_eq!(Key::from_event(key(KeyCode::F(1))), Some(Key::Escape));
        assert_eq!(Key::from_event(key(KeyCode::Insert)), Some(Key::Escape));
        assert_eq!(
            Key::from_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            Some(Key::Escape)
        );
    }

    #[test]
    fn release_events_are_dropped() {
        let mut ev = key(KeyCode::Char('a'));
        ev.kind = KeyEventKind::Release;
        assert_eq!(Key::from_event(ev), None);
    }
}
