use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action::Action;
use crate::app::Mode;

/// Map a key event to a semantic action based on current mode.
pub fn map_key(key: KeyEvent, mode: &Mode) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match mode {
        Mode::Normal => map_normal(key),
        Mode::Drag { .. } => map_drag(key),
        Mode::Search { .. } => map_input(key),
        Mode::Help => match key.code {
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::Quit,
            _ => Action::None,
        },
    }
}

fn map_normal(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('h') | KeyCode::Left => Action::FocusPrevColumn,
        KeyCode::Char('l') | KeyCode::Right => Action::FocusNextColumn,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNextCard,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevCard,
        KeyCode::Char('g') | KeyCode::Home => Action::JumpToFirstCard,
        KeyCode::Char('G') | KeyCode::End => Action::JumpToLastCard,
        KeyCode::Char(' ') => Action::PickUpCard,
        KeyCode::Char('/') => Action::StartSearch,
        KeyCode::Char('r') => Action::ReloadBoard,
        KeyCode::Char('?') => Action::ShowHelp,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Esc => Action::ClearSearch,
        _ => Action::None,
    }
}

/// While a card is held, vertical keys move the drop target within the column.
fn map_drag(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNextCard,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevCard,
        KeyCode::Char('g') | KeyCode::Home => Action::JumpToFirstCard,
        KeyCode::Char('G') | KeyCode::End => Action::JumpToLastCard,
        KeyCode::Enter | KeyCode::Char(' ') => Action::DropCard,
        KeyCode::Esc | KeyCode::Char('q') => Action::CancelDrag,
        _ => Action::None,
    }
}

fn map_input(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Enter => Action::InputConfirm,
        KeyCode::Esc => Action::InputCancel,
        KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputHome,
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::InputEnd,
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Action::InputDeleteWord
        }
        KeyCode::Char(c) => Action::InputChar(c),
        KeyCode::Backspace => Action::InputBackspace,
        KeyCode::Left => Action::InputLeft,
        KeyCode::Right => Action::InputRight,
        KeyCode::Home => Action::InputHome,
        KeyCode::End => Action::InputEnd,
        _ => Action::None,
    }
}

/// A key binding for display in the help overlay.
pub struct KeyBinding {
    pub key: &'static str,
    pub description: &'static str,
}

const fn bind(key: &'static str, description: &'static str) -> KeyBinding {
    KeyBinding { key, description }
}

/// Bindings shown in the help overlay, grouped by section.
pub const HELP_SECTIONS: &[(&str, &[KeyBinding])] = &[
    (
        "Board",
        &[
            bind("h / l", "Switch columns"),
            bind("j / k", "Move between cards"),
            bind("g / G", "First / last card"),
            bind("r", "Reload from feed"),
            bind("?", "This help"),
            bind("q", "Quit"),
        ],
    ),
    (
        "Reorder",
        &[
            bind("Space", "Pick up card"),
            bind("j / k", "Choose drop position"),
            bind("Enter", "Drop"),
            bind("Esc", "Put back"),
        ],
    ),
    (
        "Search",
        &[
            bind("/", "Search titles"),
            bind("Enter", "Keep query"),
            bind("Esc", "Clear query"),
        ],
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::TextBuffer;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn drag_mode() -> Mode {
        Mode::Drag {
            active: "A-0".into(),
        }
    }

    fn search_mode() -> Mode {
        Mode::Search {
            buf: TextBuffer::new(String::new()),
        }
    }

    #[test]
    fn normal_space_picks_up() {
        assert_eq!(map_key(key(KeyCode::Char(' ')), &Mode::Normal), Action::PickUpCard);
    }

    #[test]
    fn normal_slash_starts_search() {
        assert_eq!(map_key(key(KeyCode::Char('/')), &Mode::Normal), Action::StartSearch);
    }

    #[test]
    fn normal_esc_clears_search() {
        assert_eq!(map_key(key(KeyCode::Esc), &Mode::Normal), Action::ClearSearch);
    }

    #[test]
    fn normal_r_reloads() {
        assert_eq!(map_key(key(KeyCode::Char('r')), &Mode::Normal), Action::ReloadBoard);
    }

    #[test]
    fn drag_enter_drops_and_esc_cancels() {
        assert_eq!(map_key(key(KeyCode::Enter), &drag_mode()), Action::DropCard);
        assert_eq!(map_key(key(KeyCode::Char(' ')), &drag_mode()), Action::DropCard);
        assert_eq!(map_key(key(KeyCode::Esc), &drag_mode()), Action::CancelDrag);
    }

    #[test]
    fn drag_vertical_keys_move_target() {
        assert_eq!(map_key(key(KeyCode::Char('j')), &drag_mode()), Action::SelectNextCard);
        assert_eq!(map_key(key(KeyCode::Up), &drag_mode()), Action::SelectPrevCard);
    }

    #[test]
    fn drag_ignores_column_keys() {
        assert_eq!(map_key(key(KeyCode::Char('h')), &drag_mode()), Action::None);
        assert_eq!(map_key(key(KeyCode::Char('l')), &drag_mode()), Action::None);
    }

    #[test]
    fn search_mode_types_letters() {
        // 'q' is text while searching, not quit
        assert_eq!(map_key(key(KeyCode::Char('q')), &search_mode()), Action::InputChar('q'));
        assert_eq!(map_key(key(KeyCode::Backspace), &search_mode()), Action::InputBackspace);
        assert_eq!(map_key(key(KeyCode::Esc), &search_mode()), Action::InputCancel);
        assert_eq!(map_key(key(KeyCode::Enter), &search_mode()), Action::InputConfirm);
    }

    #[test]
    fn ctrl_w_deletes_word_in_search() {
        let ev = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ev, &search_mode()), Action::InputDeleteWord);
    }

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let ev = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(ev, &Mode::Normal), Action::Quit);
        assert_eq!(map_key(ev, &search_mode()), Action::Quit);
        assert_eq!(map_key(ev, &drag_mode()), Action::Quit);
    }

    #[test]
    fn help_closes_on_esc() {
        assert_eq!(map_key(key(KeyCode::Esc), &Mode::Help), Action::Quit);
        assert_eq!(map_key(key(KeyCode::Char('x')), &Mode::Help), Action::None);
    }
}
