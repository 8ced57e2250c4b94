//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Request actions
    SendRequest,
    CancelRequest,
    CycleMethod,
    CycleContentType,
    ShowCurl,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum Panel {
    #[default]
    Url,
    Headers,
    Body,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Url => Panel::Headers,
            Panel::Headers => Panel::Body,
            Panel::Body => Panel::Response,
            Panel::Response => Panel::Url,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Url => Panel::Response,
            Panel::Headers => Panel::Url,
            Panel::Body => Panel::Headers,
            Panel::Response => Panel::Body,
        }
    }

    /// Whether the panel holds an editable text field
    pub fn is_editable(&self) -> bool {
        !matches!(self, Panel::Response)
    }

    /// Multi-line fields take Enter as a newline
    pub fn is_multiline(&self) -> bool {
        matches!(self, Panel::Headers | Panel::Body)
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('x') => return Some(UiEvent::CancelRequest),
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => return Some(UiEvent::SendRequest),
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('c') => Some(UiEvent::ShowCurl),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            KeyCode::Char('e') | KeyCode::Enter if active_panel.is_editable() => {
                Some(UiEvent::StartEditing)
            }
            KeyCode::Char('m') => Some(UiEvent::CycleMethod),
            KeyCode::Char('t') => Some(UiEvent::CycleContentType),
            KeyCode::Char('s') => Some(UiEvent::SendRequest),
            KeyCode::Up if active_panel == Panel::Response => Some(UiEvent::ScrollUp),
            KeyCode::Down if active_panel == Panel::Response => Some(UiEvent::ScrollDown),
            _ => None,
        },
        InputMode::Editing => match key.code {
            KeyCode::Esc => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            KeyCode::Enter if active_panel.is_multiline() => Some(UiEvent::CharInput('\n')),
            KeyCode::Enter => Some(UiEvent::SendRequest),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_enter_sends_from_url_but_breaks_lines_in_body() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Panel::Url, InputMode::Editing, false),
            Some(UiEvent::SendRequest)
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Enter), Panel::Body, InputMode::Editing, false),
            Some(UiEvent::CharInput('\n'))
        );
    }

    #[test]
    fn test_response_panel_is_not_editable() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('e')), Panel::Response, InputMode::Normal, false),
            None
        );
        assert_eq!(
            key_to_ui_event(press(KeyCode::Down), Panel::Response, InputMode::Normal, false),
            Some(UiEvent::ScrollDown)
        );
    }

    #[test]
    fn test_help_swallows_keys() {
        assert_eq!(
            key_to_ui_event(press(KeyCode::Char('s')), Panel::Url, InputMode::Normal, true),
            Some(UiEvent::CloseHelp)
        );
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            key_to_ui_event(ctrl_c, Panel::Url, InputMode::Normal, true),
            Some(UiEvent::Quit)
        );
    }
}
