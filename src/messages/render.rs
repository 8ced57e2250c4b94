//! Render state - data structure sent from App layer to UI for rendering

use crate::messages::ui_events::{InputMode, Panel};
use crate::models::RawFields;

/// What the response panel currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseView {
    /// Status code of the last response, `None` for errors and notices
    pub status_code: Option<u16>,
    pub body: String,
    pub time_ms: u64,
    /// Summary line for the status bar
    pub status_line: String,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Request form
    pub form: RawFields,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,

    // Response
    pub response: ResponseView,
    pub response_scroll: u16,
    pub is_loading: bool,

    // Popups
    pub show_help: bool,
}
