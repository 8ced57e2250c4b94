//! App state - pure data structure with no I/O logic

use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{RenderState, ResponseView};
use crate::models::RawFields;

const QUICK_REFERENCE: &str = r#"Quick Reference:
────────────────────────────
  s     Send request
  m     Change method
  t     Change content type
  Tab   Next panel
  e     Edit field
  c     Show as cURL
  ?     Full help
  q     Quit
────────────────────────────
Headers are a JSON object, e.g. {"Authorization": "Bearer 123"}"#;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Request form, exactly what the user typed
    pub form: RawFields,
    pub cursor_position: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub response_scroll: u16,

    // Response
    pub response: ResponseView,
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(RawFields::default())
    }
}

impl AppState {
    /// Start with a pre-filled form, e.g. from command-line flags
    pub fn new(form: RawFields) -> Self {
        let cursor_position = form.url.len();
        AppState {
            form,
            cursor_position,
            active_panel: Panel::Url,
            input_mode: InputMode::Normal,
            response_scroll: 0,
            response: ResponseView {
                body: QUICK_REFERENCE.to_string(),
                ..Default::default()
            },
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            show_help: false,
        }
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Get the current input field content
    pub fn current_input(&self) -> &str {
        match self.active_panel {
            Panel::Url => &self.form.url,
            Panel::Headers => &self.form.headers,
            Panel::Body => &self.form.body,
            Panel::Response => "",
        }
    }

    /// Get mutable reference to current input field
    pub fn current_input_mut(&mut self) -> Option<&mut String> {
        match self.active_panel {
            Panel::Url => Some(&mut self.form.url),
            Panel::Headers => Some(&mut self.form.headers),
            Panel::Body => Some(&mut self.form.body),
            Panel::Response => None,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            form: self.form.clone(),
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            response: self.response.clone(),
            response_scroll: self.response_scroll,
            is_loading: self.is_loading,
            show_help: self.show_help,
        }
    }
}
