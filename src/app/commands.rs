//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::curl;
use crate::error::ValidationFailed;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, ResponseView};
use crate::models::{ContentType, HttpMethod, ResponseSummary};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        if self.active_panel.is_editable() {
            self.input_mode = InputMode::Editing;
            self.cursor_position = self.current_input().len();
        }
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = self.current_input();
        if self.cursor_position > 0 {
            let new_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_position = new_pos;
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = self.current_input();
        if self.cursor_position < input.len() {
            let new_pos = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
            self.cursor_position = new_pos;
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            if cursor_pos <= input.len() {
                input.insert(cursor_pos, c);
                self.cursor_position = cursor_pos + c.len_utf8();
            }
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let cursor_pos = self.cursor_position;
        if let Some(input) = self.current_input_mut() {
            let prev_pos = input[..cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Selectors
    // ========================

    /// Advance the method. A value the selector does not know restarts at GET.
    pub fn cycle_method(&mut self) {
        if self.is_loading {
            return;
        }
        let method = match self.form.method.trim() {
            "" => HttpMethod::GET.next(),
            name => HttpMethod::from_name(name)
                .map(|m| m.next())
                .unwrap_or_default(),
        };
        self.form.method = method.as_str().to_string();
    }

    /// Advance the content type. A value the selector does not know restarts at NONE.
    pub fn cycle_content_type(&mut self) {
        if self.is_loading {
            return;
        }
        let content_type = match self.form.content_type.trim() {
            "" => ContentType::None.next(),
            name => ContentType::from_name(name)
                .map(|ct| ct.next())
                .unwrap_or_default(),
        };
        self.form.content_type = content_type.name().to_string();
    }

    // ========================
    // Response scrolling
    // ========================

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Request lifecycle
    // ========================

    fn show_validation(&mut self, err: ValidationFailed) {
        tracing::info!(problems = err.causes.len(), "Request rejected by validation");
        let body = err
            .causes
            .iter()
            .map(|cause| format!("[{}] {}", cause.field(), cause))
            .collect::<Vec<_>>()
            .join("\n\n");
        self.response = ResponseView {
            status_code: None,
            body,
            time_ms: 0,
            status_line: format!("Validation failed: {}", summary_of(&err)),
        };
        self.response_scroll = 0;
    }

    /// Validate the form and, if it is sound, produce the command to send it
    pub fn prepare_request(&mut self) -> Option<NetworkCommand> {
        if self.is_loading {
            self.response.status_line =
                String::from("A request is already in flight (Ctrl+X to cancel)");
            return None;
        }

        let spec = match self.form.build() {
            Ok(spec) => spec,
            Err(err) => {
                self.show_validation(err);
                return None;
            }
        };

        self.is_loading = true;
        self.response = ResponseView {
            status_code: None,
            body: format!("Sending {} {} ...", spec.method(), spec.url()),
            time_ms: 0,
            status_line: String::new(),
        };
        self.response_scroll = 0;

        let id = self.next_id();
        self.pending_request_id = Some(id);

        Some(NetworkCommand::ExecuteRequest { id, spec })
    }

    /// Cancel the current pending request
    pub fn cancel_request(&mut self) -> Option<NetworkCommand> {
        let id = self.pending_request_id.take()?;
        self.is_loading = false;
        self.response = ResponseView {
            body: String::from("Request cancelled"),
            status_line: String::from("Request cancelled"),
            ..Default::default()
        };
        Some(NetworkCommand::CancelRequest(id))
    }

    /// Show the request the form would send, without sending it
    pub fn show_curl(&mut self) {
        match self.form.build() {
            Ok(spec) => {
                self.response = ResponseView {
                    status_code: None,
                    body: curl::to_curl(&spec),
                    time_ms: 0,
                    status_line: String::from("Request preview (not sent)"),
                };
                self.response_scroll = 0;
            }
            Err(err) => self.show_validation(err),
        }
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        // Anything not for the pending request is stale (cancelled or superseded)
        if self.pending_request_id != Some(response.id()) {
            tracing::debug!(id = response.id(), "Dropping stale response");
            return;
        }

        match response {
            NetworkResponse::Completed { summary, .. } => {
                self.response = ResponseView {
                    status_code: Some(summary.status_code),
                    body: format_summary(&summary),
                    time_ms: summary.elapsed.as_millis() as u64,
                    status_line: summary.status_line(),
                };
            }
            NetworkResponse::Failed { error, .. } => {
                self.response = ResponseView {
                    status_code: None,
                    body: error.to_string(),
                    time_ms: 0,
                    status_line: format!("Request failed: {}", error),
                };
            }
        }

        self.response_scroll = 0;
        self.is_loading = false;
        self.pending_request_id = None;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

fn summary_of(err: &ValidationFailed) -> String {
    err.causes
        .iter()
        .map(|cause| cause.field())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Headers, a blank line, then the body. JSON bodies are indented for display.
fn format_summary(summary: &ResponseSummary) -> String {
    let mut text = String::new();
    for (name, value) in summary.headers.iter() {
        text.push_str(&format!("{}: {}\n", name, value));
    }
    text.push('\n');

    let body = if summary.is_json() {
        serde_json::from_str::<serde_json::Value>(&summary.body)
            .ok()
            .and_then(|json| serde_json::to_string_pretty(&json).ok())
            .unwrap_or_else(|| summary.body.clone())
    } else {
        summary.body.clone()
    };
    text.push_str(&body);
    text
}
