//! H-Req - assemble, validate and send one HTTP request
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events
//! - Network Layer (Tokio) - async HTTP execution
//!
//! `--send` and `--dry-run` skip the terminal UI entirely.

use std::io;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use hreq::app::{AppActor, AppState};
use hreq::cli::{self, Cli, Mode};
use hreq::constants::{APP_NAME, APP_VERSION, URL_PLACEHOLDER};
use hreq::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use hreq::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use hreq::network::{NetworkActor, RequestExecutor};
use hreq::ui::{self, cursor_line_col, highlight_json, method_color, status_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let settings = cli.settings();

    // Initialize logging to file
    let _log_guard = settings.init_logging()?;
    tracing::info!(version = APP_VERSION, mode = ?cli.mode(), "Starting app");

    let raw = cli.raw_fields();
    let code = match cli.mode() {
        Mode::DryRun => cli::dry_run(&raw, &mut io::stdout(), &mut io::stderr()),
        Mode::Send => {
            let executor = RequestExecutor::new(settings.timeout);
            cli::send_once(&raw, &executor, cli.include, &mut io::stdout(), &mut io::stderr()).await
        }
        Mode::Interactive => {
            run_interactive(AppState::new(raw), RequestExecutor::new(settings.timeout)).await?;
            cli::EXIT_OK
        }
    };

    tracing::info!(code, "App finished");
    Ok(ExitCode::from(code))
}

async fn run_interactive(state: AppState, executor: RequestExecutor) -> anyhow::Result<()> {
    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(executor, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(state, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }

        // Let the actors run between frames
        tokio::task::yield_now().await;
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Method + content type + URL
            Constraint::Length(1), // Field tabs
            Constraint::Length(8), // Headers / Body editor
            Constraint::Min(5),    // Response
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_url_bar(f, state, chunks[0]);
    draw_field_tabs(f, state, chunks[1]);
    draw_field_editor(f, state, chunks[2]);
    draw_response(f, state, chunks[3]);
    draw_status_bar(f, state, chunks[4]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn focus_style(state: &RenderState, panel: Panel) -> Style {
    if state.active_panel != panel {
        Style::default()
    } else if state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Url;
    let method = or_default(&state.form.method, "GET");
    let content_type = or_default(&state.form.content_type, "NONE");
    let loading = if state.is_loading { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Url))
        .title(Line::from(vec![
            Span::styled(format!(" {} ", method), Style::default().fg(method_color(method)).bold()),
            Span::raw(format!("| {}{} ", content_type, loading)),
        ]));

    let input = if state.form.url.is_empty() && !(is_focused && state.input_mode == InputMode::Editing) {
        Paragraph::new(URL_PLACEHOLDER).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.form.url.as_str())
    };
    f.render_widget(input.block(block), area);

    // Cursor
    if is_focused && state.input_mode == InputMode::Editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let (_, col) = cursor_line_col(&state.form.url, state.cursor_position);
        let cursor_x = (area.x + col + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_field_tabs(f: &mut Frame, state: &RenderState, area: Rect) {
    let selected = match state.active_panel {
        Panel::Body => 1,
        _ => 0,
    };
    f.render_widget(ui::render_tabs(&["Headers", "Body"], selected), area);
}

fn draw_field_editor(f: &mut Frame, state: &RenderState, area: Rect) {
    let (panel, text, title, placeholder) = if state.active_panel == Panel::Body {
        (
            Panel::Body,
            &state.form.body,
            " Body ",
            "{\n    \"example1\": \"value1\",\n    \"example2\": 123\n}",
        )
    } else {
        (
            Panel::Headers,
            &state.form.headers,
            " Headers (JSON object) ",
            "{\n    \"Content-Type\": \"application/json\",\n    \"Authorization\": \"Bearer 123\"\n}",
        )
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, panel))
        .title(title);

    let editing = state.active_panel == panel && state.input_mode == InputMode::Editing;
    let content = if text.is_empty() && !editing {
        Paragraph::new(placeholder).style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(text.as_str())
    };
    f.render_widget(content.block(block), area);

    if editing {
        let (line, col) = cursor_line_col(text, state.cursor_position);
        let max_x = area.x + area.width.saturating_sub(2);
        let max_y = area.y + area.height.saturating_sub(2);
        let cursor_x = (area.x + col + 1).min(max_x);
        let cursor_y = (area.y + line + 1).min(max_y);
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_response(f: &mut Frame, state: &RenderState, area: Rect) {
    let status_text = match state.response.status_code {
        Some(code) => {
            let color = status_color(code);
            Span::styled(format!(" {} ", code), Style::default().fg(color).bold())
        }
        None => Span::raw(" Response "),
    };

    let time_text = if state.response.time_ms > 0 {
        format!(" {}ms ", state.response.time_ms)
    } else {
        String::new()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(state, Panel::Response))
        .title(status_text)
        .title_bottom(Line::from(time_text).right_aligned());

    // Use syntax highlighting for JSON
    let lines = highlight_json(&state.response.body);
    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... Ctrl+X:cancel ".to_string()
    } else if state.input_mode == InputMode::Editing {
        " ESC:stop editing | arrows:move | Ctrl+S:send ".to_string()
    } else if !state.response.status_line.is_empty() {
        format!(" {} ", state.response.status_line)
    } else {
        " Tab:panel | e:edit | m:method | t:type | s:send | ?:help | q:quit ".to_string()
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 KEYBOARD SHORTCUTS

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Scroll response

 REQUEST
   m                  Cycle HTTP method
   t                  Cycle content type
   e / Enter          Edit current field
   s / Ctrl+S         Send request
   Ctrl+X             Cancel request
   c                  Show request as cURL

 EDITING
   Esc                Stop editing
   Enter              Send (URL) / new line (Headers, Body)

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} v{} ", APP_NAME, APP_VERSION))
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
