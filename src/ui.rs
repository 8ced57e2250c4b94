use ratatui::{prelude::*, widgets::*};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Line and column of a byte offset, for placing the cursor in multi-line fields
pub fn cursor_line_col(text: &str, cursor: usize) -> (u16, u16) {
    let cursor = cursor.min(text.len());
    let before = text.get(..cursor).unwrap_or(text);
    let line = before.matches('\n').count();
    let col = before.rsplit('\n').next().map_or(0, |l| l.chars().count());
    (line as u16, col as u16)
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let chars = line.chars();
        let mut current = String::new();
        let mut in_string = false;
        let mut is_key = false;

        for c in chars {
            match c {
                '"' => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }

                    if in_string {
                        // End of string
                        current.push(c);
                        let color = if is_key { Color::Cyan } else { Color::Green };
                        spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                        current.clear();
                        in_string = false;
                        is_key = false;
                    } else {
                        // Start of string
                        in_string = true;
                        current.push(c);
                        // Check if this is a key (followed by :)
                        is_key = line[line.find('"').unwrap_or(0)..].contains("\":");
                    }
                }
                ':' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    spans.push(Span::styled(":", Style::default().fg(Color::White)));
                }
                '{' | '}' | '[' | ']' if !in_string => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    spans.push(Span::styled(
                        c.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                '0'..='9' | '-' | '.' if !in_string => {
                    if !current.is_empty()
                        && !current
                            .chars()
                            .all(|x| x.is_ascii_digit() || x == '-' || x == '.')
                    {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    current.push(c);
                }
                't' | 'r' | 'u' | 'e' | 'f' | 'a' | 'l' | 's' | 'n' if !in_string => {
                    current.push(c);
                    // Check for true, false, null
                    if current == "true" || current == "false" || current == "null" {
                        spans.push(Span::styled(
                            current.clone(),
                            Style::default().fg(Color::Magenta),
                        ));
                        current.clear();
                    }
                }
                _ => {
                    current.push(c);
                }
            }
        }

        if !current.is_empty() {
            // Color numbers
            if current
                .chars()
                .all(|c| c.is_ascii_digit() || c == '-' || c == '.')
            {
                spans.push(Span::styled(current, Style::default().fg(Color::Yellow)));
            } else {
                spans.push(Span::raw(current));
            }
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: &str) -> Color {
    match method.trim().to_ascii_uppercase().as_str() {
        "" | "GET" => Color::Green,
        "POST" => Color::Yellow,
        "PUT" => Color::Blue,
        "PATCH" => Color::Cyan,
        "DELETE" => Color::Red,
        "OPTIONS" | "HEAD" => Color::Magenta,
        _ => Color::White,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_line_col() {
        let text = "{\n  \"a\": 1\n}";
        assert_eq!(cursor_line_col(text, 0), (0, 0));
        assert_eq!(cursor_line_col(text, 1), (0, 1));
        assert_eq!(cursor_line_col(text, 2), (1, 0));
        assert_eq!(cursor_line_col(text, 5), (1, 3));
        assert_eq!(cursor_line_col(text, 999), (2, 1));
    }

    #[test]
    fn test_highlight_json_keeps_one_line_per_input_line() {
        let lines = highlight_json("{\n  \"ok\": true\n}");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_colors() {
        assert_eq!(status_color(204), Color::Green);
        assert_eq!(status_color(404), Color::Red);
        assert_eq!(method_color("post"), Color::Yellow);
        assert_eq!(method_color(""), Color::Green);
        assert_eq!(method_color("bogus"), Color::White);
    }
}
