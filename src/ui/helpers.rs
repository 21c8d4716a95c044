//! Helper functions and constants for UI rendering
//!
//! Contains utility functions for truncation, centered dialogs and the
//! single-line text inputs shared by every form.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::UnicodeWidthStr;

use super::theme::{COLOR_ACCENT, COLOR_DIM, COLOR_ERROR, COLOR_SUCCESS};

/// Spinner frames for loading states
pub const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn spinner(tick: u64) -> &'static str {
    SPINNER_FRAMES[(tick / 6) as usize % SPINNER_FRAMES.len()]
}

/// Rect of `width` x `height` centered in `area`, clamped to it.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [rect] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    rect
}

/// Truncate to at most `max_width` display columns, adding "..." if cut.
pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    let target = max_width.saturating_sub(3);
    let mut out = String::new();
    for ch in s.chars() {
        if out.width() + unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0) > target {
            break;
        }
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// `label: value` input line; the focused one gets a cursor block.
pub fn input_line<'a>(label: &'a str, value: &'a str, focused: bool, masked: bool) -> Line<'a> {
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let label_style = if focused {
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_DIM)
    };
    let mut spans = vec![Span::styled(format!("{label}: "), label_style), Span::raw(shown)];
    if focused {
        spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT)));
    }
    Line::from(spans)
}

pub fn error_line(message: &str) -> Line<'_> {
    Line::styled(message, Style::default().fg(COLOR_ERROR))
}

pub fn info_line(message: &str) -> Line<'_> {
    Line::styled(message, Style::default().fg(COLOR_SUCCESS))
}

/// Dim keybind hint line: `[key] action  [key] action`.
pub fn hints_line(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(format!("[{key}]"), Style::default().fg(COLOR_ACCENT)));
        spans.push(Span::styled(format!(" {action}  "), Style::default().fg(COLOR_DIM)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("hola", 10), "hola");
        assert_eq!(truncate_string("publicación larga", 8), "publi...");
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 10);
        let rect = centered_rect(area, 40, 4);
        assert_eq!(rect.width, 20);
        assert_eq!(rect.height, 4);
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn test_input_line_masks_password() {
        let line = input_line("Contraseña", "abc", false, true);
        assert_eq!(line.spans[1].content, "•••");
    }
}
