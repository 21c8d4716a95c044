//! UI rendering for the Mala Junta client
//!
//! Lays the screen out as:
//! - Navbar with brand, route links and the signed-in user
//! - The page the router resolved (`/`, `/media`, `/profile`, `/login`)
//! - A one-line status footer
//! - A confirm overlay while a destructive action waits for `y`/`n`
//!
//! Rendering only reads [`App`]; every state change happens in the key and
//! message handlers.

mod feed;
mod helpers;
mod home;
mod login;
mod navbar;
mod profile;
mod theme;

// Re-export theme colors for external use
pub use theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_HEADER};

pub use helpers::truncate_string;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use crate::app::App;
use crate::view_state::{messages, Resolution, Route};
use feed::render_feed;
use helpers::{centered_rect, hints_line, spinner};
use home::render_home;
use login::render_login_screen;
use navbar::render_navbar;
use profile::render_profile;
use theme::COLOR_DIALOG_BG;

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI for the resolved route
pub fn render(frame: &mut Frame, app: &App) {
    let [nav_area, body, footer] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    render_navbar(frame, nav_area, app);

    match app.resolution {
        Resolution::Show(Route::Home) => render_home(frame, body, app),
        Resolution::Show(Route::Media) => render_feed(frame, body, app),
        Resolution::Show(Route::Profile) => render_profile(frame, body, app),
        Resolution::Show(Route::Login) => render_login_screen(frame, body, app),
        Resolution::Loading => render_waiting(frame, body, app, messages::LOADING_PROFILE),
        Resolution::Redirect(_) => render_waiting(frame, body, app, messages::REDIRECTING),
    }

    render_footer(frame, footer, app);

    if let Some(confirm) = &app.confirm {
        render_confirm(frame, frame.area(), confirm.message);
    }
}

fn render_waiting(frame: &mut Frame, area: Rect, app: &App, message: &str) {
    let rect = centered_rect(area, 40, 1);
    frame.render_widget(
        Paragraph::new(format!("{} {}", spinner(app.tick_count), message))
            .alignment(Alignment::Center),
        rect,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        Some(status) => Line::styled(status.as_str(), Style::default().fg(COLOR_DIM)),
        None => hints_line(&[("1/2/3", "navegar"), ("q", "salir")]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_confirm(frame: &mut Frame, area: Rect, message: &str) {
    let dialog = centered_rect(area, 50, 6);
    frame.render_widget(Clear, dialog);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_ACCENT))
        .style(Style::default().bg(COLOR_DIALOG_BG));
    let lines = vec![
        Line::raw(message),
        Line::raw(""),
        hints_line(&[("y", "sí"), ("n", "no")]),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        dialog,
    );
}
