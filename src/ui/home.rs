use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::helpers::centered_rect;
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM};
use crate::app::App;
use crate::view_state::messages::BRAND;

const WELCOME: &str = "La comunidad para compartir capturas, personajes y momentos de juego.";

pub fn render_home(frame: &mut Frame, area: Rect, app: &App) {
    let greeting = match app.identity.display_name() {
        Some(name) => format!("¡Hola, {name}!"),
        None => "Bienvenido".to_string(),
    };
    let lines = vec![
        Line::styled(
            BRAND,
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::raw(greeting),
        Line::raw(""),
        Line::raw(WELCOME),
        Line::raw(""),
        Line::styled(
            "[2] Ver el muro de media   [3] Tu perfil",
            Style::default().fg(COLOR_DIM),
        ),
    ];

    let dialog = centered_rect(area, 60, 11);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        dialog,
    );
}
