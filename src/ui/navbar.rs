//! Top bar: brand, route links and the signed-in user.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use super::theme::{COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIM, COLOR_HEADER};
use crate::app::App;
use crate::view_state::{NavbarView, Route};

pub fn render_navbar(frame: &mut Frame, area: Rect, app: &App) {
    let nav = NavbarView::build(&app.identity, app.router.current());

    let mut left = vec![Span::styled(
        format!(" {} ", nav.brand),
        Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
    )];
    for (index, (route, active)) in nav.links.iter().enumerate() {
        let style = if *active {
            Style::default().fg(COLOR_ACTIVE).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_HEADER)
        };
        left.push(Span::styled(format!(" [{}] ", index + 1), Style::default().fg(COLOR_DIM)));
        left.push(Span::styled(route.label(), style));
    }

    let right = match &nav.user {
        Some((name, initial)) => {
            let badge = if nav.has_avatar { "◉" } else { initial.as_str() };
            vec![
                Span::styled(format!("({badge}) "), Style::default().fg(COLOR_ACCENT)),
                Span::raw(name.clone()),
                Span::styled(
                    format!("  [3] {}  [o] Salir ", Route::Profile.label()),
                    Style::default().fg(COLOR_DIM),
                ),
            ]
        }
        None => vec![Span::styled(
            format!("[i] {} ", Route::Login.label()),
            Style::default().fg(COLOR_DIM),
        )],
    };

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(COLOR_BORDER));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(Line::from(left)), inner);
    frame.render_widget(
        Paragraph::new(Line::from(right)).alignment(Alignment::Right),
        inner,
    );
}
