use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
};

use super::helpers::{centered_rect, error_line, hints_line, info_line, input_line, spinner};
use super::theme::{COLOR_ACCENT, COLOR_BORDER};
use crate::app::App;
use crate::view_state::{LoginField, LoginMode};

pub fn render_login_screen(frame: &mut Frame, area: Rect, app: &App) {
    let login = &app.login;
    let title = match login.mode {
        LoginMode::SignIn => " Iniciar sesión ",
        LoginMode::SignUp => " Crear cuenta ",
    };

    let mut lines = vec![Line::raw("")];
    for field in login.fields() {
        let (label, value, masked) = match field {
            LoginField::FullName => ("Nombre completo", login.full_name.as_str(), false),
            LoginField::Email => ("Correo", login.email.as_str(), false),
            LoginField::Password => ("Contraseña", login.password.as_str(), true),
        };
        lines.push(input_line(label, value, login.focus == *field, masked));
        lines.push(Line::raw(""));
    }

    if login.loading {
        lines.push(Line::raw(format!("{} Cargando...", spinner(app.tick_count))));
    } else if let Some(error) = &login.error {
        lines.push(error_line(error));
    } else if let Some(info) = &login.info {
        lines.push(info_line(info));
    } else {
        lines.push(Line::raw(""));
    }
    lines.push(Line::raw(""));

    let toggle = match login.mode {
        LoginMode::SignIn => "crear cuenta",
        LoginMode::SignUp => "ya tengo cuenta",
    };
    lines.push(hints_line(&[
        ("Enter", "continuar"),
        ("Tab", "campo"),
        ("^T", toggle),
        ("^R", "recuperar contraseña"),
        ("Esc", "volver"),
    ]));

    let height = lines.len() as u16 + 2;
    let dialog = centered_rect(area, 64, height);
    let block = Block::default()
        .title(title)
        .title_style(Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        dialog,
    );
}
