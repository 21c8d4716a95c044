//! `/profile`: the Info, Characters and Options tabs.

use std::time::Instant;

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap},
};

use super::helpers::{error_line, hints_line, info_line, input_line, spinner};
use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_SUCCESS};
use crate::app::{App, InfoMode};
use crate::identity::ProfileStatus;
use crate::models::Subclass;
use crate::view_state::{format, messages, ProfileInfoView, ProfileTab, PREFERENCES};

pub fn render_profile(frame: &mut Frame, area: Rect, app: &App) {
    let [tabs_area, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    let selected = ProfileTab::ALL
        .iter()
        .position(|t| *t == app.profile.tab)
        .unwrap_or(0);
    let tabs = Tabs::new(ProfileTab::ALL.iter().map(|t| t.label()))
        .select(selected)
        .highlight_style(Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD))
        .divider("|")
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(COLOR_BORDER)),
        );
    frame.render_widget(tabs, tabs_area);

    let body = body.inner(Margin::new(2, 1));
    match app.profile.tab {
        ProfileTab::Info => render_info(frame, body, app),
        ProfileTab::Chars => render_characters(frame, body, app),
        ProfileTab::Options => render_options(frame, body, app),
    }
}

fn render_info(frame: &mut Frame, area: Rect, app: &App) {
    let identity = &app.identity;
    let info = &app.profile.info;

    let avatar = match identity.avatar_url() {
        Some(url) => format!("◉ {url}"),
        None => format!("({})", ProfileInfoView::initials(identity)),
    };
    let mut lines = vec![
        Line::styled(avatar, Style::default().fg(COLOR_ACCENT)),
        Line::raw(""),
    ];

    match app.info_mode {
        InfoMode::EditingName => {
            lines.push(input_line("Nombre", &info.name_draft, !info.saving, false));
        }
        _ => lines.push(Line::from(vec![
            Span::styled("Nombre: ", Style::default().fg(COLOR_DIM)),
            Span::styled(
                ProfileInfoView::current_name(identity),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ])),
    }
    if let Some(user) = &identity.user {
        lines.push(Line::from(vec![
            Span::styled("Correo: ", Style::default().fg(COLOR_DIM)),
            Span::raw(user.email.clone().unwrap_or_default()),
        ]));
    }
    if let Some(profile) = &identity.profile {
        lines.push(Line::from(vec![
            Span::styled("Miembro desde: ", Style::default().fg(COLOR_DIM)),
            Span::raw(format::long_date(profile.created_at)),
        ]));
    }
    if app.info_mode == InfoMode::AvatarPath {
        lines.push(Line::raw(""));
        lines.push(input_line("Ruta de la imagen", &info.avatar_path, true, false));
    }
    lines.push(Line::raw(""));

    match &identity.profile_status {
        ProfileStatus::Missing => {
            lines.push(error_line("No se encontró tu perfil."));
            lines.push(hints_line(&[("p", "crear perfil")]));
        }
        ProfileStatus::Failed(message) => lines.push(error_line(message)),
        _ => {}
    }
    if info.saving || info.uploading_avatar {
        lines.push(Line::raw(format!("{} Guardando...", spinner(app.tick_count))));
    }
    if let Some(error) = &info.error {
        lines.push(error_line(error));
    }
    if let Some(toast) = info.visible_toast(Instant::now(), app.ctx.config.toast_duration) {
        lines.push(info_line(toast));
    }
    lines.push(Line::raw(""));
    lines.push(match app.info_mode {
        InfoMode::Viewing => hints_line(&[
            ("e", "editar nombre"),
            ("a", "cambiar avatar"),
            ("x", "eliminar avatar"),
            ("Tab", "pestaña"),
        ]),
        _ => hints_line(&[("Enter", "guardar"), ("Esc", "cancelar")]),
    });

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_characters(frame: &mut Frame, area: Rect, app: &App) {
    let view = &app.profile.characters;
    let mut lines = vec![
        Line::styled(view.counter(), Style::default().add_modifier(Modifier::BOLD)),
        Line::raw(""),
    ];

    if view.loading {
        lines.push(Line::raw(format!("{} Cargando...", spinner(app.tick_count))));
    } else if view.characters.is_empty() {
        lines.push(Line::styled(messages::NO_CHARACTERS, Style::default().fg(COLOR_DIM)));
    }
    for (index, character) in view.characters.iter().enumerate() {
        let selected = index == view.selected && view.form.is_none();
        let style = if selected {
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(if selected { "▶ " } else { "  " }, style),
            Span::styled(character.name.clone(), style),
            Span::styled(
                format!("  {}", character.subclass.label()),
                Style::default().fg(COLOR_DIM),
            ),
        ]));
    }
    lines.push(Line::raw(""));

    if let Some(form) = &view.form {
        lines.push(Line::styled(
            form.title(),
            Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD),
        ));
        lines.push(input_line("Nombre", &form.name, !form.submitting, false));
        let subclasses: Vec<Span> = Subclass::ALL
            .iter()
            .map(|s| {
                if form.subclass == Some(*s) {
                    Span::styled(format!("[{}] ", s.label()), Style::default().fg(COLOR_SUCCESS))
                } else {
                    Span::styled(format!(" {}  ", s.label()), Style::default().fg(COLOR_DIM))
                }
            })
            .collect();
        lines.push(Line::from(subclasses));
        if let Some(error) = &form.error {
            lines.push(error_line(error));
        }
        lines.push(hints_line(&[
            ("←/→", "subclase"),
            ("Enter", "guardar"),
            ("Esc", "cancelar"),
        ]));
    } else {
        if let Some(error) = &view.error {
            lines.push(error_line(error));
        }
        let mut hints = vec![("e", "editar"), ("d", "eliminar"), ("Tab", "pestaña")];
        if view.can_add() {
            hints.insert(0, ("n", "agregar"));
        }
        lines.push(hints_line(&hints));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_options(frame: &mut Frame, area: Rect, app: &App) {
    let options = &app.profile.options;
    let mut lines = vec![
        Line::styled("Preferencias", Style::default().add_modifier(Modifier::BOLD)),
    ];
    for preference in PREFERENCES {
        lines.push(Line::from(vec![
            Span::raw(format!("  {preference}  ")),
            Span::styled(messages::COMING_SOON, Style::default().fg(COLOR_DIM)),
        ]));
    }
    lines.push(Line::raw(""));

    let danger = Block::default()
        .title(" Zona de peligro ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Red));

    let mut danger_lines = Vec::new();
    if options.confirming {
        danger_lines.push(Line::raw(messages::CONFIRM_DELETE_ACCOUNT));
        danger_lines.push(input_line("Confirmación", &options.confirmation, !options.deleting, false));
        if options.deleting {
            danger_lines.push(Line::raw(format!("{} Eliminando...", spinner(app.tick_count))));
        }
        danger_lines.push(hints_line(&[("Enter", "eliminar cuenta"), ("Esc", "cancelar")]));
    } else {
        danger_lines.push(Line::raw("Eliminar tu cuenta borra tu perfil y tu avatar."));
        danger_lines.push(hints_line(&[("D", "eliminar cuenta"), ("Tab", "pestaña")]));
    }
    if let Some(error) = &options.error {
        danger_lines.push(error_line(error));
    }

    let preferences_height = lines.len() as u16;
    let [prefs_area, danger_area] = Layout::vertical([
        Constraint::Length(preferences_height),
        Constraint::Length(danger_lines.len() as u16 + 2),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(lines), prefs_area);
    frame.render_widget(
        Paragraph::new(danger_lines)
            .block(danger)
            .wrap(Wrap { trim: false }),
        danger_area,
    );
}
