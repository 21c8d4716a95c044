//! `/media`: post cards, the comments modal and the upload modal.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::helpers::{
    centered_rect, error_line, hints_line, input_line, spinner, truncate_string,
};
use super::theme::{
    COLOR_ACCENT, COLOR_ACTIVE, COLOR_BORDER, COLOR_DIALOG_BG, COLOR_DIM, COLOR_TAG,
};
use crate::app::{App, UploadField};
use crate::view_state::{messages, CommentsPanel, PostView, UploadForm};

const CARD_HEIGHT: u16 = 7;

pub fn render_feed(frame: &mut Frame, area: Rect, app: &App) {
    let feed = &app.feed;
    let [header, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);

    let mut header_lines = vec![hints_line(&[
        ("j/k", "mover"),
        ("n", "subir"),
        ("l", "like"),
        ("c", "comentarios"),
        ("t", "etiquetas"),
        ("s", "descargar"),
        ("d", "eliminar"),
        ("r", "recargar"),
    ])];
    if let Some(error) = &feed.error {
        header_lines.push(error_line(error));
    }
    frame.render_widget(Paragraph::new(header_lines), header);

    if feed.loading {
        frame.render_widget(
            Paragraph::new(format!("{} Cargando publicaciones...", spinner(app.tick_count)))
                .alignment(Alignment::Center),
            body,
        );
    } else if feed.posts.is_empty() {
        frame.render_widget(
            Paragraph::new(messages::NO_POSTS)
                .style(Style::default().fg(COLOR_DIM))
                .alignment(Alignment::Center),
            body,
        );
    } else {
        render_cards(frame, body, app);
    }

    if let Some(panel) = feed.selected_post().and_then(|p| p.comments.as_ref()) {
        render_comments_modal(frame, area, app, panel);
    }
    if let Some(form) = &feed.upload {
        render_upload_modal(frame, area, app, form);
    }
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App) {
    let feed = &app.feed;
    let per_page = (area.height / CARD_HEIGHT).max(1) as usize;
    let first = feed.selected.saturating_sub(per_page - 1);
    let user_id = app.identity.user_id();

    for (slot, (index, post)) in feed
        .posts
        .iter()
        .enumerate()
        .skip(first)
        .take(per_page)
        .enumerate()
    {
        let rect = Rect::new(
            area.x,
            area.y + slot as u16 * CARD_HEIGHT,
            area.width,
            CARD_HEIGHT.min(area.height.saturating_sub(slot as u16 * CARD_HEIGHT)),
        );
        render_card(frame, rect, post, index == feed.selected, post.can_delete(user_id));
    }
}

fn render_card(frame: &mut Frame, area: Rect, post: &PostView, selected: bool, owned: bool) {
    let width = area.width.saturating_sub(4) as usize;
    let border = if selected { COLOR_ACCENT } else { COLOR_BORDER };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border));

    let mut title = vec![
        Span::styled(
            format!("({}) ", post.author_initials()),
            Style::default().fg(COLOR_ACCENT),
        ),
        Span::styled(post.author(), Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(format!(" · {}", post.age()), Style::default().fg(COLOR_DIM)),
    ];
    if owned {
        title.push(Span::styled("  (tuya)", Style::default().fg(COLOR_DIM)));
    }

    let heart = if post.like.is_liked { "♥" } else { "♡" };
    let heart_style = if post.like.is_liked {
        Style::default().fg(COLOR_ACTIVE)
    } else {
        Style::default()
    };
    let mut stats = vec![
        Span::styled(format!("{heart} {}", post.like.count), heart_style),
        Span::raw(format!("   💬 {}", post.post.comment_count)),
    ];
    if !post.tags.is_empty() {
        stats.push(Span::styled(
            format!("   🏷 {}", post.tags.len()),
            Style::default().fg(COLOR_TAG),
        ));
    }

    let mut lines = vec![
        Line::from(title),
        Line::styled(
            truncate_string(&format!("🖼 {}", post.post.image_url), width),
            Style::default().fg(COLOR_DIM),
        ),
        Line::raw(truncate_string(&post.post.description, width)),
        Line::from(stats),
    ];
    if post.show_tags && !post.tags.is_empty() {
        let names: Vec<String> = post
            .tags
            .iter()
            .map(|t| format!("#{}", t.character_name))
            .collect();
        lines.push(Line::styled(
            truncate_string(&names.join(" "), width),
            Style::default().fg(COLOR_TAG),
        ));
    } else if let Some(error) = &post.error {
        lines.push(error_line(error));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn dialog_block(title: &str) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(COLOR_ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(COLOR_BORDER))
        .style(Style::default().bg(COLOR_DIALOG_BG))
}

fn render_comments_modal(frame: &mut Frame, area: Rect, app: &App, panel: &CommentsPanel) {
    let dialog = centered_rect(area, area.width.saturating_sub(8).min(80), area.height.saturating_sub(4));
    frame.render_widget(Clear, dialog);
    let block = dialog_block(" Comentarios ");
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let [list_area, input_area, hint_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .areas(inner);

    let user_id = app.identity.user_id();
    let width = inner.width.saturating_sub(2) as usize;
    let mut lines = Vec::new();
    if panel.loading {
        lines.push(Line::raw(format!("{} Cargando...", spinner(app.tick_count))));
    } else if panel.comments.is_empty() {
        lines.push(Line::styled(messages::NO_COMMENTS, Style::default().fg(COLOR_DIM)));
    }
    for (index, view) in panel.comments.iter().enumerate() {
        let marker = if index == panel.selected { "▶ " } else { "  " };
        let heart = if view.like.is_liked { "♥" } else { "♡" };
        let mut header = vec![
            Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
            Span::styled(view.author(), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!(" · {}", view.age()), Style::default().fg(COLOR_DIM)),
            Span::raw(format!("  {heart} {}", view.like.count)),
        ];
        if view.can_delete(user_id) {
            header.push(Span::styled("  ^D", Style::default().fg(COLOR_DIM)));
        }
        lines.push(Line::from(header));
        lines.push(Line::raw(format!(
            "  {}",
            truncate_string(&view.comment.content, width.saturating_sub(2))
        )));
        if let Some(error) = &view.error {
            lines.push(error_line(error));
        }
    }
    let scroll = (panel.selected as u16 * 2).saturating_sub(list_area.height / 2);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0)),
        list_area,
    );

    let mut input = vec![input_line("Comentario", &panel.draft, !panel.submitting, false)];
    if let Some(error) = &panel.error {
        input.push(error_line(error));
    }
    frame.render_widget(Paragraph::new(input), input_area);
    frame.render_widget(
        Paragraph::new(hints_line(&[
            ("Enter", "comentar"),
            ("↑/↓", "mover"),
            ("^L", "like"),
            ("^D", "eliminar"),
            ("Esc", "cerrar"),
        ])),
        hint_area,
    );
}

fn render_upload_modal(frame: &mut Frame, area: Rect, app: &App, form: &UploadForm) {
    let dialog = centered_rect(area, area.width.saturating_sub(8).min(80), 20);
    frame.render_widget(Clear, dialog);
    let block = dialog_block(" Subir fotos ");
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let focus = app.upload_field;
    let mut lines = vec![input_line(
        "Archivo",
        &form.path_input,
        focus == UploadField::Path,
        false,
    )];
    match &form.file {
        Some(file) => lines.push(Line::styled(
            format!("  ✓ {} ({} KB)", file.file_name, file.size() / 1024),
            Style::default().fg(COLOR_DIM),
        )),
        None => lines.push(Line::raw("")),
    }
    lines.push(input_line(
        "Descripción",
        &form.description,
        focus == UploadField::Description,
        false,
    ));
    lines.push(Line::raw(""));
    lines.push(input_line(
        "Buscar personaje",
        &form.search_term,
        focus == UploadField::Search,
        false,
    ));
    for (index, result) in form.search_results.iter().enumerate() {
        let marker = if index == app.upload_result { "▶ " } else { "  " };
        lines.push(Line::raw(format!(
            "{marker}{} ({})",
            result.name,
            result.subclass.label()
        )));
    }
    lines.push(input_line(
        "Etiqueta libre",
        &form.free_tag,
        focus == UploadField::FreeTag,
        false,
    ));
    lines.push(Line::raw(""));

    if !form.tags.is_empty() {
        let names: Vec<String> = form
            .tags
            .iter()
            .map(|t| format!("#{}", t.character_name))
            .collect();
        lines.push(Line::styled(names.join(" "), Style::default().fg(COLOR_TAG)));
    }
    if form.uploading {
        lines.push(Line::raw(format!("{} Subiendo...", spinner(app.tick_count))));
    } else if let Some(error) = &form.error {
        lines.push(error_line(error));
    }
    lines.push(hints_line(&[
        ("Tab", "campo"),
        ("Enter", "aceptar"),
        ("^X", "quitar etiqueta"),
        ("^S", "publicar"),
        ("Esc", "cerrar"),
    ]));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
