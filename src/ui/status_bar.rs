use chrono::{DateTime, Local, Utc};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::{AppState, Mode, NotificationLevel};
use crate::board::controller::BoardController;

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState, controller: &BoardController) {
    // Search takes over the entire bar
    if let Mode::Search { buf } = &state.mode {
        let paragraph = Paragraph::new(search_line(&buf.input)).style(Theme::status_style());
        f.render_widget(paragraph, area);
        return;
    }

    let left = build_left_zone(state, controller.query());
    let right = build_right_zone(state, controller);

    let left_width: usize = left.iter().map(|s| s.content.width()).sum();
    let right_width: usize = right.iter().map(|s| s.content.width()).sum();
    let center_avail = (area.width as usize).saturating_sub(left_width + right_width);
    let center = build_center_zone(state, center_avail);

    let mut spans = left;
    spans.extend(center);
    spans.extend(right);

    let paragraph = Paragraph::new(Line::from(spans)).style(Theme::status_style());
    f.render_widget(paragraph, area);
}

fn search_line(input: &str) -> Line<'_> {
    Line::from(vec![
        Span::styled(
            " / ",
            Style::default()
                .fg(Theme::FG)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(format!(" {input}")),
        Span::raw("_"),
    ])
}

pub(crate) fn mode_label(mode: &Mode) -> &'static str {
    match mode {
        Mode::Normal => "NORMAL",
        Mode::Drag { .. } => "MOVE",
        Mode::Search { .. } => "SEARCH",
        Mode::Help => "HELP",
    }
}

/// Mode badge + active query.
fn build_left_zone<'a>(state: &AppState, query: &'a str) -> Vec<Span<'a>> {
    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode_label(&state.mode)),
            Style::default()
                .fg(Theme::FG)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        ),
        Span::raw(" "),
    ];
    if !query.is_empty() {
        spans.push(Span::styled(format!("/{query} "), Style::default().fg(Theme::FG)));
    }
    spans
}

/// `"loaded 14:03"`, in local time.
pub(crate) fn loaded_label(loaded_at: Option<DateTime<Utc>>, loading: bool) -> String {
    if loading {
        return "loading…".to_string();
    }
    match loaded_at {
        Some(at) => format!("loaded {}", at.with_timezone(&Local).format("%H:%M")),
        None => "not loaded".to_string(),
    }
}

/// Column name + position within the visible cards + load time.
fn build_right_zone(state: &AppState, controller: &BoardController) -> Vec<Span<'static>> {
    let mut spans = Vec::new();

    let view = controller.view();
    if let Some(col) = view.columns().get(state.focused_column) {
        let visible = col.count();
        let pos = if visible > 0 {
            format!(" {}/{}", state.selected_card + 1, visible)
        } else {
            " 0".to_string()
        };
        spans.push(Span::styled(col.name.to_string(), Style::default().fg(Theme::DIM)));
        spans.push(Span::styled(pos, Style::default().fg(Theme::FG)));
    }

    spans.push(Span::styled(
        format!("  {} ", loaded_label(controller.loaded_at(), state.loading)),
        Theme::dim_style(),
    ));
    spans
}

/// Notification text centered in the available width.
fn build_center_zone(state: &AppState, avail_width: usize) -> Vec<Span<'_>> {
    let Some(notif) = state.notification.as_deref() else {
        return vec![Span::raw(" ".repeat(avail_width))];
    };
    let color = match state.notification_level {
        NotificationLevel::Info => Theme::FG,
        NotificationLevel::Error => Theme::STATUS_ERROR,
    };

    let notif_width = notif.width();
    if notif_width >= avail_width {
        let truncated: String = notif.chars().take(avail_width).collect();
        return vec![Span::styled(truncated, Style::default().fg(color))];
    }

    let pad_total = avail_width - notif_width;
    let pad_left = pad_total / 2;
    vec![
        Span::raw(" ".repeat(pad_left)),
        Span::styled(notif, Style::default().fg(color)),
        Span::raw(" ".repeat(pad_total - pad_left)),
    ]
}
