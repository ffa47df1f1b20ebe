use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, BorderType, Borders, Padding, Paragraph, Scrollbar, ScrollbarOrientation,
    ScrollbarState,
};
use ratatui::Frame;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use crate::app::{AppState, Mode};
use crate::board::filter::{BoardView, ColumnView};
use crate::board::BoardItem;

/// 2 inner lines + 2 border lines
const CARD_HEIGHT: u16 = 4;

/// How a card is drawn relative to the cursor and any held card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CardMark {
    Plain,
    Selected,
    /// The card currently picked up.
    Held,
    /// Where the held card would land.
    Target,
}

pub(crate) fn card_mark(item: &BoardItem, is_cursor: bool, mode: &Mode) -> CardMark {
    match mode {
        Mode::Drag { active } if *active == item.id => CardMark::Held,
        Mode::Drag { .. } if is_cursor => CardMark::Target,
        _ if is_cursor => CardMark::Selected,
        _ => CardMark::Plain,
    }
}

/// Truncate `text` to `max_width` display columns on grapheme boundaries,
/// ending in `…` when anything was cut.
pub(crate) fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let avail = max_width.saturating_sub(1);
    let truncated: String = text
        .graphemes(true)
        .scan(0, |w, g| {
            let gw = g.width();
            (*w + gw <= avail).then(|| {
                *w += gw;
                g
            })
        })
        .collect();
    format!("{truncated}…")
}

/// First character of each developer's name, uppercased.
pub(crate) fn initials(developers: &[String]) -> Vec<String> {
    developers
        .iter()
        .filter_map(|name| name.chars().next())
        .map(|c| c.to_uppercase().collect())
        .collect()
}

/// `(visible/total)` for a column header.
pub(crate) fn count_label(col: &ColumnView<'_>) -> String {
    format!("({}/{})", col.count(), col.total)
}

pub fn render_board(f: &mut Frame, area: Rect, view: &BoardView<'_>, state: &AppState) {
    let columns = view.columns();
    let constraints: Vec<Constraint> = columns
        .iter()
        .map(|_| Constraint::Ratio(1, columns.len() as u32))
        .collect();
    let col_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (idx, col) in columns.iter().enumerate() {
        render_column(f, col_areas[idx], col, state.focused_column == idx, state);
    }
}

fn render_column(f: &mut Frame, area: Rect, col: &ColumnView<'_>, is_focused: bool, state: &AppState) {
    let accent = Theme::column_color(col.name);
    let focused_mod = if is_focused { Modifier::BOLD } else { Modifier::empty() };

    let header_line = Line::from(vec![
        Span::styled(
            format!(" {} ", col.name),
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("{} ", count_label(col)), Theme::dim_style()),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent).add_modifier(focused_mod))
        .border_type(if is_focused { BorderType::Thick } else { BorderType::Rounded })
        .title(header_line)
        .padding(Padding::new(1, 1, 0, 0));

    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if col.items.is_empty() {
        let msg = if col.is_filtered() { "no matches" } else { "empty" };
        f.render_widget(
            Paragraph::new(Span::styled(msg, Theme::dim_style())),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );
        return;
    }

    let max_visible = (inner.height / CARD_HEIGHT).max(1) as usize;
    let cursor = if is_focused { Some(state.selected_card) } else { None };
    let scroll_offset = match cursor {
        Some(sel) if sel >= max_visible => sel - max_visible + 1,
        _ => 0,
    };

    for (idx, item) in col.items.iter().enumerate().skip(scroll_offset).take(max_visible) {
        let y = inner.y + ((idx - scroll_offset) as u16 * CARD_HEIGHT);
        if y + CARD_HEIGHT > inner.y + inner.height {
            break;
        }
        let card_area = Rect::new(inner.x, y, inner.width, CARD_HEIGHT);
        let mark = card_mark(item, cursor == Some(idx), &state.mode);
        render_card(f, card_area, item, mark, is_focused);
    }

    if col.items.len() > max_visible {
        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight);
        let mut scrollbar_state = ScrollbarState::new(col.items.len()).position(scroll_offset);
        f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
    }
}

fn render_card(f: &mut Frame, area: Rect, item: &BoardItem, mark: CardMark, is_col_focused: bool) {
    if area.width < 4 || area.height < 3 {
        return;
    }

    let (border_color, border_type, emphasis) = match mark {
        CardMark::Plain if is_col_focused => (Theme::CARD_BORDER, BorderType::Rounded, Modifier::empty()),
        CardMark::Plain => (Theme::DIM, BorderType::Rounded, Modifier::empty()),
        CardMark::Selected => (Theme::CARD_BORDER, BorderType::Thick, Modifier::BOLD),
        CardMark::Held => (Theme::DIM, BorderType::Double, Modifier::ITALIC),
        CardMark::Target => (Theme::DRAG_TARGET, BorderType::Thick, Modifier::BOLD),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color).add_modifier(emphasis))
        .border_type(border_type);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if inner.height == 0 || inner.width < 2 {
        return;
    }

    // Line 1: marker + title
    let marker = match mark {
        CardMark::Held => "≡ ",
        CardMark::Target => "▸ ",
        CardMark::Selected => "› ",
        CardMark::Plain => "  ",
    };
    let title_width = (inner.width as usize).saturating_sub(marker.width());
    let title_line = Line::from(vec![
        Span::styled(marker, Style::default().fg(border_color)),
        Span::styled(
            truncate(&item.title, title_width),
            Style::default().fg(Theme::CARD_TITLE).add_modifier(emphasis),
        ),
    ]);
    f.render_widget(
        Paragraph::new(title_line),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    // Line 2: type chip + developer initials
    if inner.height >= 2 {
        let mut spans = vec![Span::raw("  ")];
        if let Some(kind) = item.kind {
            spans.push(Span::styled(
                kind.as_str(),
                Style::default().fg(Theme::type_color(kind)),
            ));
        }
        for (name, initial) in item.developers.iter().zip(initials(&item.developers)) {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                initial,
                Style::default()
                    .fg(Color::Black)
                    .bg(Theme::developer_color(name))
                    .add_modifier(Modifier::BOLD),
            ));
        }
        f.render_widget(
            Paragraph::new(Line::from(spans)),
            Rect::new(inner.x, inner.y + 1, inner.width, 1),
        );
    }
}
