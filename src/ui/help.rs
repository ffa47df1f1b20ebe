use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Wrap};
use ratatui::Frame;

use super::theme::Theme;
use crate::input::keymap::HELP_SECTIONS;

/// Help overlay lines, one section per keymap group.
pub(crate) fn help_lines() -> Vec<Line<'static>> {
    let key = Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD);
    let dim = Theme::dim_style();
    let heading = Style::default()
        .fg(Theme::FG)
        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for (section, bindings) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(*section, heading)));
        for binding in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", binding.key), key),
                Span::styled(binding.description, dim),
            ]));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled("Press Esc to close", key)));
    lines
}

pub fn render_help(f: &mut Frame, area: Rect) {
    let panel_area = super::centered_rect(area, 50, 70, 44, 20);

    f.render_widget(Clear, panel_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Theme::FG))
        .title(Span::styled(
            " Corkboard Help ",
            Style::default().fg(Theme::FG).add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::new(2, 2, 1, 1));

    let inner = block.inner(panel_area);
    f.render_widget(block, panel_area);

    if inner.height == 0 {
        return;
    }

    f.render_widget(Paragraph::new(help_lines()).wrap(Wrap { trim: false }), inner);
}
