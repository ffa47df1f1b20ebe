pub mod board_view;
pub mod help;
pub mod status_bar;
pub mod theme;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{AppState, Mode};
use crate::board::controller::BoardController;
use theme::Theme;

/// Create a centered rect within `area` using percentage-based sizing with minimums.
pub fn centered_rect(area: Rect, w_pct: u16, h_pct: u16, min_w: u16, min_h: u16) -> Rect {
    let width = scale(area.width, w_pct).max(min_w).min(area.width);
    let height = scale(area.height, h_pct).max(min_h).min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

/// `len * pct / 100`, computed wide so large terminals cannot overflow.
fn scale(len: u16, pct: u16) -> u16 {
    let scaled = u32::from(len) * u32::from(pct) / 100;
    u16::try_from(scaled).unwrap_or(u16::MAX)
}

pub fn render(f: &mut Frame, controller: &BoardController, state: &AppState) {
    // The fetch error stays on screen until the next successful load
    let banner_height = u16::from(controller.error().is_some());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    if let Some(error) = controller.error() {
        let line = Line::from(vec![
            Span::styled(
                " ERROR ",
                Style::default()
                    .fg(Theme::STATUS_ERROR)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            ),
            Span::styled(format!(" {error}  (r to retry)"), Style::default().fg(Theme::STATUS_ERROR)),
        ]);
        f.render_widget(Paragraph::new(line), chunks[0]);
    }

    board_view::render_board(f, chunks[1], &controller.view(), state);
    status_bar::render_status_bar(f, chunks[2], state, controller);

    if let Mode::Help = state.mode {
        help::render_help(f, f.area());
    }
}
