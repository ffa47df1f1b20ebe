use ratatui::style::{Color, Style};

use crate::board::{ColumnName, ItemType};

/// Color theme for Corkboard.
///
/// Text and chrome use the terminal's default foreground. Each column carries
/// its own accent, and type chips and developer initials get color.
pub struct Theme;

impl Theme {
    pub const FG: Color = Color::Reset;
    pub const DIM: Color = Color::DarkGray;

    // Card
    pub const CARD_BORDER: Color = Color::Reset;
    pub const CARD_TITLE: Color = Color::Reset;
    pub const DRAG_TARGET: Color = Color::Yellow;

    // Type chips
    pub const BUG: Color = Color::Red;
    pub const FEATURE: Color = Color::Green;
    pub const OTHER: Color = Color::Blue;

    // Status bar
    pub const STATUS_ERROR: Color = Color::Red;

    pub fn dim_style() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn status_style() -> Style {
        Style::default().fg(Self::FG)
    }

    /// Accent for a column's header and border.
    pub fn column_color(name: ColumnName) -> Color {
        match name {
            ColumnName::ReadyToStart => Color::Rgb(0x1f, 0x4c, 0x4a),
            ColumnName::InProgress => Color::Rgb(0x50, 0x4e, 0x25),
            ColumnName::WaitingForReview => Color::Rgb(0xa6, 0x13, 0x35),
            ColumnName::Done => Color::Rgb(0x8b, 0x3e, 0x2c),
            ColumnName::Stuck => Color::Rgb(0x2e, 0x41, 0x22),
            ColumnName::PendingDeploy => Color::Rgb(0x2c, 0x22, 0x59),
        }
    }

    pub fn type_color(kind: ItemType) -> Color {
        match kind {
            ItemType::Bug => Self::BUG,
            ItemType::FeatureEnhancement => Self::FEATURE,
            ItemType::Other => Self::OTHER,
        }
    }

    /// Assign a consistent color to a developer based on their name.
    pub fn developer_color(name: &str) -> Color {
        let hash = name
            .bytes()
            .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
        const PALETTE: [Color; 8] = [
            Color::Cyan,
            Color::Green,
            Color::Magenta,
            Color::Blue,
            Color::LightCyan,
            Color::LightGreen,
            Color::LightMagenta,
            Color::LightBlue,
        ];
        PALETTE[(hash % PALETTE.len() as u32) as usize]
    }
}
