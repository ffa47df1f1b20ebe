pub mod classify;
pub mod controller;
pub mod filter;
pub mod normalize;
pub mod reorder;
pub mod source;

use serde::{Deserialize, Serialize};

/// One of the six fixed status columns. The set is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnName {
    #[default]
    ReadyToStart,
    InProgress,
    WaitingForReview,
    Done,
    Stuck,
    PendingDeploy,
}

impl ColumnName {
    /// All columns in display order.
    pub const ALL: [ColumnName; 6] = [
        Self::ReadyToStart,
        Self::InProgress,
        Self::WaitingForReview,
        Self::Done,
        Self::Stuck,
        Self::PendingDeploy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadyToStart => "Ready to start",
            Self::InProgress => "In Progress",
            Self::WaitingForReview => "Waiting for review",
            Self::Done => "Done",
            Self::Stuck => "Stuck",
            Self::PendingDeploy => "Pending Deploy",
        }
    }

    /// Position of this column in [`ColumnName::ALL`].
    pub fn index(self) -> usize {
        match self {
            Self::ReadyToStart => 0,
            Self::InProgress => 1,
            Self::WaitingForReview => 2,
            Self::Done => 3,
            Self::Stuck => 4,
            Self::PendingDeploy => 5,
        }
    }

    /// Exact match against the canonical labels. `None` for anything else.
    pub fn from_status(status: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == status)
    }
}

impl std::str::FromStr for ColumnName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_status(s).ok_or_else(|| format!("unknown column '{s}'"))
    }
}

impl std::fmt::Display for ColumnName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind chip shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemType {
    Bug,
    FeatureEnhancement,
    Other,
}

impl ItemType {
    /// Map the wire label onto a chip. Unknown labels render no chip.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Bug" => Some(Self::Bug),
            "Feature Enhancement" | "Feature Enhancements" => Some(Self::FeatureEnhancement),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::FeatureEnhancement => "Feature Enhancement",
            Self::Other => "Other",
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A record exactly as the remote feed delivers it.
///
/// Every field is optional on the wire; absent fields take their default so a
/// sparse record never fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub status: Option<String>,
    /// Comma-separated developer names.
    #[serde(default)]
    pub developer: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

/// A single card on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardItem {
    /// `"{title}-{index}"`, unique within one load.
    pub id: String,
    pub title: String,
    /// Always one of the six column labels. Missing or unrecognized feed
    /// statuses become the default column's label.
    pub status: String,
    pub kind: Option<ItemType>,
    pub developers: Vec<String>,
}

impl BoardItem {
    /// The column this item belongs in. Unrecognized statuses fall back to
    /// the default column.
    pub fn column(&self) -> ColumnName {
        ColumnName::from_status(&self.status).unwrap_or_default()
    }
}

/// A named, ordered run of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: ColumnName,
    pub items: Vec<BoardItem>,
}

impl Column {
    pub fn new(name: ColumnName) -> Self {
        Self {
            name,
            items: Vec::new(),
        }
    }

    /// Index of the item with `id`, if present.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }
}

/// Canonical board: always exactly one column per [`ColumnName`], in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardState {
    columns: [Column; 6],
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoardState {
    /// Six empty columns.
    pub fn empty() -> Self {
        Self {
            columns: ColumnName::ALL.map(Column::new),
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[cfg(test)]
    pub fn column(&self, name: ColumnName) -> &Column {
        &self.columns[name.index()]
    }

    pub(crate) fn column_mut(&mut self, name: ColumnName) -> &mut Column {
        &mut self.columns[name.index()]
    }

    /// Find which column an item is in and its index.
    pub fn find_item(&self, id: &str) -> Option<(ColumnName, usize)> {
        self.columns
            .iter()
            .find_map(|col| col.position(id).map(|idx| (col.name, idx)))
    }

    /// Total number of items across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(|col| col.items.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::board;
    use super::*;

    #[test]
    fn column_names_round_trip_through_labels() {
        for name in ColumnName::ALL {
            assert_eq!(name.as_str().parse::<ColumnName>(), Ok(name));
            assert_eq!(ColumnName::ALL[name.index()], name);
        }
    }

    #[test]
    fn column_lookup_is_exact() {
        assert_eq!(ColumnName::from_status("Done"), Some(ColumnName::Done));
        assert_eq!(ColumnName::from_status("done"), None);
        assert_eq!(ColumnName::from_status(" Done"), None);
        assert_eq!(ColumnName::from_status(""), None);
    }

    #[test]
    fn default_column_is_ready_to_start() {
        assert_eq!(ColumnName::default(), ColumnName::ReadyToStart);
    }

    #[test]
    fn item_type_labels() {
        assert_eq!(ItemType::from_label("Bug"), Some(ItemType::Bug));
        assert_eq!(
            ItemType::from_label("Feature Enhancements"),
            Some(ItemType::FeatureEnhancement)
        );
        assert_eq!(
            ItemType::from_label("Feature Enhancement"),
            Some(ItemType::FeatureEnhancement)
        );
        assert_eq!(ItemType::from_label("Other"), Some(ItemType::Other));
        assert_eq!(ItemType::from_label("bug"), None);
        assert_eq!(ItemType::from_label("Chore"), None);
    }

    #[test]
    fn empty_board_has_all_six_columns() {
        let state = BoardState::empty();
        let names: Vec<_> = state.columns().iter().map(|c| c.name).collect();
        assert_eq!(names, ColumnName::ALL.to_vec());
        assert!(state.columns().iter().all(|c| c.items.is_empty()));
        assert!(state.is_empty());
    }

    #[test]
    fn find_item_reports_column_and_index() {
        let state = board(&[
            (ColumnName::Done, &["X", "Y"]),
            (ColumnName::Stuck, &["Z"]),
        ]);
        assert_eq!(state.find_item("Y-1"), Some((ColumnName::Done, 1)));
        assert_eq!(state.find_item("Z-2"), Some((ColumnName::Stuck, 0)));
        assert_eq!(state.find_item("nope"), None);
        assert_eq!(state.len(), 3);
    }

    #[test]
    fn unknown_status_maps_to_default_column() {
        let item = test_support::item("A", 0, "Blocked");
        assert_eq!(item.column(), ColumnName::ReadyToStart);
    }

    #[test]
    fn raw_record_decodes_sparse_json() {
        let raw: RawRecord = serde_json::from_str(r#"{"title":"B"}"#).unwrap();
        assert_eq!(raw.title, "B");
        assert_eq!(raw.status, None);
        assert_eq!(raw.developer, None);
        assert_eq!(raw.kind, None);

        let raw: RawRecord =
            serde_json::from_str(r#"{"title":"A","status":"Stuck","developer":"Al, Bo","type":"Bug"}"#)
                .unwrap();
        assert_eq!(raw.kind.as_deref(), Some("Bug"));
        assert_eq!(raw.developer.as_deref(), Some("Al, Bo"));
    }
}
