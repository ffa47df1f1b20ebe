use super::{BoardItem, BoardState, ColumnName};

/// Read-only projection of one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView<'a> {
    pub name: ColumnName,
    /// Matching items, in canonical order.
    pub items: Vec<&'a BoardItem>,
    /// Number of items in the canonical column, before filtering.
    pub total: usize,
}

impl ColumnView<'_> {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// Whether the query hid anything in this column.
    pub fn is_filtered(&self) -> bool {
        self.items.len() != self.total
    }
}

/// Board-shaped projection of canonical state under a search query.
///
/// Borrows the state it was built from, so it cannot outlive a mutation and
/// cannot be handed back to the reorder engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardView<'a> {
    columns: Vec<ColumnView<'a>>,
}

impl<'a> BoardView<'a> {
    pub fn columns(&self) -> &[ColumnView<'a>] {
        &self.columns
    }

    #[cfg(test)]
    pub fn column(&self, name: ColumnName) -> &ColumnView<'a> {
        &self.columns[name.index()]
    }

    /// Total visible items across all columns.
    pub fn len(&self) -> usize {
        self.columns.iter().map(ColumnView::count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Case-insensitive substring match. An empty query matches everything.
pub fn matches(title: &str, query: &str) -> bool {
    query.is_empty() || title.to_lowercase().contains(&query.to_lowercase())
}

/// Project `state` through `query`. Recomputed from scratch on every call.
pub fn project<'a>(state: &'a BoardState, query: &str) -> BoardView<'a> {
    let columns = state
        .columns()
        .iter()
        .map(|col| ColumnView {
            name: col.name,
            items: col
                .items
                .iter()
                .filter(|item| matches(&item.title, query))
                .collect(),
            total: col.items.len(),
        })
        .collect();
    BoardView { columns }
}
