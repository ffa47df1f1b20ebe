use super::{BoardItem, BoardState};

/// Group items into the six columns.
///
/// Grouping is stable: within a column, items keep their relative input
/// order. Columns with no items stay present and empty.
pub fn classify(items: impl IntoIterator<Item = BoardItem>) -> BoardState {
    let mut state = BoardState::empty();
    for item in items {
        let name = item.column();
        state.column_mut(name).items.push(item);
    }
    state
}
