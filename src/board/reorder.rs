use super::{BoardState, ColumnName};

/// A completed drop: the dragged card and the card under it at release.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DragEnd {
    pub active: Option<String>,
    pub over: Option<String>,
}

impl DragEnd {
    #[cfg(test)]
    pub fn new(active: impl Into<String>, over: impl Into<String>) -> Self {
        Self {
            active: Some(active.into()),
            over: Some(over.into()),
        }
    }
}

/// A resolved intra-column move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Move {
    pub column: ColumnName,
    pub from: usize,
    pub to: usize,
}

/// Why a drop leaves the board untouched. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOp {
    /// The gesture carried no active or no over id.
    MissingId,
    /// Dropped onto itself.
    SameItem,
    /// An id is not on the board.
    UnknownId,
    /// Cross-column moves are not supported.
    CrossColumn,
}

impl std::fmt::Display for NoOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::MissingId => "missing active or over id",
            Self::SameItem => "dropped onto itself",
            Self::UnknownId => "id not on board",
            Self::CrossColumn => "cross-column drop",
        })
    }
}

/// Resolve a drop into a move within one column.
pub fn plan(state: &BoardState, drag: &DragEnd) -> Result<Move, NoOp> {
    let (Some(active), Some(over)) = (drag.active.as_deref(), drag.over.as_deref()) else {
        return Err(NoOp::MissingId);
    };
    if active == over {
        return Err(NoOp::SameItem);
    }
    let (active_col, from) = state.find_item(active).ok_or(NoOp::UnknownId)?;
    let (over_col, to) = state.find_item(over).ok_or(NoOp::UnknownId)?;
    if active_col != over_col {
        return Err(NoOp::CrossColumn);
    }
    Ok(Move {
        column: active_col,
        from,
        to,
    })
}

/// Take the card at `from` out and reinsert it at `to`, shifting the cards
/// in between by one. Only `mv.column` changes.
pub fn apply(mut state: BoardState, mv: Move) -> BoardState {
    let items = &mut state.column_mut(mv.column).items;
    if mv.from < items.len() && mv.to < items.len() && mv.from != mv.to {
        let item = items.remove(mv.from);
        items.insert(mv.to, item);
    }
    state
}

/// Apply a drop. A no-op hands the board back unchanged along with the reason.
pub fn reorder(state: BoardState, drag: &DragEnd) -> (BoardState, Result<Move, NoOp>) {
    match plan(&state, drag) {
        Ok(mv) => (apply(state, mv), Ok(mv)),
        Err(reason) => (state, Err(reason)),
    }
}
