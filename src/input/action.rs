/// All possible semantic actions on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Navigation
    FocusPrevColumn,
    FocusNextColumn,
    SelectPrevCard,
    SelectNextCard,
    JumpToFirstCard,
    JumpToLastCard,

    // Drag
    PickUpCard,
    DropCard,
    CancelDrag,

    // Search
    StartSearch,
    ClearSearch,

    // Board
    ReloadBoard,
    ShowHelp,
    Quit,

    // Input modal
    InputConfirm,
    InputCancel,
    InputChar(char),
    InputBackspace,
    InputLeft,
    InputRight,
    InputHome,
    InputEnd,
    InputDeleteWord,

    // No-op
    None,
}
