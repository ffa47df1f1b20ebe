use std::time::{Duration, Instant};

use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::future::BoxFuture;
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::board::controller::{BoardController, LoadOutcome, LoadTicket};
use crate::board::reorder::DragEnd;
use crate::board::source::{FetchError, RecordSource};
use crate::board::RawRecord;
use crate::input::action::Action;
use crate::input::keymap::map_key;

/// Reusable text editing buffer with cursor.
///
/// `cursor` is a **char index** (not byte index), always in `0..=char_count`.
#[derive(Debug, Clone)]
pub struct TextBuffer {
    pub input: String,
    pub cursor: usize,
}

impl TextBuffer {
    pub fn new(input: String) -> Self {
        let cursor = input.chars().count();
        Self { input, cursor }
    }

    /// Convert a char index to a byte index.
    fn byte_offset(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.input.len())
    }

    pub fn insert(&mut self, c: char) {
        let byte_idx = self.byte_offset(self.cursor);
        self.input.insert(byte_idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let byte_idx = self.byte_offset(self.cursor - 1);
            self.input.remove(byte_idx);
            self.cursor -= 1;
        }
    }

    pub fn delete_word(&mut self) {
        let byte_pos = self.byte_offset(self.cursor);
        let trimmed = self.input[..byte_pos].trim_end();
        let start_byte = trimmed
            .char_indices()
            .rev()
            .find(|(_, c)| c.is_whitespace())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        let start_char = self.input[..start_byte].chars().count();
        self.input.drain(start_byte..byte_pos);
        self.cursor = start_char;
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.input.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.input.chars().count();
    }
}

/// Current interaction mode.
#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    /// A card is held. `AppState::selected_card` is the drop target.
    Drag {
        active: String,
    },
    /// Live search; every edit re-filters the board.
    Search {
        buf: TextBuffer,
    },
    Help,
}

/// Notification severity for statusbar coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Error,
}

/// Presentation state. The board itself lives in [`BoardController`].
pub struct AppState {
    pub mode: Mode,
    pub focused_column: usize,
    /// Index into the focused column's *visible* cards.
    pub selected_card: usize,
    pub loading: bool,
    pub notification: Option<String>,
    pub notification_level: NotificationLevel,
    pub notification_expires: Option<Instant>,
    pub should_quit: bool,
    pub reload_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            mode: Mode::Normal,
            focused_column: 0,
            selected_card: 0,
            loading: false,
            notification: None,
            notification_level: NotificationLevel::Info,
            notification_expires: None,
            should_quit: false,
            reload_requested: false,
        }
    }

    /// Id of the selected card in the current view.
    pub fn selected_id(&self, controller: &BoardController) -> Option<String> {
        controller
            .view()
            .columns()
            .get(self.focused_column)
            .and_then(|col| col.items.get(self.selected_card))
            .map(|item| item.id.clone())
    }

    /// Show a transient notification.
    pub fn notify(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Info;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Show a transient error notification (rendered in red).
    pub fn notify_error(&mut self, msg: impl Into<String>) {
        self.notification = Some(msg.into());
        self.notification_level = NotificationLevel::Error;
        self.notification_expires = Some(Instant::now() + Duration::from_secs(3));
    }

    /// Clear expired notifications.
    pub fn tick_notification(&mut self) {
        if let Some(expires) = self.notification_expires {
            if Instant::now() >= expires {
                self.notification = None;
                self.notification_level = NotificationLevel::Info;
                self.notification_expires = None;
            }
        }
    }

    /// Clamp the selected card index to the focused column's visible count.
    pub fn clamp_selection(&mut self, controller: &BoardController) {
        let visible = controller
            .view()
            .columns()
            .get(self.focused_column)
            .map_or(0, |col| col.count());
        if visible == 0 {
            self.selected_card = 0;
        } else if self.selected_card >= visible {
            self.selected_card = visible - 1;
        }
    }

    /// Put the selection on `id` if it is visible in the focused column.
    fn select_id(&mut self, controller: &BoardController, id: &str) {
        if let Some(idx) = controller
            .view()
            .columns()
            .get(self.focused_column)
            .and_then(|col| col.items.iter().position(|item| item.id == id))
        {
            self.selected_card = idx;
        }
        self.clamp_selection(controller);
    }

    /// React to a settled load.
    pub fn on_load(&mut self, controller: &BoardController, outcome: &LoadOutcome) {
        match outcome {
            LoadOutcome::Loaded { items } => {
                self.loading = false;
                if matches!(self.mode, Mode::Drag { .. }) {
                    self.mode = Mode::Normal;
                }
                self.clamp_selection(controller);
                self.notify(format!("Loaded {items} card{}", if *items == 1 { "" } else { "s" }));
            }
            LoadOutcome::Failed { .. } => {
                self.loading = false;
                self.notify_error("Load failed");
            }
            LoadOutcome::Discarded => {}
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve the pending fetch, or never resolve when nothing is in flight.
async fn settle<T>(pending: &mut Option<BoxFuture<'_, T>>) -> T {
    match pending {
        Some(fut) => fut.await,
        None => std::future::pending().await,
    }
}

/// Main TUI application loop.
///
/// Runs on a single-threaded runtime: the fetch, terminal events and the
/// redraw tick are multiplexed with `select!`. Leaving the loop drops any
/// fetch still in flight and closes the controller.
pub async fn run(terminal: &mut DefaultTerminal, source: &dyn RecordSource) -> color_eyre::Result<()> {
    let mut controller = BoardController::new();
    let mut state = AppState::new();
    let mut events = EventStream::new();
    let mut tick = tokio::time::interval(Duration::from_millis(250));

    let mut ticket: LoadTicket = controller.begin_load();
    let mut pending: Option<BoxFuture<'_, Result<Vec<RawRecord>, FetchError>>> = Some(source.fetch());
    state.loading = true;

    let result = loop {
        state.tick_notification();
        if let Err(e) = terminal.draw(|f| crate::ui::render(f, &controller, &state)) {
            break Err(e.into());
        }

        tokio::select! {
            fetched = settle(&mut pending) => {
                pending = None;
                let outcome = controller.finish_load(ticket, fetched);
                state.on_load(&controller, &outcome);
            }
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    let action = map_key(key, &state.mode);
                    process_action(&mut controller, &mut state, action);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break Err(e.into()),
                None => break Ok(()),
            },
            _ = tick.tick() => {}
        }

        if state.reload_requested {
            state.reload_requested = false;
            state.loading = true;
            ticket = controller.begin_load();
            pending = Some(source.fetch());
            info!("reload requested");
            state.notify("Reloading…");
        }

        if state.should_quit {
            break Ok(());
        }
    };

    if pending.take().is_some() {
        debug!("session ended with a load in flight");
    }
    controller.close();
    result
}

pub fn process_action(controller: &mut BoardController, state: &mut AppState, action: Action) {
    match action {
        Action::None => {}

        Action::FocusPrevColumn
        | Action::FocusNextColumn
        | Action::SelectPrevCard
        | Action::SelectNextCard
        | Action::JumpToFirstCard
        | Action::JumpToLastCard => {
            handle_navigation(controller, state, action);
        }

        Action::PickUpCard | Action::DropCard | Action::CancelDrag => {
            handle_drag(controller, state, action);
        }

        Action::StartSearch => {
            state.mode = Mode::Search {
                buf: TextBuffer::new(controller.query().to_string()),
            };
        }
        Action::ClearSearch => {
            if !controller.query().is_empty() {
                controller.set_query("");
                state.clamp_selection(controller);
                state.notify("Search cleared");
            }
        }

        Action::InputChar(_)
        | Action::InputBackspace
        | Action::InputLeft
        | Action::InputRight
        | Action::InputHome
        | Action::InputEnd
        | Action::InputDeleteWord
        | Action::InputConfirm
        | Action::InputCancel => {
            handle_input(controller, state, action);
        }

        Action::ReloadBoard => {
            state.mode = Mode::Normal;
            state.reload_requested = true;
        }
        Action::ShowHelp => state.mode = Mode::Help,
        Action::Quit => {
            if matches!(state.mode, Mode::Normal) {
                state.should_quit = true;
            } else {
                state.mode = Mode::Normal;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Handler: Navigation (column focus, card selection)
// ---------------------------------------------------------------------------

fn handle_navigation(controller: &BoardController, state: &mut AppState, action: Action) {
    let column_count = controller.state().columns().len();
    match action {
        Action::FocusPrevColumn => {
            if state.focused_column > 0 {
                state.focused_column -= 1;
                state.clamp_selection(controller);
            }
        }
        Action::FocusNextColumn => {
            if state.focused_column + 1 < column_count {
                state.focused_column += 1;
                state.clamp_selection(controller);
            }
        }
        Action::SelectPrevCard => {
            state.selected_card = state.selected_card.saturating_sub(1);
        }
        Action::SelectNextCard => {
            state.selected_card += 1;
            state.clamp_selection(controller);
        }
        Action::JumpToFirstCard => {
            state.selected_card = 0;
        }
        Action::JumpToLastCard => {
            state.selected_card = usize::MAX;
            state.clamp_selection(controller);
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Drag (pick up, drop, put back)
// ---------------------------------------------------------------------------

fn handle_drag(controller: &mut BoardController, state: &mut AppState, action: Action) {
    match action {
        Action::PickUpCard => {
            if let Some(id) = state.selected_id(controller) {
                state.mode = Mode::Drag { active: id };
            }
        }
        Action::DropCard => {
            if let Mode::Drag { active } = std::mem::replace(&mut state.mode, Mode::Normal) {
                let drag = DragEnd {
                    over: state.selected_id(controller),
                    active: Some(active.clone()),
                };
                if controller.drag_end(&drag) {
                    state.notify("Card moved");
                }
                state.select_id(controller, &active);
            }
        }
        Action::CancelDrag => {
            if let Mode::Drag { active } = std::mem::replace(&mut state.mode, Mode::Normal) {
                state.select_id(controller, &active);
            }
        }
        _ => unreachable!(),
    }
}

// ---------------------------------------------------------------------------
// Handler: Search input
// ---------------------------------------------------------------------------

fn handle_input(controller: &mut BoardController, state: &mut AppState, action: Action) {
    let Mode::Search { buf } = &mut state.mode else {
        return;
    };
    match action {
        Action::InputChar(c) => buf.insert(c),
        Action::InputBackspace => buf.backspace(),
        Action::InputLeft => buf.move_left(),
        Action::InputRight => buf.move_right(),
        Action::InputHome => buf.home(),
        Action::InputEnd => buf.end(),
        Action::InputDeleteWord => buf.delete_word(),
        Action::InputConfirm => {
            state.mode = Mode::Normal;
            return;
        }
        Action::InputCancel => {
            controller.set_query("");
            state.mode = Mode::Normal;
            state.clamp_selection(controller);
            return;
        }
        _ => unreachable!(),
    }
    if controller.query() != buf.input {
        controller.set_query(buf.input.clone());
        state.clamp_selection(controller);
    }
}
