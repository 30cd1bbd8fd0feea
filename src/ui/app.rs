//! Main TUI application state and logic

use crate::algorithms::AlgorithmRunner;
use crate::history::StepResultCollection;
use crate::step::{StepKind, StepPayload};
use crate::ui::panes::{self, StatusRenderData};
use crate::ui::theme::Theme;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Delay between automatic steps in play mode
const PLAY_INTERVAL: Duration = Duration::from_millis(400);

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Code,
    Array,
    Tree,
    Log,
    Stack,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: code -> array -> tree -> log -> stack)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Code => FocusedPane::Array,
            FocusedPane::Array => FocusedPane::Tree,
            FocusedPane::Tree => FocusedPane::Log,
            FocusedPane::Log => FocusedPane::Stack,
            FocusedPane::Stack => FocusedPane::Code,
        }
    }

    /// Move focus to the previous pane (counter-clockwise)
    pub fn prev(self) -> Self {
        match self {
            FocusedPane::Code => FocusedPane::Stack,
            FocusedPane::Array => FocusedPane::Code,
            FocusedPane::Tree => FocusedPane::Array,
            FocusedPane::Log => FocusedPane::Tree,
            FocusedPane::Stack => FocusedPane::Log,
        }
    }
}

/// The main application state
pub struct App {
    /// Generates steps on demand from the chosen algorithm
    pub runner: AlgorithmRunner,

    /// Every step generated so far, plus the navigation pointer
    pub collection: StepResultCollection,

    /// The unsorted input, kept for reruns
    pub input: Vec<i32>,

    /// Granularity used by the arrow keys and play mode
    pub granularity: StepKind,

    /// Active color palette
    pub theme: &'static Theme,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub code_scroll: usize,
    pub array_scroll: usize,
    pub tree_scroll: usize,
    pub stack_scroll: usize,
    pub log_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app around a runner and its input
    pub fn new(mut runner: AlgorithmRunner, input: Vec<i32>, theme: &'static Theme) -> Self {
        let initial = runner.reset(&input);
        let collection = StepResultCollection::new(initial);
        App {
            runner,
            collection,
            input,
            granularity: StepKind::Significant,
            theme,
            focused_pane: FocusedPane::Array,
            code_scroll: 0,
            array_scroll: 0,
            tree_scroll: 0,
            stack_scroll: 0,
            log_scroll: usize::MAX,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or_else(Instant::now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing && self.last_play_time.elapsed() >= PLAY_INTERVAL {
                if self.step_forward() {
                    self.status_message = String::from("Playing...");
                } else {
                    self.is_playing = false;
                    self.status_message = String::from("Playback complete");
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn tree_visible(&self) -> bool {
        matches!(
            self.collection.current_step(StepKind::Code).payload(),
            StepPayload::Heap {
                draw_heap: true,
                ..
            }
        )
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Layout: panes above a one-line status bar
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        // Split into 2 columns
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(pane_area);

        // Left column: Pseudocode (top) | State (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        // Right column: Array (top) | Log (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(columns[1]);

        let step = Rc::clone(self.collection.current_step(StepKind::Code));

        // During heapsort the array row is shared with the tree view
        let (array_area, tree_area) = if self.tree_visible() {
            let split = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
                .split(right_rows[0]);
            (split[0], Some(split[1]))
        } else {
            (right_rows[0], None)
        };

        panes::render_code_pane(
            frame,
            left_rows[0],
            self.runner.name(),
            self.runner.pseudocode(),
            &step,
            self.theme,
            self.focused_pane == FocusedPane::Code,
            &mut self.code_scroll,
        );

        panes::render_stack_pane(
            frame,
            left_rows[1],
            &step,
            self.theme,
            self.focused_pane == FocusedPane::Stack,
            &mut self.stack_scroll,
        );

        panes::render_array_pane(
            frame,
            array_area,
            &step,
            self.theme,
            self.focused_pane == FocusedPane::Array,
            &mut self.array_scroll,
        );

        if let Some(tree_area) = tree_area {
            panes::render_tree_pane(
                frame,
                tree_area,
                &step,
                self.theme,
                self.focused_pane == FocusedPane::Tree,
                &mut self.tree_scroll,
            );
        }

        panes::render_log_pane(
            frame,
            right_rows[1],
            self.collection.steps(),
            self.collection.pointer(),
            self.theme,
            self.focused_pane == FocusedPane::Log,
            &mut self.log_scroll,
        );

        panes::render_status_bar(
            frame,
            status_area,
            StatusRenderData {
                message: &self.status_message,
                granularity: self.granularity,
                code_step: self.collection.current_code_step(),
                end_code: self.collection.end_code_step(),
                full_step: self.collection.current_full_step(),
                end_full: self.collection.end_full_step(),
                sub_step: self.collection.current_sub_step(),
                is_playing: self.is_playing,
            },
            self.theme,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.step_forward() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
                if self.focused_pane == FocusedPane::Tree && !self.tree_visible() {
                    self.focused_pane = self.focused_pane.next();
                }
            }
            KeyCode::BackTab => {
                self.focused_pane = self.focused_pane.prev();
                if self.focused_pane == FocusedPane::Tree && !self.tree_visible() {
                    self.focused_pane = self.focused_pane.prev();
                }
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let offset = self.focused_scroll_mut();
                *offset = offset.saturating_sub(1);
            }
            KeyCode::Down => {
                let offset = self.focused_scroll_mut();
                *offset = offset.saturating_add(1);
            }
            KeyCode::Char('g') => {
                self.granularity = self.granularity.cycled();
                self.status_message =
                    format!("Granularity: {}", self.granularity.label());
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play mode (with 200ms debounce to prevent key repeat spam)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(PLAY_INTERVAL)
                            .unwrap_or_else(Instant::now);
                        self.status_message = String::from("Playing...");
                    } else {
                        self.status_message = String::from("Paused");
                    }
                }
            }
            KeyCode::Enter => {
                self.fast_forward();
            }
            KeyCode::Backspace => {
                self.rewind();
            }
            KeyCode::Char('r') => {
                self.rerun();
            }
            _ => {}
        }
    }

    fn focused_scroll_mut(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Code => &mut self.code_scroll,
            FocusedPane::Array => &mut self.array_scroll,
            FocusedPane::Tree => &mut self.tree_scroll,
            FocusedPane::Log => &mut self.log_scroll,
            FocusedPane::Stack => &mut self.stack_scroll,
        }
    }

    /// Step forward at the active granularity, generating steps on demand.
    ///
    /// Returns whether the position moved.
    fn step_forward(&mut self) -> bool {
        let kind = self.granularity;
        if self.collection.forward(kind) {
            self.status_message = String::from("Stepped forward");
            self.log_scroll = usize::MAX;
            return true;
        }

        // Nothing recorded ahead: ask the algorithm for more
        if self.runner.is_completed() {
            self.is_playing = false;
            self.status_message = String::from("End of execution");
            return false;
        }
        match self.runner.step_forward(kind) {
            Ok(steps) => {
                // the drain's last step is the next target at this granularity
                for step in steps {
                    self.collection.add_and_advance(step);
                }
                self.status_message = String::from("Stepped forward");
                self.log_scroll = usize::MAX;
                true
            }
            Err(e) => {
                self.is_playing = false;
                self.status_message = format!("Error: {}", e);
                false
            }
        }
    }

    /// Step backward at the active granularity. Never generates new steps.
    fn step_backward(&mut self) {
        if self.collection.backward(self.granularity) {
            self.status_message = String::from("Stepped backward");
            self.log_scroll = usize::MAX;
        } else {
            self.status_message = String::from("Start of execution");
        }
    }

    /// Generate the rest of the run and jump to its final step
    fn fast_forward(&mut self) {
        self.is_playing = false;
        while !self.runner.is_completed() {
            match self.runner.step_forward(StepKind::Algorithmic) {
                Ok(steps) => {
                    for step in steps {
                        self.collection.add(step);
                    }
                }
                Err(e) => {
                    self.status_message = format!("Error: {}", e);
                    return;
                }
            }
        }
        self.collection.go_to_last_known_step();
        self.status_message = String::from("Jumped to end");
        self.log_scroll = usize::MAX;
    }

    /// Jump back to the initial step without discarding history
    fn rewind(&mut self) {
        self.is_playing = false;
        if let Err(e) = self.collection.go_to_code_step(0) {
            self.status_message = format!("Error: {}", e);
            return;
        }
        self.status_message = String::from("Jumped to start");
        self.log_scroll = usize::MAX;
    }

    /// Throw the history away and start the same input over
    fn rerun(&mut self) {
        self.is_playing = false;
        let initial = self.runner.reset(&self.input);
        self.collection = StepResultCollection::new(initial);
        self.code_scroll = 0;
        self.array_scroll = 0;
        self.tree_scroll = 0;
        self.stack_scroll = 0;
        self.log_scroll = usize::MAX;
        self.status_message = String::from("Restarted");
    }
}
