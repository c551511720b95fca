use async_trait::async_trait;
use ratatui::{
    crossterm::event::{self, Event, KeyCode, KeyEventKind},
    layout::{Constraint, Direction, Layout},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    DefaultTerminal, Frame,
};
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::theme::Theme;
use crate::quickinput::{InputOptions, QuickInputService, QuickPickItem};
use crate::Result;

/// What a key press did to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Accept,
    Cancel,
}

/// Pick list state, single or multi choice
#[derive(Debug)]
pub struct PickerState {
    pub items: Vec<QuickPickItem>,
    pub selected_index: usize,
    pub multi: bool,
}

impl PickerState {
    pub fn new(items: Vec<QuickPickItem>, multi: bool) -> Self {
        Self {
            items,
            selected_index: 0,
            multi,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Step {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_index = self.selected_index.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_index < self.items.len().saturating_sub(1) {
                    self.selected_index += 1;
                }
            }
            KeyCode::Char(' ') if self.multi => {
                if let Some(item) = self.items.get_mut(self.selected_index) {
                    item.picked = !item.picked;
                }
            }
            KeyCode::Enter => {
                if self.multi || !self.items.is_empty() {
                    return Step::Accept;
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => return Step::Cancel,
            _ => {}
        }
        Step::Continue
    }

    /// The answer once accepted
    pub fn into_answer(self) -> Vec<QuickPickItem> {
        if self.multi {
            self.items.into_iter().filter(|item| item.picked).collect()
        } else {
            self.items.into_iter().nth(self.selected_index).into_iter().collect()
        }
    }
}

/// Free-text prompt state
#[derive(Debug)]
pub struct InputState {
    pub input: Input,
    pub options: InputOptions,
}

impl InputState {
    pub fn new(options: InputOptions) -> Self {
        Self {
            input: Input::default(),
            options,
        }
    }

    pub fn handle_event(&mut self, event: &Event) -> Step {
        if let Event::Key(key) = event {
            match key.code {
                KeyCode::Enter => return Step::Accept,
                KeyCode::Esc => return Step::Cancel,
                _ => {}
            }
        }
        self.input.handle_event(event);
        Step::Continue
    }

    /// Whether the current text is flagged by the validator
    pub fn is_flagged(&self) -> bool {
        !self.input.value().is_empty() && !self.options.validate(self.input.value()).valid
    }
}

/// Quick input drawn with ratatui
#[derive(Default)]
pub struct TuiQuickInput {
    theme: Theme,
}

impl TuiQuickInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn run_picker(&self, mut state: PickerState) -> Result<Option<Vec<QuickPickItem>>> {
        let mut terminal = ratatui::init();
        let step = self.picker_loop(&mut terminal, &mut state);
        ratatui::restore();

        match step? {
            Step::Accept => Ok(Some(state.into_answer())),
            _ => Ok(None),
        }
    }

    fn picker_loop(
        &self,
        terminal: &mut DefaultTerminal,
        state: &mut PickerState,
    ) -> Result<Step> {
        loop {
            terminal.draw(|frame| self.render_picker(frame, state))?;

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match state.handle_key(key.code) {
                        Step::Continue => {}
                        step => return Ok(step),
                    }
                }
            }
        }
    }

    fn run_input(&self, mut state: InputState) -> Result<Option<String>> {
        let mut terminal = ratatui::init();
        let step = self.input_loop(&mut terminal, &mut state);
        ratatui::restore();

        match step? {
            Step::Accept => {
                let text = state.input.value().trim().to_string();
                Ok((!text.is_empty()).then_some(text))
            }
            _ => Ok(None),
        }
    }

    fn input_loop(&self, terminal: &mut DefaultTerminal, state: &mut InputState) -> Result<Step> {
        loop {
            terminal.draw(|frame| self.render_input(frame, state))?;

            let event = event::read()?;
            if let Event::Key(key) = &event {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
            }
            match state.handle_event(&event) {
                Step::Continue => {}
                step => return Ok(step),
            }
        }
    }

    fn render_picker(&self, frame: &mut Frame, state: &PickerState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Items
                Constraint::Length(1), // Help
            ])
            .split(frame.area());

        let items: Vec<ListItem> = state
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let label = if state.multi {
                    let mark = if item.picked { "[x]" } else { "[ ]" };
                    format!("{mark} {}", item.label)
                } else {
                    item.label.clone()
                };
                let style = if index == state.selected_index {
                    self.theme.selected
                } else {
                    ratatui::style::Style::default()
                };
                ListItem::new(Line::from(label)).style(style)
            })
            .collect();

        let title = if state.multi {
            " Trusted Domains "
        } else {
            " Configure Trusted Domains "
        };
        let list = List::new(items).block(Block::default().title(title).borders(Borders::ALL));
        frame.render_widget(list, chunks[0]);

        let help = if state.multi {
            "[↑↓] Move  [Space] Toggle  [Enter] Accept  [Esc] Cancel"
        } else {
            "[↑↓] Move  [Enter] Select  [Esc] Cancel"
        };
        frame.render_widget(Paragraph::new(help).style(self.theme.muted), chunks[1]);
    }

    fn render_input(&self, frame: &mut Frame, state: &InputState) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Input
                Constraint::Length(1), // Validation
                Constraint::Length(1), // Help
                Constraint::Min(0),
            ])
            .split(frame.area());

        let text = if state.input.value().is_empty() {
            Line::from(Span::styled(state.options.placeholder.clone(), self.theme.muted))
        } else {
            Line::from(vec![
                Span::raw(state.input.value().to_string()),
                Span::styled("█", self.theme.highlight),
            ])
        };
        let block = Block::default()
            .title(" Add Trusted Domain ")
            .borders(Borders::ALL);
        frame.render_widget(Paragraph::new(text).block(block), chunks[0]);

        if state.is_flagged() {
            if let Some(message) = &state.options.validation_message {
                frame.render_widget(
                    Paragraph::new(message.as_str()).style(self.theme.warning),
                    chunks[1],
                );
            }
        }

        frame.render_widget(
            Paragraph::new("[Enter] Add  [Esc] Cancel").style(self.theme.muted),
            chunks[2],
        );
    }
}

#[async_trait]
impl QuickInputService for TuiQuickInput {
    async fn pick(&self, items: Vec<QuickPickItem>) -> Result<Option<QuickPickItem>> {
        if items.is_empty() {
            return Ok(None);
        }
        let answer = self.run_picker(PickerState::new(items, false))?;
        Ok(answer.and_then(|picked| picked.into_iter().next()))
    }

    async fn pick_many(&self, items: Vec<QuickPickItem>) -> Result<Option<Vec<QuickPickItem>>> {
        self.run_picker(PickerState::new(items, true))
    }

    async fn input(&self, options: InputOptions) -> Result<Option<String>> {
        self.run_input(InputState::new(options))
    }
}
