/// Things that can happen to the app
mod action;
pub use action::Action;

/// Side effects the app asks the shell to perform
mod effect;
pub use effect::{Effect, EffectContext};

/// The calculator's buttons and the keys that press them
mod keypad;

/// Things shown on top of the calculator
mod popover;
use popover::Popover;

use calc_core::{screen::render, sync::Client, Button, Calculator, RemoteError};
use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::process::ExitCode;

/// The "functional core" of the app.
pub struct App {
    /// The input state machine
    calculator: Calculator,

    /// How to reach the arithmetic service
    client: Client,

    /// The last button pressed, for highlighting on the keypad
    last_pressed: Option<Button>,

    /// Anything shown above the calculator
    popover: Option<Popover>,

    /// Status to display (visible at the bottom of the screen)
    status_line: Option<String>,

    /// Set when the user wants out
    exit: Option<ExitCode>,
}

impl App {
    /// Create a new instance of the app
    pub fn new(client: Client) -> Self {
        Self {
            calculator: Calculator::new(),
            client,
            last_pressed: None,
            popover: None,
            status_line: None,
            exit: None,
        }
    }

    /// Render the app's UI to the screen
    pub fn render(&self, frame: &mut Frame) {
        let outer = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]);
        let [body_area, status_area] = outer.areas(frame.area());

        let centered = Layout::horizontal([Constraint::Length(36)]).flex(Flex::Center);
        let [column] = centered.areas(body_area);

        let vertical = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(7),
        ]);
        let [display_area, message_area, keypad_area] = vertical.areas(column);

        // a chain answer replaces the first operand, so hide it until then
        let title = match self.calculator.pending() {
            Some((first, operation)) if !self.calculator.is_calculating() => {
                format!(" {} {} ", render(first), operation.symbol())
            }
            _ => String::new(),
        };
        let display = Paragraph::new(self.calculator.display())
            .alignment(Alignment::Right)
            .bold()
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(display, display_area);

        let message = if self.calculator.is_calculating() {
            Paragraph::new("Calculating...").fg(Color::Blue)
        } else if let Some(err) = self.calculator.api_error() {
            Paragraph::new(format!("API Error: {err}")).fg(Color::Red)
        } else {
            Paragraph::new("")
        };
        frame.render_widget(message.alignment(Alignment::Center), message_area);

        keypad::render(frame, keypad_area, self.last_pressed);

        let status = Paragraph::new(match &self.status_line {
            Some(line) => line.as_str(),
            None => "? for help, q to quit",
        })
        .style(Style::new().fg(Color::DarkGray));
        frame.render_widget(status, status_area);

        if let Some(popover) = self.popover {
            popover.render(frame, body_area);
        }
    }

    /// Produce any side effects as needed to initialize the app.
    pub fn init(&self) -> Vec<Effect> {
        vec![Effect::CheckHealth(self.client.clone())]
    }

    /// Handle an `Action`, updating the app's state and producing some side effect(s)
    pub fn handle(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    return vec![];
                }

                if let Some(Popover::Help) = self.popover {
                    if matches!(
                        key.code,
                        KeyCode::Char('q' | '?') | KeyCode::Esc | KeyCode::F(1)
                    ) {
                        self.popover = None;
                    }

                    return vec![];
                }

                match key.code {
                    KeyCode::Char('q') => {
                        self.exit = Some(ExitCode::SUCCESS);

                        vec![]
                    }
                    KeyCode::Char('?') | KeyCode::F(1) => {
                        self.popover = Some(Popover::Help);

                        vec![]
                    }
                    code => match keypad::button_for(code) {
                        Some(button) => self.press(button),
                        None => {
                            self.status_line = Some(format!("Unknown key {code:?}"));

                            vec![]
                        }
                    },
                }
            }
            Action::Operated(id, outcome) => {
                let outcome = outcome
                    .map(|resp| resp.result)
                    .map_err(RemoteError::from);

                if !self.calculator.resolve(id, outcome) {
                    tracing::debug!(?id, "ignoring answer to a forgotten request");
                }

                vec![]
            }
            Action::Connected(health) => {
                tracing::info!(version = %health.version, "connected");
                self.status_line = Some(format!(
                    "Connected to {} (v{})",
                    self.client.server, health.version
                ));

                vec![]
            }
            Action::Problem(problem) => {
                self.status_line = Some(problem);

                vec![]
            }
        }
    }

    /// Press a button on the calculator, sending off any request it makes.
    fn press(&mut self, button: Button) -> Vec<Effect> {
        self.last_pressed = Some(button);
        self.status_line = None;

        self.calculator
            .press(button)
            .map(|request| {
                tracing::debug!(id = ?request.id, "issuing request");
                Effect::Operate(self.client.clone(), request)
            })
            .into_iter()
            .collect()
    }

    /// Let the TUI manager know whether we're all wrapped up and can exit.
    pub fn should_exit(&self) -> Option<ExitCode> {
        self.exit
    }
}
