use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Row, Table},
    Frame,
};

/// States shown above the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popover {
    /// Show a table of keyboard shortcuts
    Help,
}

impl Popover {
    /// Render the popover centered over `body_area`
    pub fn render(self, frame: &mut Frame<'_>, body_area: Rect) {
        match self {
            Popover::Help => {
                let popup_vert = Layout::vertical([Constraint::Length(14)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(80)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let popup = Table::new(
                    [
                        Row::new(vec!["? / F1", "Display this help"]),
                        Row::new(vec!["0-9", "Type a digit"]),
                        Row::new(vec![".", "Type a decimal point"]),
                        Row::new(vec!["+ - x /", "Add, subtract, multiply, divide"]),
                        Row::new(vec!["= / enter", "Calculate"]),
                        Row::new(vec!["c / escape", "Clear everything"]),
                        Row::new(vec!["backspace", "Remove the last character"]),
                        Row::new(vec!["n", "Toggle sign"]),
                        Row::new(vec!["q", "Quit / Close help"]),
                    ],
                    [Constraint::Max(12), Constraint::Fill(1)],
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Keyboard Shortcuts")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::new().blue()),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
        }
    }
}
