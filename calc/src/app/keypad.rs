use calc_core::{Button, Operation};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

/// The buttons, laid out the way they'd be on a desk calculator. Short rows
/// leave their last cells blank.
const KEYPAD: [&[Button]; 5] = [
    &[
        Button::Clear,
        Button::Backspace,
        Button::ToggleSign,
        Button::Operator(Operation::Divide),
    ],
    &[
        Button::Digit(7),
        Button::Digit(8),
        Button::Digit(9),
        Button::Operator(Operation::Multiply),
    ],
    &[
        Button::Digit(4),
        Button::Digit(5),
        Button::Digit(6),
        Button::Operator(Operation::Subtract),
    ],
    &[
        Button::Digit(1),
        Button::Digit(2),
        Button::Digit(3),
        Button::Operator(Operation::Add),
    ],
    &[Button::Digit(0), Button::Decimal, Button::Equals],
];

/// Which button a key stands for, if any.
pub fn button_for(code: KeyCode) -> Option<Button> {
    match code {
        KeyCode::Char(c @ '0'..='9') => c
            .to_digit(10)
            .and_then(|digit| u8::try_from(digit).ok())
            .and_then(Button::digit),
        KeyCode::Char('.' | ',') => Some(Button::Decimal),
        KeyCode::Char('+') => Some(Button::Operator(Operation::Add)),
        KeyCode::Char('-') => Some(Button::Operator(Operation::Subtract)),
        KeyCode::Char('x' | '*') => Some(Button::Operator(Operation::Multiply)),
        KeyCode::Char('/' | '÷') => Some(Button::Operator(Operation::Divide)),
        KeyCode::Char('=') | KeyCode::Enter => Some(Button::Equals),
        KeyCode::Char('c' | 'C') | KeyCode::Esc => Some(Button::Clear),
        KeyCode::Backspace | KeyCode::Delete => Some(Button::Backspace),
        KeyCode::Char('n' | '_') => Some(Button::ToggleSign),
        _ => None,
    }
}

/// Draw the keypad. `last` gets highlighted so you can see what you pressed.
pub fn render(frame: &mut Frame<'_>, area: Rect, last: Option<Button>) {
    let rows = KEYPAD.iter().map(|row| {
        Row::new(row.iter().map(|button| {
            let style = match button {
                Button::Operator(_) => Style::new().fg(Color::Yellow),
                Button::Equals => Style::new().fg(Color::Green),
                Button::Clear | Button::Backspace => Style::new().fg(Color::LightRed),
                _ => Style::new(),
            };
            let style = if Some(*button) == last {
                style.reversed()
            } else {
                style
            };

            Cell::new(Line::from(button.label()).centered()).style(style)
        }))
        .height(1)
    });

    let table = Table::new(rows, [Constraint::Ratio(1, 4); 4])
        .column_spacing(1)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(table, area);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn every_keypad_button_has_a_key() {
        for button in KEYPAD.iter().copied().flatten() {
            let key = match button {
                Button::Digit(digit) => KeyCode::Char(char::from(b'0' + digit)),
                Button::Decimal => KeyCode::Char('.'),
                Button::Operator(Operation::Add) => KeyCode::Char('+'),
                Button::Operator(Operation::Subtract) => KeyCode::Char('-'),
                Button::Operator(Operation::Multiply) => KeyCode::Char('x'),
                Button::Operator(Operation::Divide) => KeyCode::Char('/'),
                Button::Equals => KeyCode::Enter,
                Button::Clear => KeyCode::Esc,
                Button::Backspace => KeyCode::Backspace,
                Button::ToggleSign => KeyCode::Char('n'),
            };

            assert_eq!(button_for(key), Some(*button));
        }
    }

    #[test]
    fn every_button_appears_once() {
        let buttons: Vec<Button> = KEYPAD.iter().copied().flatten().copied().collect();

        for button in &buttons {
            assert_eq!(
                buttons.iter().filter(|other| *other == button).count(),
                1,
                "{button:?} is on the keypad more than once"
            );
        }
        assert_eq!(buttons.len(), 19);
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(button_for(KeyCode::Char('z')), None);
        assert_eq!(button_for(KeyCode::Tab), None);
    }
}
