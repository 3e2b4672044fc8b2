use crate::Operation;

/// Label for the backspace button.
pub const BACKSPACE_LABEL: &str = "⌫";

/// Localized backspace labels we also accept.
const BACKSPACE_ALIASES: &[&str] = &["退格"];

/// Labels for the digit buttons, indexed by digit.
const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// Everything on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// A digit from 0 to 9. Anything larger is ignored by the calculator.
    Digit(u8),

    /// `.`
    Decimal,

    /// `+`, `-`, `x`, or `÷`
    Operator(Operation),

    /// `=`
    Equals,

    /// `C`
    Clear,

    /// Remove the last character typed
    Backspace,

    /// `+/-`
    ToggleSign,
}

impl Button {
    /// Get a digit button, if `digit` is actually a single decimal digit.
    pub fn digit(digit: u8) -> Option<Self> {
        (digit < 10).then_some(Self::Digit(digit))
    }

    /// Parse the label printed on a button.
    pub fn from_label(label: &str) -> Option<Self> {
        if let Some(digit) = DIGIT_LABELS.iter().position(|l| *l == label) {
            return u8::try_from(digit).ok().map(Self::Digit);
        }

        if let Some(op) = Operation::from_symbol(label) {
            return Some(Self::Operator(op));
        }

        match label {
            "." => Some(Self::Decimal),
            "=" => Some(Self::Equals),
            "C" => Some(Self::Clear),
            "+/-" => Some(Self::ToggleSign),
            _ if label == BACKSPACE_LABEL || BACKSPACE_ALIASES.contains(&label) => {
                Some(Self::Backspace)
            }
            _ => None,
        }
    }

    /// The label printed on this button.
    pub fn label(self) -> &'static str {
        match self {
            Self::Digit(digit) => DIGIT_LABELS
                .get(usize::from(digit))
                .copied()
                .unwrap_or("?"),
            Self::Decimal => ".",
            Self::Operator(op) => op.symbol(),
            Self::Equals => "=",
            Self::Clear => "C",
            Self::Backspace => BACKSPACE_LABEL,
            Self::ToggleSign => "+/-",
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_every_keypad_label() {
        let labels = [
            "0", "1", "2", "3", "4", "5", "6", "7", "8", "9", ".", "+", "-", "x", "÷", "=", "C",
            "⌫", "+/-",
        ];

        for label in labels {
            let button = Button::from_label(label).unwrap();
            assert_eq!(button.label(), label);
        }
    }

    #[test]
    fn accepts_localized_backspace() {
        assert_eq!(Button::from_label("退格"), Some(Button::Backspace));
    }

    #[test]
    fn rejects_unknown_labels() {
        assert_eq!(Button::from_label("%"), None);
        assert_eq!(Button::from_label("10"), None);
        assert_eq!(Button::from_label(""), None);
    }

    #[test]
    fn digit_constructor_checks_range() {
        assert_eq!(Button::digit(9), Some(Button::Digit(9)));
        assert_eq!(Button::digit(10), None);
    }
}
