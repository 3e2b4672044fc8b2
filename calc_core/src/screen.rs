use std::fmt;

/// What we show in place of a number after the service reports a problem.
pub const ERROR_TEXT: &str = "Error";

/// What the calculator's screen is showing.
///
/// Numbers are kept as the text the user typed (or that we rendered from a
/// result) so that things like a trailing decimal point survive until the
/// next keypress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// A number, possibly only partially typed (e.g. `"12."`)
    Number(String),

    /// The last request failed
    Error,
}

impl Screen {
    /// A fresh screen.
    pub fn zero() -> Self {
        Self::Number("0".to_owned())
    }

    /// Show a number we got from somewhere other than typing.
    pub fn from_value(value: f64) -> Self {
        Self::Number(render(value))
    }

    /// Is the error indicator showing?
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// The text to display.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Number(text) => text,
            Self::Error => ERROR_TEXT,
        }
    }

    /// The number on screen. Partial input like `"3."` reads as `3`; the
    /// error indicator and anything else that fails to parse read as zero.
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(text) => text.parse().unwrap_or(0.0),
            Self::Error => 0.0,
        }
    }

    /// Type a digit onto the end of the number. A lone zero is replaced
    /// instead of extended.
    pub(crate) fn push_digit(&mut self, digit: char) {
        match self {
            Self::Number(text) if text == "0" => *text = digit.to_string(),
            Self::Number(text) if text == "-0" => *text = format!("-{digit}"),
            Self::Number(text) => text.push(digit),
            Self::Error => *self = Self::Number(digit.to_string()),
        }
    }

    /// Add a decimal point unless there already is one.
    pub(crate) fn push_point(&mut self) {
        match self {
            Self::Number(text) if text.contains('.') => {}
            Self::Number(text) => text.push('.'),
            Self::Error => *self = Self::Number("0.".to_owned()),
        }
    }

    /// Drop the last character. Never leaves the screen empty or holding a
    /// bare sign.
    pub(crate) fn pop(&mut self) {
        if let Self::Number(text) = self {
            text.pop();

            if text.is_empty() || text == "-" {
                *self = Self::zero();
            }
        } else {
            *self = Self::zero();
        }
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Render a number the way the screen shows it: the shortest decimal that
/// reads back as the same value, no exponent, no trailing `.0` on whole
/// numbers, and no negative zero.
pub fn render(value: f64) -> String {
    if value == 0.0 {
        return "0".to_owned();
    }

    format!("{value}")
}
