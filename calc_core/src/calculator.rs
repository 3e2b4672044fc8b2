use crate::screen::Screen;
use crate::sync::{self, operate};
use crate::{Button, Operation};
use serde::{Deserialize, Serialize};

/// Identifies a request we handed out so its answer can find its way back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(pub u64);

/// A request the calculator wants sent to the arithmetic service. Whoever
/// sends it must call `Calculator::resolve` with the same `id` once there's
/// an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Which request this is
    pub id: RequestId,

    /// What to send
    pub request: operate::Req,
}

/// The arithmetic service told us no. We treat every refusal the same way;
/// the message is only for showing to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    /// Human-readable description, shown verbatim
    pub message: String,
}

impl RemoteError {
    /// Construct a new `RemoteError`
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<sync::Error> for RemoteError {
    fn from(err: sync::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// An operand and operator waiting for a second operand.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Pending {
    /// The accumulated first operand
    first: f64,

    /// What to do with it once we have a second operand
    operation: Operation,
}

/// What should happen once a request comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RequestKind {
    /// An operator was pressed mid-chain; the result becomes the next first
    /// operand.
    Chain,

    /// `=` was pressed; the result ends the chain.
    Equals,
}

/// The request we're waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    /// The ID we handed out
    id: RequestId,

    /// How to reconcile the answer
    kind: RequestKind,
}

/// The calculator's input state machine.
///
/// This never does arithmetic itself. Pressing buttons produces at most one
/// `Request` at a time; answers come back through `resolve`. Operators and
/// `=` are ignored while a request is outstanding.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    /// What's on screen
    screen: Screen,

    /// The first half of an operation, if we have one
    pending: Option<Pending>,

    /// The next digit starts a new number instead of extending this one.
    fresh_input: bool,

    /// The last request we issued came from `=`.
    after_equals: bool,

    /// The request we're waiting on, if any
    in_flight: Option<InFlight>,

    /// Message from the last failed request
    api_error: Option<String>,

    /// ID for the next request we issue
    next_id: u64,
}

impl Calculator {
    /// A calculator showing zero, with nothing pending.
    pub fn new() -> Self {
        Self {
            screen: Screen::zero(),
            pending: None,
            fresh_input: false,
            after_equals: false,
            in_flight: None,
            api_error: None,
            next_id: 0,
        }
    }

    /// What's on screen right now.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The screen's text (`"Error"` in the error state.)
    pub fn display(&self) -> &str {
        self.screen.as_str()
    }

    /// The message from the most recent failure, until the next request or
    /// clear.
    pub fn api_error(&self) -> Option<&str> {
        self.api_error.as_deref()
    }

    /// Are we waiting on the service?
    pub fn is_calculating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// The request we're waiting on, if any.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight.map(|in_flight| in_flight.id)
    }

    /// The first operand and operator waiting for a second operand.
    pub fn pending(&self) -> Option<(f64, Operation)> {
        self.pending
            .map(|pending| (pending.first, pending.operation))
    }

    /// Press a button. Returns the request to send, if this press needs one.
    pub fn press(&mut self, button: Button) -> Option<Request> {
        match button {
            Button::Digit(digit) => {
                if let Some(digit) = char::from_digit(u32::from(digit), 10) {
                    self.digit(digit);
                }
                None
            }
            Button::Decimal => {
                self.decimal();
                None
            }
            Button::Operator(operation) => self.operator(operation),
            Button::Equals => self.equals(),
            Button::Clear => {
                self.clear();
                None
            }
            Button::Backspace => {
                self.backspace();
                None
            }
            Button::ToggleSign => {
                self.toggle_sign();
                None
            }
        }
    }

    /// Press a sequence of buttons by label, collecting any requests made.
    /// Unknown labels are skipped.
    pub fn press_labels<'a>(&mut self, labels: impl IntoIterator<Item = &'a str>) -> Vec<Request> {
        labels
            .into_iter()
            .filter_map(Button::from_label)
            .filter_map(|button| self.press(button))
            .collect()
    }

    /// Reconcile the answer to a request. Returns `false` (and changes
    /// nothing) if `id` isn't the request we're waiting on, for example
    /// because the calculator was cleared in the meantime.
    pub fn resolve(&mut self, id: RequestId, outcome: Result<f64, RemoteError>) -> bool {
        let in_flight = match self.in_flight {
            Some(in_flight) if in_flight.id == id => in_flight,
            _ => return false,
        };
        self.in_flight = None;

        let outcome = outcome.and_then(|result| {
            if result.is_finite() {
                Ok(result)
            } else {
                Err(RemoteError::new("result is not a finite number"))
            }
        });

        match outcome {
            Ok(result) => {
                self.screen = Screen::from_value(result);
                self.fresh_input = true;

                match in_flight.kind {
                    RequestKind::Equals => self.pending = None,
                    RequestKind::Chain => {
                        if let Some(pending) = &mut self.pending {
                            pending.first = result;
                        }
                    }
                }
            }
            Err(err) => {
                self.screen = Screen::Error;
                self.pending = None;
                self.fresh_input = false;
                self.after_equals = false;
                self.api_error = Some(err.message);
            }
        }

        true
    }

    /// Type a digit.
    fn digit(&mut self, digit: char) {
        self.after_equals = false;

        if self.fresh_input || self.screen.is_error() {
            self.screen = Screen::Number(digit.to_string());
            self.fresh_input = false;
        } else {
            self.screen.push_digit(digit);
        }
    }

    /// Type a decimal point.
    fn decimal(&mut self) {
        self.after_equals = false;

        if self.fresh_input || self.screen.is_error() {
            self.screen = Screen::Number("0.".to_owned());
            self.fresh_input = false;
        } else {
            self.screen.push_point();
        }
    }

    /// Start over. Any request still outstanding is forgotten.
    fn clear(&mut self) {
        self.screen = Screen::zero();
        self.pending = None;
        self.fresh_input = false;
        self.after_equals = false;
        self.in_flight = None;
        self.api_error = None;
    }

    /// Remove the last character typed.
    fn backspace(&mut self) {
        self.after_equals = false;

        if self.fresh_input || self.screen.is_error() || self.screen.as_str().len() <= 1 {
            self.screen = Screen::zero();
            self.fresh_input = false;
        } else {
            self.screen.pop();
        }
    }

    /// Flip the sign of the number on screen. Zero stays `"0"`.
    fn toggle_sign(&mut self) {
        if self.screen.is_error() {
            return;
        }

        let value = self.screen.value();
        if value != 0.0 {
            self.screen = Screen::from_value(-value);
        }
    }

    /// Press an operator button.
    fn operator(&mut self, operation: Operation) -> Option<Request> {
        if self.screen.is_error() || self.in_flight.is_some() {
            return None;
        }

        match self.pending {
            // No second operand yet: the new operator replaces the old one.
            Some(pending) if self.fresh_input && !self.after_equals => {
                self.pending = Some(Pending {
                    operation,
                    ..pending
                });
                None
            }

            // Second operand entered: compute what we have so far. The
            // result lands in `pending.first` when it comes back.
            Some(pending) if !self.fresh_input => {
                let request = operate::Req {
                    operand_a: pending.first,
                    operand_b: self.screen.value(),
                    operation: pending.operation,
                };

                self.pending = Some(Pending {
                    operation,
                    ..pending
                });
                self.after_equals = false;

                Some(self.issue(request, RequestKind::Chain))
            }

            _ => {
                self.pending = Some(Pending {
                    first: self.screen.value(),
                    operation,
                });
                self.fresh_input = true;
                None
            }
        }
    }

    /// Press `=`.
    fn equals(&mut self) -> Option<Request> {
        if self.screen.is_error() || self.fresh_input || self.in_flight.is_some() {
            return None;
        }

        let pending = self.pending?;
        self.after_equals = true;

        let request = operate::Req {
            operand_a: pending.first,
            operand_b: self.screen.value(),
            operation: pending.operation,
        };

        Some(self.issue(request, RequestKind::Equals))
    }

    /// Hand out a new request and remember that we're waiting on it.
    fn issue(&mut self, request: operate::Req, kind: RequestKind) -> Request {
        let id = RequestId(self.next_id);
        self.next_id += 1;

        self.in_flight = Some(InFlight { id, kind });
        self.api_error = None;

        Request { id, request }
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
