//! Browser interface for the calculator, compiled to WASM.
//!
//! The page owns the network: `press` hands back a JSON request envelope
//! whenever the calculator wants something computed, and the page reports
//! the answer with `resolve_ok` or `resolve_err` using the envelope's `id`.

/// Setup helpers for running in a browser
mod utils;

use calc_core::{Button, RemoteError, RequestId};
use wasm_bindgen::prelude::*;

/// A calculator for the page to drive.
#[wasm_bindgen]
pub struct Calculator {
    /// The state machine doing the actual work
    inner: calc_core::Calculator,
}

#[wasm_bindgen]
impl Calculator {
    /// Create a calculator showing `0`.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        utils::set_panic_hook();

        Self {
            inner: calc_core::Calculator::new(),
        }
    }

    /// Press the button with the given label. If the press means we need the
    /// arithmetic service, returns a JSON envelope like
    /// `{"id":0,"request":{"operandA":2,"operandB":3,"operation":"ADD"}}`.
    ///
    /// # Errors
    ///
    /// If the label doesn't belong to any button.
    pub fn press(&mut self, label: &str) -> Result<Option<String>, JsError> {
        let button = Button::from_label(label)
            .ok_or_else(|| JsError::new(&format!("unknown button {label:?}")))?;

        self.press_button(button)
            .map_err(|err| JsError::new(&err.to_string()))
    }

    /// Report a successful answer for request `id` (a plain JS number, as
    /// read from the envelope.) Returns `false` if the calculator had already
    /// forgotten about that request or `id` isn't one we could have issued.
    pub fn resolve_ok(&mut self, id: f64, result: f64) -> bool {
        request_id(id).is_some_and(|id| self.inner.resolve(id, Ok(result)))
    }

    /// Report a failure for request `id`.
    pub fn resolve_err(&mut self, id: f64, message: &str) -> bool {
        request_id(id)
            .is_some_and(|id| self.inner.resolve(id, Err(RemoteError::new(message))))
    }

    /// What the screen says
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.inner.display().to_string()
    }

    /// The last error from the arithmetic service, if we're showing one
    #[wasm_bindgen(getter)]
    pub fn api_error(&self) -> Option<String> {
        self.inner.api_error().map(str::to_string)
    }

    /// Whether we're waiting on the arithmetic service
    #[wasm_bindgen(getter)]
    pub fn is_calculating(&self) -> bool {
        self.inner.is_calculating()
    }
}

impl Calculator {
    /// Press a button, serializing any request it makes.
    fn press_button(&mut self, button: Button) -> serde_json::Result<Option<String>> {
        self.inner
            .press(button)
            .map(|request| serde_json::to_string(&request))
            .transpose()
    }
}

/// The largest integer a JS number holds exactly (`Number.MAX_SAFE_INTEGER`).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Turn an id that went through JS back into a `RequestId`.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "checked to be a non-negative integer in the exactly-representable range"
)]
fn request_id(id: f64) -> Option<RequestId> {
    (id.fract() == 0.0 && (0.0..=MAX_SAFE_INTEGER).contains(&id)).then(|| RequestId(id as u64))
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new()
    }
}
