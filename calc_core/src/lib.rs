//! Common code across all calculator clients (TUI, WASM in the browser) and
//! the arithmetic server.

/// Buttons on the keypad
pub mod button;
pub use button::Button;

/// The input state machine
pub mod calculator;
pub use calculator::{Calculator, RemoteError, Request, RequestId};

/// The operations the arithmetic service supports
pub mod operation;
pub use operation::Operation;

/// What the calculator shows
pub mod screen;
pub use screen::Screen;

/// Talk to the arithmetic service.
pub mod sync;
