use calc_core::sync::{error, health, operate};
use calc_core::RequestId;
use crossterm::event::KeyEvent;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// The server answered (or failed to answer) a request
    Operated(RequestId, error::Result<operate::Resp>),

    /// The server told us it's up
    Connected(health::Resp),

    /// Something bad happened; display it to the user
    Problem(String),
}
