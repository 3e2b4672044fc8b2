use serde::{Deserialize, Serialize};

/// What the server says about itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Resp {
    /// `"ok"` if the server is ready to take requests
    pub status: String,

    /// The server's version
    pub version: String,
}

/// Where the health endpoint lives.
pub const PATH: &str = "/health";
