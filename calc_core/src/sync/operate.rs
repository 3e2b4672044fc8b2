use crate::Operation;
use serde::{Deserialize, Serialize};

/// The request to do some arithmetic: `operand_a <operation> operand_b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Req {
    /// The left-hand side
    pub operand_a: f64,

    /// The right-hand side
    pub operand_b: f64,

    /// What to do
    pub operation: Operation,
}

/// The answer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resp {
    /// The result of the operation. Always finite.
    pub result: f64,
}

/// Where the operate endpoint lives.
pub const PATH: &str = "/api/v1/operate";
