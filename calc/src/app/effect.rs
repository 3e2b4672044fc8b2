use super::Action;
use calc_core::sync::{self, Client};
use calc_core::Request;

/// Connections to external services that effects use. We keep these around
/// to share connections across the app as a whole.
pub struct EffectContext {
    /// an HTTP client with reqwest
    http: reqwest::Client,
}

impl EffectContext {
    /// Get a new `EffectContext`
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }
}

/// Things that can happen as a result of user input. Side effects!
#[derive(Debug, PartialEq)]
pub enum Effect {
    /// Make sure the server is there
    CheckHealth(Client),

    /// Send an arithmetic request to the server
    Operate(Client, Request),
}

impl Effect {
    /// Perform the side-effectful portions of this effect, returning the next
    /// `Action` the application needs to handle
    pub async fn run(self, conn: &EffectContext) -> Option<Action> {
        match self.run_inner(conn).await {
            Ok(action) => action,
            Err(problem) => {
                tracing::error!(?problem, "problem running effect");
                Some(Action::Problem(problem.to_string()))
            }
        }
    }

    /// The actual implementation of `run`, but with a `Result` wrapper to make
    /// it more ergonomic to write.
    async fn run_inner(self, conn: &EffectContext) -> Result<Option<Action>, Problem> {
        match self {
            Self::CheckHealth(client) => {
                tracing::info!(server = %client.server, "checking health");

                let resp = client.health(&conn.http).await?;

                Ok(Some(Action::Connected(resp)))
            }

            Self::Operate(client, Request { id, request }) => {
                tracing::info!(
                    ?id,
                    operand_a = request.operand_a,
                    operand_b = request.operand_b,
                    operation = %request.operation,
                    "operating"
                );

                // The calculator is waiting on this answer either way, so
                // failures go back to it instead of becoming a `Problem`.
                let outcome = client.operate(&conn.http, &request).await;

                if let Err(err) = &outcome {
                    tracing::warn!(?id, ?err, "operation failed");
                }

                Ok(Some(Action::Operated(id, outcome)))
            }
        }
    }
}

/// Problems that can happen while running an `Effect`.
#[derive(Debug, thiserror::Error)]
pub enum Problem {
    /// We had a problem communicating with the server, for example due to a
    /// bad URL or the server not running.
    #[error("Problem communicating with the server: {0}")]
    Server(#[from] sync::Error),
}
