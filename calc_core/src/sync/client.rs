use super::error::{self, Error, ErrorResp};
use super::{health, operate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use url::Url;

/// Client for the arithmetic service
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Client {
    /// The server to connect to. Should only be the protocol and domain, e.g.
    /// `http://localhost:8080`.
    pub server: String,
}

impl Client {
    /// Construct a new client
    pub fn new(server: String) -> Self {
        Self { server }
    }

    /// Ask the server to do some arithmetic.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`. Refusals like division by
    /// zero come back as `Error::Client`.
    pub async fn operate(
        &self,
        client: &reqwest::Client,
        req: &operate::Req,
    ) -> error::Result<operate::Resp> {
        let url = self.url(operate::PATH)?;

        Self::handle_response(client.post(url).json(req)).await
    }

    /// Check that the server is up.
    ///
    /// ## Errors
    ///
    /// Errors are the same as `handle_response`.
    pub async fn health(&self, client: &reqwest::Client) -> error::Result<health::Resp> {
        let url = self.url(health::PATH)?;

        Self::handle_response(client.get(url)).await
    }

    /// Get the full URL for an endpoint on our server.
    fn url(&self, path: &str) -> error::Result<Url> {
        Ok(Url::parse(&self.server)?.join(path)?)
    }

    /// Convert an HTTP response into a result, interpreting errors in a
    /// standard way.
    ///
    /// ## Errors
    ///
    /// - `Ok(..)` if the server returned a success (2xx)
    /// - `Error::Client` if the server returned a client error (4xx). The
    ///   message is the `error` field of the body, or the whole body if it
    ///   isn't the JSON we expect, or the status's reason if the body is empty.
    /// - `Error::Server` if the server returned a server error (5xx)
    /// - `Error::Unexpected` if the server returned something else (the server is
    ///   not supposed to issue redirects or informational responses.)
    async fn handle_response<T>(resp: reqwest::RequestBuilder) -> error::Result<T>
    where
        T: DeserializeOwned,
    {
        let resp = resp.send().await?;

        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else if status.is_client_error() {
            let body = resp.text().await?;

            let message = match serde_json::from_str::<ErrorResp>(&body) {
                Ok(err) => err.error,
                Err(_) => body.trim().to_string(),
            };

            if message.is_empty() {
                Err(Error::Client(
                    status
                        .canonical_reason()
                        .map_or_else(|| status.to_string(), str::to_lowercase),
                ))
            } else {
                Err(Error::Client(message))
            }
        } else if status.is_server_error() {
            Err(Error::Server)
        } else {
            Err(Error::Unexpected(status))
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Operation;
    use axum::{http::StatusCode, routing::post, Router};
    use tokio::net::TcpListener;

    /// Serve `router` on a random local port, returning a client for it.
    async fn serve(router: Router) -> Client {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, router).await });

        Client::new(format!("http://{address}"))
    }

    /// Send a request to a server that always answers `status` with `body`.
    async fn operate_against(status: StatusCode, body: &'static str) -> Error {
        let client = serve(Router::new().route(
            operate::PATH,
            post(move || async move { (status, body) }),
        ))
        .await;

        client
            .operate(
                &reqwest::Client::new(),
                &operate::Req {
                    operand_a: 1.0,
                    operand_b: 2.0,
                    operation: Operation::Add,
                },
            )
            .await
            .unwrap_err()
    }

    #[tokio::test]
    async fn plain_text_client_errors_use_the_body() {
        let err = operate_against(StatusCode::BAD_REQUEST, "no thank you\n").await;

        assert!(
            matches!(&err, Error::Client(message) if message == "no thank you"),
            "{err:?}"
        );
    }

    #[tokio::test]
    async fn empty_client_errors_use_the_status_reason() {
        let err = operate_against(StatusCode::REQUEST_TIMEOUT, "").await;

        assert_eq!(err.to_string(), "request timeout");
    }

    #[tokio::test]
    async fn json_client_errors_use_the_error_field() {
        let err =
            operate_against(StatusCode::BAD_REQUEST, r#"{"error":"division by zero"}"#).await;

        assert_eq!(err.to_string(), "division by zero");
    }

    #[tokio::test]
    async fn server_errors_hide_the_body() {
        let err =
            operate_against(StatusCode::INTERNAL_SERVER_ERROR, "stack trace!").await;

        assert!(matches!(err, Error::Server), "{err:?}");
    }

    #[tokio::test]
    async fn redirects_are_unexpected() {
        // no `Location` header, so reqwest won't try to follow it
        let err = operate_against(StatusCode::MULTIPLE_CHOICES, "").await;

        assert!(
            matches!(err, Error::Unexpected(status) if status == StatusCode::MULTIPLE_CHOICES),
            "{err:?}"
        );
    }

    #[test]
    fn joins_paths_onto_the_server() {
        let client = Client::new("http://localhost:8080".to_string());

        assert_eq!(
            client.url(operate::PATH).unwrap().as_str(),
            "http://localhost:8080/api/v1/operate"
        );
    }

    #[test]
    fn bad_server_is_a_url_error() {
        let client = Client::new("not a url".to_string());

        assert!(matches!(
            client.url(operate::PATH),
            Err(Error::UrlParse(_))
        ));
    }

    #[test]
    fn client_errors_display_verbatim() {
        assert_eq!(
            Error::Client("division by zero".to_string()).to_string(),
            "division by zero"
        );
    }
}
