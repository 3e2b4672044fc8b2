use crate::bail_if;
use crate::error::Error;
use axum::{extract::rejection::JsonRejection, Json};
use calc_core::sync::operate;
use calc_core::Operation;

/// What we say when asked to divide by zero.
static DIVISION_BY_ZERO: &str = "division by zero";

/// What we say when the answer would overflow (or otherwise not be a number.)
static NOT_FINITE: &str = "result is not a finite number";

#[tracing::instrument(skip(payload))]
pub async fn handler(
    payload: Result<Json<operate::Req>, JsonRejection>,
) -> Result<Json<operate::Resp>, Error> {
    let Json(req) = payload?;

    tracing::info!(
        operand_a = req.operand_a,
        operand_b = req.operand_b,
        operation = %req.operation,
        "received calculator request"
    );

    let result = evaluate(&req)?;

    Ok(Json(operate::Resp { result }))
}

/// Do the arithmetic. Refuses to divide by zero and never returns infinity
/// or NaN.
pub fn evaluate(req: &operate::Req) -> Result<f64, Error> {
    let result = match req.operation {
        Operation::Add => req.operand_a + req.operand_b,
        Operation::Subtract => req.operand_a - req.operand_b,
        Operation::Multiply => req.operand_a * req.operand_b,
        Operation::Divide => {
            bail_if!(req.operand_b == 0.0, DIVISION_BY_ZERO);

            req.operand_a / req.operand_b
        }
    };

    bail_if!(!result.is_finite(), NOT_FINITE);

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Config;
    use axum::{
        body::{to_bytes, Body},
        http::{
            header::{CONTENT_LENGTH, CONTENT_TYPE},
            Method, Request, StatusCode,
        },
    };
    use calc_core::sync::{self, error::ErrorResp, Client};
    use clap::Parser;
    use tokio::net::TcpListener;
    use tower::ServiceExt;

    fn req(operand_a: f64, operand_b: f64, operation: Operation) -> operate::Req {
        operate::Req {
            operand_a,
            operand_b,
            operation,
        }
    }

    #[test]
    fn test_evaluate() {
        let cases = [
            (10.0, 5.0, Operation::Add, 15.0),
            (10.0, 5.0, Operation::Subtract, 5.0),
            (10.0, 5.0, Operation::Multiply, 50.0),
            (10.0, 5.0, Operation::Divide, 2.0),
            (-5.0, 3.0, Operation::Add, -2.0),
            (-5.0, 3.0, Operation::Multiply, -15.0),
            (22.0, -2.0, Operation::Multiply, -44.0),
        ];

        for (a, b, operation, expected) in cases {
            let result = evaluate(&req(a, b, operation)).unwrap();
            assert!(
                (result - expected).abs() < 1e-9,
                "{a} {operation} {b} = {result}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_divide_by_zero() {
        let err = evaluate(&req(10.0, 0.0, Operation::Divide)).unwrap_err();

        assert_eq!(
            err.unwrap_custom(),
            (StatusCode::BAD_REQUEST, DIVISION_BY_ZERO.to_string())
        );
    }

    #[test]
    fn test_divide_by_negative_zero() {
        assert!(evaluate(&req(10.0, -0.0, Operation::Divide)).is_err());
    }

    #[test]
    fn test_overflow() {
        let err = evaluate(&req(f64::MAX, f64::MAX, Operation::Add)).unwrap_err();

        assert_eq!(err.unwrap_custom().1, NOT_FINITE);
    }

    #[test_log::test(tokio::test)]
    async fn test_handler_success() {
        let Json(resp) = handler(Ok(Json(req(2.0, 3.0, Operation::Add))))
            .await
            .unwrap();

        assert_eq!(resp, operate::Resp { result: 5.0 });
    }

    #[test_log::test(tokio::test)]
    async fn test_unknown_operation_is_a_json_error() {
        let app = crate::router(&Config::parse_from(["calc-server"]));

        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(operate::PATH)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"operandA": 1, "operandB": 2, "operation": "MODULO"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(resp.status().is_client_error());

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResp = serde_json::from_slice(&body).unwrap();
        assert!(body.error.contains("MODULO"), "{}", body.error);
    }

    #[test_log::test(tokio::test)]
    async fn test_oversized_body_is_a_json_error() {
        let app = crate::router(&Config::parse_from(["calc-server", "--body-limit", "1024"]));
        let padding = " ".repeat(2000);
        let body = format!(r#"{{"operandA": 1, "operandB": 2, "operation": "ADD"{padding}}}"#);

        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(operate::PATH)
                    .header(CONTENT_TYPE, "application/json")
                    .header(CONTENT_LENGTH, body.len())
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResp = serde_json::from_slice(&body).unwrap();
        assert!(!body.error.is_empty());
    }

    #[test_log::test(tokio::test)]
    async fn test_wrong_method_is_a_json_error() {
        let app = crate::router(&Config::parse_from(["calc-server"]));

        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(operate::PATH)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResp = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "method not allowed");
    }

    #[test_log::test(tokio::test)]
    async fn test_cors_preflight() {
        let app = crate::router(&Config::parse_from(["calc-server"]));

        let resp = app
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri(operate::PATH)
                    .header("origin", "http://localhost:3001")
                    .header("access-control-request-method", "POST")
                    .header("access-control-request-headers", "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            resp.headers()
                .get("access-control-allow-origin")
                .and_then(|value| value.to_str().ok()),
            Some("http://localhost:3001")
        );
    }

    #[test_log::test(tokio::test)]
    async fn test_with_real_client() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        let app = crate::router(&Config::parse_from(["calc-server"]));
        tokio::spawn(async move { axum::serve(listener, app).await });

        let http = reqwest::Client::new();
        let client = Client::new(format!("http://{address}"));

        let resp = client
            .operate(&http, &req(-44.0, 2.0, Operation::Multiply))
            .await
            .unwrap();
        assert_eq!(resp.result, -88.0);

        let err = client
            .operate(&http, &req(9.0, 0.0, Operation::Divide))
            .await
            .unwrap_err();
        assert!(
            matches!(&err, sync::Error::Client(message) if message == DIVISION_BY_ZERO),
            "{err:?}"
        );

        let health = client.health(&http).await.unwrap();
        assert_eq!(health.status, "ok");
    }
}
