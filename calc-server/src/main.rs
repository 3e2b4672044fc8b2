//! An arithmetic server for the calculator.

/// Errors and how they turn into responses
mod error;

/// Request handlers
mod handlers;

use axum::{
    http::{
        header::{InvalidHeaderValue, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use calc_core::sync::{health, operate};
use clap::Parser;
use std::{io, num::ParseIntError, time::Duration};
use tokio::net::TcpListener;
use tower_http::{catch_panic, compression, cors, limit, timeout, trace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve arithmetic over HTTP
#[derive(Debug, Parser)]
#[clap(version)]
struct Config {
    /// Address to listen on
    #[clap(long, env, default_value = "127.0.0.1:8080")]
    address: String,

    /// Request body size limit, in bytes
    #[clap(long, env, default_value = "4096")]
    body_limit: usize,

    /// Request timeout, in seconds
    #[clap(long, env, default_value = "5", value_parser = duration_parser)]
    request_timeout: Duration,

    /// Browser origin allowed to call the API (the calculator page)
    #[clap(long, env, default_value = "http://localhost:3001", value_parser = origin_parser)]
    allowed_origin: HeaderValue,
}

/// Parse a number of seconds.
fn duration_parser(s: &str) -> Result<Duration, ParseIntError> {
    s.parse().map(Duration::from_secs)
}

/// Parse an origin into something we can put in a header.
fn origin_parser(s: &str) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(s)
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = router(&config);

    let listener = TcpListener::bind(&config.address).await?;
    tracing::info!(address = ?listener.local_addr(), "listening");

    axum::serve(listener, app).await
}

/// Build the routes and middleware.
fn router(config: &Config) -> Router {
    let cors = cors::CorsLayer::new()
        .allow_origin(config.allowed_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(300));

    Router::new()
        // ROUTES
        .route(health::PATH, get(handlers::health::handler))
        .route(operate::PATH, post(handlers::operate::handler))
        // MIDDLEWARE
        .layer(catch_panic::CatchPanicLayer::custom(|_| {
            tracing::error!("handler panicked");
            error::Error::Internal.into_response()
        }))
        .layer(timeout::TimeoutLayer::new(config.request_timeout))
        .layer(limit::RequestBodyLimitLayer::new(config.body_limit))
        .layer(middleware::map_response(error::json_errors))
        .layer(cors)
        .layer(compression::CompressionLayer::new())
        .layer(trace::TraceLayer::new_for_http())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::parse_from(["calc-server"]);

        assert_eq!(config.address, "127.0.0.1:8080");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.allowed_origin, "http://localhost:3001");
    }

    #[test]
    fn rejects_bad_origin() {
        assert!(Config::try_parse_from(["calc-server", "--allowed-origin", "bad\norigin"]).is_err());
    }
}
