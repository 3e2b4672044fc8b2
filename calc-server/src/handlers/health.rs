use axum::Json;
use calc_core::sync::health;

/// Let load balancers (and clients on startup) know we're here.
#[tracing::instrument]
pub async fn handler() -> Json<health::Resp> {
    Json(health::Resp {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_success() {
        let Json(resp) = handler().await;

        assert_eq!(resp.status, "ok");
        assert_eq!(resp.version, env!("CARGO_PKG_VERSION"));
    }
}
