// ABOUTME: Route definitions and handler functions for the secretd gateway.
// ABOUTME: Assembles the public and protected routes into a single Axum Router.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::auth::BasicAuthLayer;
use crate::config::SharedConfig;

/// Build the Axum router with both routes and the auth gate attached.
///
/// The gate is layered here rather than in main so every construction of the
/// router, production or test, carries it. Unknown paths fall through to
/// axum's default 404.
pub fn create_router(config: SharedConfig) -> Router {
    let auth = BasicAuthLayer::new(config.username.clone(), config.password.clone());

    Router::new()
        .route("/", get(index))
        .route("/secret", get(secret))
        .layer(auth)
        .with_state(config)
}

/// GET / - unconditional greeting.
async fn index() -> &'static str {
    "Hello, world!"
}

/// GET /secret - the configured secret message. Only reachable once the
/// auth middleware has accepted the request's credentials.
async fn secret(State(config): State<SharedConfig>) -> String {
    config.secret_message.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use axum::body::Body;
    use base64::prelude::*;
    use http::Request;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_config() -> SharedConfig {
        Arc::new(ServerConfig {
            username: "admin".to_string(),
            password: "s3cret".to_string(),
            secret_message: "the-eagle-has-landed".to_string(),
            port: 3000,
        })
    }

    async fn body_string(resp: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn index_returns_greeting() {
        let app = create_router(test_config());

        let resp = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "Hello, world!");
    }

    #[tokio::test]
    async fn secret_returns_configured_message_when_authorized() {
        let app = create_router(test_config());

        let resp = app
            .oneshot(
                Request::get("/secret")
                    .header(
                        "authorization",
                        format!("Basic {}", BASE64_STANDARD.encode("admin:s3cret")),
                    )
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(resp.status(), 200);
        assert_eq!(body_string(resp).await, "the-eagle-has-landed");
    }

    #[tokio::test]
    async fn secret_is_challenged_without_credentials() {
        let app = create_router(test_config());

        let resp = app
            .oneshot(Request::get("/secret").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 401);
        assert!(resp.headers().contains_key("www-authenticate"));
        assert_eq!(body_string(resp).await, "Unauthorized Access");
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let app = create_router(test_config());

        let resp = app
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), 404);
    }
}
