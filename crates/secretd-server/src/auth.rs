// ABOUTME: HTTP Basic Authentication middleware for the secretd gateway.
// ABOUTME: Checks the Authorization header on the protected /secret path, exempts all other routes.

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use base64::prelude::*;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// The single username/password pair the gateway accepts.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// A tower Layer that applies Basic authentication to the protected path.
#[derive(Clone)]
pub struct BasicAuthLayer {
    credentials: Arc<Credentials>,
}

impl BasicAuthLayer {
    /// Create a new BasicAuthLayer with the expected credential pair.
    pub fn new(username: String, password: String) -> Self {
        Self {
            credentials: Arc::new(Credentials { username, password }),
        }
    }
}

impl<S> Layer<S> for BasicAuthLayer {
    type Service = BasicAuthMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        BasicAuthMiddleware {
            inner,
            credentials: Arc::clone(&self.credentials),
        }
    }
}

/// The middleware service that checks Basic credentials on /secret routes.
#[derive(Clone)]
pub struct BasicAuthMiddleware<S> {
    inner: S,
    credentials: Arc<Credentials>,
}

impl<S> Service<Request<Body>> for BasicAuthMiddleware<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let path = req.uri().path().to_string();

        // Only authenticate /secret and /secret/* routes
        if !(path == "/secret" || path.starts_with("/secret/")) {
            let mut inner = self.inner.clone();
            return Box::pin(async move { inner.call(req).await });
        }

        let supplied = req
            .headers()
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(decode_basic);

        match supplied {
            Some((ref user, ref pass))
                if *user == self.credentials.username && *pass == self.credentials.password =>
            {
                let mut inner = self.inner.clone();
                Box::pin(async move { inner.call(req).await })
            }
            _ => {
                tracing::debug!(%path, "rejecting request with missing or invalid credentials");
                Box::pin(async move { Ok(unauthorized()) })
            }
        }
    }
}

/// Decode a `Basic <base64>` Authorization header into its username/password pair.
///
/// The scheme match is case-insensitive per RFC 7617; the credential comparison
/// performed by the caller is byte-exact. Returns None for any malformed header.
fn decode_basic(header: &str) -> Option<(String, String)> {
    let (scheme, payload) = header.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = BASE64_STANDARD.decode(payload.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, pass) = decoded.split_once(':')?;
    Some((user.to_string(), pass.to_string()))
}

/// The one generic rejection response. Deliberately identical for a missing
/// header, a malformed header, and a mismatch in either field, so a caller
/// cannot learn which part was wrong.
fn unauthorized() -> Response<Body> {
    Response::builder()
        .status(StatusCode::UNAUTHORIZED)
        .header("www-authenticate", "Basic")
        .header("content-type", "text/plain; charset=utf-8")
        .body(Body::from("Unauthorized Access"))
        .unwrap()
}
