// Copyright 2026 Keygate Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Gate middleware behavior over a real axum router.

use std::io;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::get;
use axum::{middleware, Extension, Router};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tracing_subscriber::fmt::MakeWriter;

use keygate::{
    authenticate, AuditLogger, AuthenticatedContext, CryptoSigner, Principal, RequestGate,
    TokenIssuer, TokenValidator,
};

const KEY: &str = "integration-signing-key-0123456789abcdef";

async fn whoami(Extension(ctx): Extension<AuthenticatedContext>) -> String {
    ctx.principal
}

fn test_router() -> Router {
    let gate = RequestGate::new(Arc::new(TokenValidator::new(KEY).unwrap()));
    Router::new()
        .route("/protected", get(whoami))
        .layer(middleware::from_fn_with_state(gate, authenticate))
}

fn token_for(identifier: &str, ttl: u64, issued_at: u64) -> String {
    let issuer = TokenIssuer::new(KEY, ttl, "keygate").unwrap();
    issuer
        .issue_at(
            &Principal::new(identifier, "", vec!["user".to_string()]),
            issued_at,
        )
        .unwrap()
}

fn live_token(identifier: &str) -> String {
    let issuer = TokenIssuer::new(KEY, 3600, "keygate").unwrap();
    issuer
        .issue(&Principal::new(identifier, "", vec!["user".to_string()]))
        .unwrap()
}

async fn get_protected(app: Router, authorization: Option<&str>) -> (StatusCode, String) {
    let mut builder = Request::builder().uri("/protected");
    if let Some(value) = authorization {
        builder = builder.header("Authorization", value);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_valid_token_reaches_handler_with_context() {
    let header = format!("Bearer {}", live_token("alice@example.com"));
    let (status, body) = get_protected(test_router(), Some(&header)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "alice@example.com");
}

#[tokio::test]
async fn test_missing_header_is_rejected() {
    let (status, _) = get_protected(test_router(), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_non_bearer_scheme_is_rejected() {
    let (status, _) = get_protected(test_router(), Some("Basic dXNlcjpwYXNz")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_expired_token_is_rejected() {
    // Issued two hours in the past with a one hour TTL.
    let issued_at = keygate::utils::time::now_secs() - 7200;
    let header = format!("Bearer {}", token_for("alice@example.com", 3600, issued_at));
    let (status, _) = get_protected(test_router(), Some(&header)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_denial_body_never_leaks_the_failure_kind() {
    // Malformed token, tampered token, and missing header must produce
    // byte-identical denial bodies: no oracle across the trust boundary.
    let valid = live_token("alice@example.com");
    let tampered = {
        let (rest, sig) = valid.rsplit_once('.').unwrap();
        let mut bytes: Vec<u8> = sig.bytes().collect();
        let last = bytes.last_mut().unwrap();
        *last = if *last == b'A' { b'B' } else { b'A' };
        format!("Bearer {}.{}", rest, String::from_utf8(bytes).unwrap())
    };

    let (s1, b1) = get_protected(test_router(), None).await;
    let (s2, b2) = get_protected(test_router(), Some("Bearer not-a-token")).await;
    let (s3, b3) = get_protected(test_router(), Some(&tampered)).await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(s3, StatusCode::UNAUTHORIZED);
    assert_eq!(b1, b2);
    assert_eq!(b2, b3);
}

/// Shared in-memory writer so a test can read back formatted log lines.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl io::Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Capture {
    type Writer = Capture;
    fn make_writer(&'a self) -> Capture {
        self.clone()
    }
}

#[test]
fn test_each_request_emits_one_signed_audit_record() {
    let signer = CryptoSigner::new();
    let gate = RequestGate::with_audit(
        Arc::new(TokenValidator::new(KEY).unwrap()),
        Arc::new(AuditLogger::new(signer.clone())),
    );
    let app = Router::new()
        .route("/protected", get(whoami))
        .layer(middleware::from_fn_with_state(gate, authenticate));

    let capture = Capture::default();
    let subscriber = tracing_subscriber::fmt()
        .json()
        .with_writer(capture.clone())
        .finish();

    // One allowed and one denied request, on the current thread so the
    // scoped subscriber sees both.
    tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let header = format!("Bearer {}", live_token("alice@example.com"));
            let (allowed, _) = get_protected(app.clone(), Some(&header)).await;
            assert_eq!(allowed, StatusCode::OK);

            let (denied, _) = get_protected(app, Some("Bearer not-a-token")).await;
            assert_eq!(denied, StatusCode::UNAUTHORIZED);
        });
    });

    let buf = capture.0.lock().unwrap();
    let records: Vec<serde_json::Value> = String::from_utf8_lossy(&buf)
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .filter(|v: &serde_json::Value| v["target"] == "audit")
        .collect();

    // Exactly one record per decision, each carrying a verifiable signature.
    assert_eq!(records.len(), 2);
    let mut entries = Vec::new();
    for record in &records {
        let signature = record["fields"]["signature"].as_str().unwrap();
        let payload = record["fields"]["payload"].as_str().unwrap();
        assert!(signer.verify(payload.as_bytes(), signature));
        entries.push(serde_json::from_str::<serde_json::Value>(payload).unwrap());
    }

    let allow = entries.iter().find(|e| e["outcome"] == "allow").unwrap();
    assert_eq!(allow["principal"], "alice@example.com");
    assert!(allow.get("failure_kind").is_none());

    let deny = entries.iter().find(|e| e["outcome"] == "deny").unwrap();
    assert_eq!(deny["failure_kind"], "malformed_token");
    assert!(deny.get("principal").is_none());
}

#[tokio::test]
async fn test_unprotected_sibling_route_is_untouched() {
    // The gate only guards the routes layered under it.
    let gate = RequestGate::new(Arc::new(TokenValidator::new(KEY).unwrap()));
    let app = Router::new()
        .route(
            "/protected",
            get(whoami).layer(middleware::from_fn_with_state(gate, authenticate)),
        )
        .route("/health", get(|| async { "ok" }));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
