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

//! Request gate.
//!
//! Axum middleware that runs one authentication evaluation per inbound
//! request: extract the bearer token, validate it, then either attach the
//! `AuthenticatedContext` to the request extensions and forward, or
//! short-circuit with a single generic denial. Per request the gate moves
//! `NoToken -> TokenPresent -> {Validated | Rejected}` in one hop; a failed
//! validation is never retried within the same request.
//!
//! Every decision emits exactly one signed audit record. The internal
//! failure kind lives only in that record; the response body is identical
//! for every denial so callers cannot tell which check failed.
//!
//! ```ignore
//! let gate = RequestGate::new(Arc::new(TokenValidator::new(&key)?));
//! let app = Router::new()
//!     .route("/profile", get(profile))
//!     .layer(middleware::from_fn_with_state(gate, authenticate));
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::core::audit::AuditLogger;
use crate::core::constants::gate;
use crate::core::principal::AuthenticatedContext;
use crate::token::validator::TokenValidator;

/// Outcome of one gate evaluation.
#[derive(Debug)]
#[non_exhaustive]
pub enum GateDecision {
    Allow(AuthenticatedContext),
    /// Denied; `kind` is the internal failure label, audit-only.
    Deny { kind: &'static str },
}

#[derive(Clone)]
pub struct RequestGate {
    validator: Arc<TokenValidator>,
    audit: Arc<AuditLogger>,
}

impl RequestGate {
    pub fn new(validator: Arc<TokenValidator>) -> Self {
        Self {
            validator,
            audit: Arc::new(AuditLogger::default()),
        }
    }

    pub fn with_audit(validator: Arc<TokenValidator>, audit: Arc<AuditLogger>) -> Self {
        Self { validator, audit }
    }

    /// Evaluate the Authorization header value for one request.
    pub fn evaluate(&self, authorization: Option<&str>) -> GateDecision {
        let Some(value) = authorization else {
            return GateDecision::Deny {
                kind: "missing_token",
            };
        };
        let Some(token) = value.strip_prefix(gate::BEARER_PREFIX) else {
            return GateDecision::Deny {
                kind: "missing_token",
            };
        };
        match self.validator.validate(token) {
            Ok(ctx) => GateDecision::Allow(ctx),
            Err(e) => GateDecision::Deny { kind: e.kind() },
        }
    }
}

/// Axum middleware entry point; wire with `middleware::from_fn_with_state`.
pub async fn authenticate(
    State(gate): State<RequestGate>,
    mut request: Request,
    next: Next,
) -> Response {
    let decision_id = Uuid::new_v4().to_string();
    let authorization = bearer_header(request.headers());

    match gate.evaluate(authorization) {
        GateDecision::Allow(ctx) => {
            gate.audit.record_allow(&decision_id, &ctx.principal);
            debug!(principal = %ctx.principal, "request authenticated");
            request.extensions_mut().insert(ctx);
            next.run(request).await
        }
        GateDecision::Deny { kind } => {
            gate.audit.record_deny(&decision_id, kind);
            debug!(kind, "request rejected");
            denied_response()
        }
    }
}

fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(AUTHORIZATION)?.to_str().ok()
}

/// The single outward-facing denial. Identical for every failure kind.
fn denied_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": gate::DENIED_MESSAGE })),
    )
        .into_response()
}
