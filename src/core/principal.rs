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

//! Principal and request-scoped authentication context.
//!
//! A `Principal` is the stored identity record this core reads but never
//! writes; an `AuthenticatedContext` is the ephemeral, per-request view
//! extracted from a validated token.

use serde::{Deserialize, Serialize};

/// Stored identity record: identifier, credential hash, assigned roles.
///
/// The credential hash is a PHC-format string (Argon2id); the cleartext
/// secret never appears in this structure or in any log line.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Principal {
    pub identifier: String,
    #[serde(skip_serializing, default)]
    pub credential_hash: String,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Principal {
    pub fn new(
        identifier: impl Into<String>,
        credential_hash: impl Into<String>,
        roles: Vec<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            credential_hash: credential_hash.into(),
            roles,
        }
    }
}

/// Request-scoped principal context extracted from a validated token.
///
/// Owned by the request gate for the lifetime of one request; attached to
/// the request extensions on allow and dropped with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedContext {
    pub principal: String,
    pub roles: Vec<String>,
    pub issued_at: u64,
    pub expires_at: u64,
}

impl AuthenticatedContext {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
