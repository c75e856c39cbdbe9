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

//! Token claims.
//!
//! Deserialization is deliberately lenient (`exp` optional, `sub` defaulting
//! to empty): the validator performs its own ordered presence checks so that
//! a missing claim is reported at the right step, not as a parse failure.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Principal identifier
    #[serde(default)]
    pub sub: String,
    /// Issuer of the token
    #[serde(default)]
    pub iss: String,
    /// Issued-at, Unix seconds
    #[serde(default)]
    pub iat: u64,
    /// Expiry, Unix seconds; exclusive (a token is invalid at exactly `exp`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    /// Role claims assigned to the principal
    #[serde(default)]
    pub roles: Vec<String>,
}
