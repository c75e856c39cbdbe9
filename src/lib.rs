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

//! keygate: a JWT token authentication gate.
//!
//! This library provides the core logic for bearer-token authentication
//! in HTTP services: constant-time credential verification, signed token
//! issuance and validation, and an axum middleware gate that attaches an
//! authenticated principal context to each allowed request.
//!
//! All components are assembled by explicit constructor injection; the
//! signing key is an immutable value created once at startup and shared
//! read-only across requests.

pub mod authenticator;
pub mod config;
pub mod core;
pub mod credential;
pub mod gate;
pub mod store;
pub mod token;
pub mod utils;

pub use authenticator::{Authenticator, LoginOutcome};
pub use config::Config;
pub use crate::core::audit::AuditLogger;
pub use crate::core::crypto::CryptoSigner;
pub use crate::core::errors::AuthError;
pub use crate::core::principal::{AuthenticatedContext, Principal};
pub use credential::CredentialVerifier;
pub use gate::{authenticate, GateDecision, RequestGate};
pub use store::{MemoryPrincipalStore, PrincipalStore};
pub use token::{Claims, TokenIssuer, TokenValidator};
