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

//! Signed audit trail for gate decisions.
//!
//! Every authentication decision emits exactly one structured record:
//! outcome, principal (on allow), and the internal failure kind (on deny).
//! The failure kind stays in this record; it is never part of the response
//! sent back across the trust boundary.

use serde::Serialize;
use tracing::info;

use crate::core::constants::audit;
use crate::core::crypto::CryptoSigner;

#[derive(Serialize)]
struct AuditEntry<'a> {
    decision_id: &'a str,
    timestamp: f64,
    outcome: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    principal: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    failure_kind: Option<&'a str>,
}

pub struct AuditLogger {
    signer: CryptoSigner,
}

impl AuditLogger {
    pub fn new(signer: CryptoSigner) -> Self {
        Self { signer }
    }

    pub fn record_allow(&self, decision_id: &str, principal: &str) {
        self.record(decision_id, "allow", Some(principal), None);
    }

    pub fn record_deny(&self, decision_id: &str, failure_kind: &'static str) {
        self.record(decision_id, "deny", None, Some(failure_kind));
    }

    fn record(
        &self,
        decision_id: &str,
        outcome: &str,
        principal: Option<&str>,
        failure_kind: Option<&str>,
    ) {
        let entry = AuditEntry {
            decision_id,
            timestamp: crate::utils::time::now(),
            outcome,
            principal,
            failure_kind,
        };

        // Canonicalize JSON for consistent signing
        let payload_str = serde_json::to_string(&entry).unwrap_or_default();
        let signature = self.signer.sign(payload_str.as_bytes());

        info!(
            target: audit::TARGET,
            signature = %signature,
            payload = %payload_str,
            "{}", audit::EVENT_AUTH_DECISION
        );
    }
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(CryptoSigner::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::fmt::MakeWriter;

    /// Shared in-memory writer so a test can read back what the subscriber
    /// formatted.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn lines(&self) -> Vec<serde_json::Value> {
            let buf = self.0.lock().unwrap();
            String::from_utf8_lossy(&buf)
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

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

    /// Run `f` under a JSON subscriber and return the (signature, payload)
    /// pairs of every record emitted to the audit target.
    fn audit_records<F: FnOnce()>(f: F) -> Vec<(String, String)> {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_writer(capture.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);

        capture
            .lines()
            .into_iter()
            .filter(|line| line["target"] == audit::TARGET)
            .map(|line| {
                (
                    line["fields"]["signature"].as_str().unwrap().to_string(),
                    line["fields"]["payload"].as_str().unwrap().to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_allow_emits_exactly_one_signed_record() {
        let signer = CryptoSigner::new();
        let logger = AuditLogger::new(signer.clone());

        let records = audit_records(|| logger.record_allow("d-1", "alice@example.com"));

        assert_eq!(records.len(), 1);
        let (signature, payload) = &records[0];
        assert!(signer.verify(payload.as_bytes(), signature));

        let entry: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(entry["outcome"], "allow");
        assert_eq!(entry["principal"], "alice@example.com");
        assert_eq!(entry["decision_id"], "d-1");
        assert!(entry.get("failure_kind").is_none());
    }

    #[test]
    fn test_deny_emits_exactly_one_record_with_the_kind() {
        let signer = CryptoSigner::new();
        let logger = AuditLogger::new(signer.clone());

        let records = audit_records(|| logger.record_deny("d-2", "expired_token"));

        assert_eq!(records.len(), 1);
        let (signature, payload) = &records[0];
        assert!(signer.verify(payload.as_bytes(), signature));

        let entry: serde_json::Value = serde_json::from_str(payload).unwrap();
        assert_eq!(entry["outcome"], "deny");
        assert_eq!(entry["failure_kind"], "expired_token");
        assert!(entry.get("principal").is_none());
    }

    #[test]
    fn test_edited_record_fails_signature_verification() {
        let signer = CryptoSigner::new();
        let logger = AuditLogger::new(signer.clone());

        let records = audit_records(|| logger.record_deny("d-3", "invalid_signature"));
        let (signature, payload) = &records[0];

        let edited = payload.replace("deny", "allow");
        assert!(!signer.verify(edited.as_bytes(), signature));
    }
}
