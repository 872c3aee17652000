//! Clause compliance judgement.
//!
//! A [`ClauseJudge`] decides whether a partner clause complies with a bank
//! clause. [`ChatJudge`] asks an LLM through the genai client; in stub mode it
//! scores lexical overlap instead, for tests/examples without credentials.

mod chat;
mod error;
pub mod prompt;

#[cfg(any(test, feature = "mock"))]
mod mock;


pub use chat::{ChatJudge, JudgeConfig};
pub use error::JudgeError;

#[cfg(any(test, feature = "mock"))]
pub use mock::MockJudge;

use serde::{Deserialize, Serialize};

/// Compliance verdict for a single bank clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// The partner clause satisfies the bank clause.
    Compliant,
    /// The partner clause contradicts or weakens the bank clause.
    NonCompliant,
    /// No partner clause matched the bank clause.
    Missing,
    /// The judge's answer could not be parsed.
    Unknown,
}

impl Verdict {
    /// Wire name of the verdict ("compliant", "non-compliant", ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Compliant => "compliant",
            Verdict::NonCompliant => "non-compliant",
            Verdict::Missing => "missing",
            Verdict::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parsed judge output for one bank/partner clause pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JudgeDecision {
    /// Compliance verdict.
    pub compliance: Verdict,
    /// Brief reason for the verdict.
    pub explanation: String,
}

/// Decides whether a partner clause complies with a bank clause.
pub trait ClauseJudge: Send + Sync {
    /// Judges one clause pair.
    fn judge(
        &self,
        bank_clause: &str,
        partner_clause: &str,
    ) -> impl std::future::Future<Output = Result<JudgeDecision, JudgeError>> + Send;
}
