use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::error::JudgeError;
use super::{ClauseJudge, JudgeDecision, Verdict};

#[derive(Clone, Default)]
/// Scripted mock judge that records every clause pair it sees.
///
/// Decisions are served from a queue in push order. When the queue is empty
/// the mock falls back to a fixed compliant decision.
pub struct MockJudge {
    script: Arc<Mutex<VecDeque<JudgeDecision>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    failing: Arc<AtomicBool>,
}

impl MockJudge {
    /// Creates a mock with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a decision for the next unanswered judgement.
    pub fn push_decision(&self, compliance: Verdict, explanation: impl Into<String>) {
        self.script.lock().push_back(JudgeDecision {
            compliance,
            explanation: explanation.into(),
        });
    }

    /// Returns every `(bank_clause, partner_clause)` pair judged so far.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    /// Returns the number of judgements so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Makes every subsequent judgement fail (or succeed again) for testing
    /// error handling paths.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl ClauseJudge for MockJudge {
    async fn judge(
        &self,
        bank_clause: &str,
        partner_clause: &str,
    ) -> Result<JudgeDecision, JudgeError> {
        self.calls
            .lock()
            .push((bank_clause.to_string(), partner_clause.to_string()));

        if self.failing.load(Ordering::SeqCst) {
            return Err(JudgeError::RequestFailed {
                reason: "mock judge failure".to_string(),
            });
        }

        Ok(self.script.lock().pop_front().unwrap_or(JudgeDecision {
            compliance: Verdict::Compliant,
            explanation: "mock decision".to_string(),
        }))
    }
}
