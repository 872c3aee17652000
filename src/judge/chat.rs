use genai::chat::{ChatOptions, ChatResponseFormat};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_JUDGE_MODEL, JUDGE_MAX_TOKENS};

use super::error::JudgeError;
use super::prompt;
use super::{ClauseJudge, JudgeDecision, Verdict};

/// Lexical overlap at or above this counts as compliant in stub mode.
const STUB_COMPLIANT_THRESHOLD: f32 = 0.5;

/// Configuration for [`ChatJudge`].
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Chat model identifier.
    pub model: String,
    /// If true, judge by lexical overlap instead of calling the LLM.
    pub testing_stub: bool,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_JUDGE_MODEL.to_string(),
            testing_stub: false,
        }
    }
}

impl JudgeConfig {
    /// Creates a config for a chat model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no credentials; deterministic verdicts).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields.
    pub fn validate(&self) -> Result<(), JudgeError> {
        if self.model.trim().is_empty() {
            return Err(JudgeError::InvalidConfig {
                reason: "model is required".to_string(),
            });
        }
        Ok(())
    }
}

enum JudgeBackend {
    Chat { client: genai::Client },
    Stub,
}

/// LLM-backed compliance judge (supports stub mode).
///
/// Judgements run at temperature zero so repeated runs over the same
/// documents produce the same verdicts.
pub struct ChatJudge {
    backend: JudgeBackend,
    config: JudgeConfig,
}

impl std::fmt::Debug for ChatJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatJudge")
            .field(
                "backend",
                &match &self.backend {
                    JudgeBackend::Chat { .. } => "Chat",
                    JudgeBackend::Stub => "Stub",
                },
            )
            .field("model", &self.config.model)
            .finish()
    }
}

impl ChatJudge {
    /// Builds the judge from a config (stub mode is supported).
    ///
    /// The genai client resolves provider credentials from the environment,
    /// the same way the gateway's chat path does.
    pub fn load(config: JudgeConfig) -> Result<Self, JudgeError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Judge running in STUB mode (testing only)");
            return Ok(Self {
                backend: JudgeBackend::Stub,
                config,
            });
        }

        debug!(model = %config.model, "Compliance judge ready");

        Ok(Self {
            backend: JudgeBackend::Chat {
                client: genai::Client::default(),
            },
            config,
        })
    }

    /// Creates a stub judge.
    pub fn stub() -> Self {
        Self {
            backend: JudgeBackend::Stub,
            config: JudgeConfig::stub(),
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, JudgeBackend::Stub)
    }

    /// Returns the configured chat model.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    async fn judge_with_chat(
        &self,
        client: &genai::Client,
        bank_clause: &str,
        partner_clause: &str,
    ) -> Result<JudgeDecision, JudgeError> {
        let request = prompt::judgement_request(bank_clause, partner_clause);
        let options = ChatOptions::default()
            .with_temperature(0.0)
            .with_max_tokens(JUDGE_MAX_TOKENS)
            .with_response_format(ChatResponseFormat::JsonMode);

        let resp = client
            .exec_chat(&self.config.model, request, Some(&options))
            .await
            .map_err(|e| JudgeError::RequestFailed {
                reason: e.to_string(),
            })?;

        let content = resp.first_text().ok_or(JudgeError::EmptyResponse)?;
        Ok(decision_from_response(content))
    }

    fn judge_stub(&self, bank_clause: &str, partner_clause: &str) -> JudgeDecision {
        let overlap = lexical_overlap(bank_clause, partner_clause);

        debug!(overlap = overlap, "Judged clause pair (stub)");

        if overlap >= STUB_COMPLIANT_THRESHOLD {
            JudgeDecision {
                compliance: Verdict::Compliant,
                explanation: format!(
                    "The partner clause covers the bank clause (overlap {:.2}).",
                    overlap
                ),
            }
        } else {
            JudgeDecision {
                compliance: Verdict::NonCompliant,
                explanation: format!(
                    "The partner clause diverges from the bank clause (overlap {:.2}).",
                    overlap
                ),
            }
        }
    }
}

impl ClauseJudge for ChatJudge {
    async fn judge(
        &self,
        bank_clause: &str,
        partner_clause: &str,
    ) -> Result<JudgeDecision, JudgeError> {
        match &self.backend {
            JudgeBackend::Chat { client } => {
                self.judge_with_chat(client, bank_clause, partner_clause).await
            }
            JudgeBackend::Stub => Ok(self.judge_stub(bank_clause, partner_clause)),
        }
    }
}

/// Parses the model's JSON answer. Anything unparseable becomes an `unknown`
/// verdict carrying the raw text, so one bad answer never aborts a run.
pub(crate) fn decision_from_response(content: &str) -> JudgeDecision {
    let trimmed = content.trim();

    match serde_json::from_str::<JudgeDecision>(trimmed) {
        Ok(decision) => decision,
        Err(e) => {
            warn!(error = %e, "Judge returned an unparseable verdict");
            JudgeDecision {
                compliance: Verdict::Unknown,
                explanation: trimmed.to_string(),
            }
        }
    }
}

/// Word-overlap score between two clauses, in `[0, 1]`.
///
/// Recall of the bank clause's significant words is weighted over plain
/// Jaccard similarity, then squashed so mid-range overlaps separate cleanly.
fn lexical_overlap(bank_clause: &str, partner_clause: &str) -> f32 {
    use std::collections::HashSet;

    let stop_words: HashSet<&str> = [
        "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has",
        "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "must",
        "shall", "can", "need", "dare", "ought", "used", "to", "of", "in", "for", "on", "with",
        "at", "by", "from", "as", "into", "through", "during", "before", "after", "above",
        "below", "between", "under", "again", "further", "then", "once", "here", "there",
        "when", "where", "why", "how", "all", "each", "few", "more", "most", "other", "some",
        "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very", "just",
        "and", "but", "if", "or", "because", "until", "while", "what", "which", "who", "whom",
        "this", "that", "these", "those", "am", "it", "its",
    ]
    .into_iter()
    .collect();

    let bank_lower = bank_clause.to_lowercase();
    let bank_words: HashSet<&str> = bank_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !stop_words.contains(w))
        .collect();

    let partner_lower = partner_clause.to_lowercase();
    let partner_words: HashSet<&str> = partner_lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !stop_words.contains(w))
        .collect();

    if bank_words.is_empty() {
        let len_ratio = (bank_clause.len().min(partner_clause.len()) as f32)
            / (bank_clause.len().max(partner_clause.len()).max(1) as f32);
        return len_ratio * 0.3;
    }

    let matches = bank_words.intersection(&partner_words).count();
    let recall = matches as f32 / bank_words.len() as f32;

    let union = bank_words.union(&partner_words).count();
    let jaccard = if union > 0 {
        matches as f32 / union as f32
    } else {
        0.0
    };

    let base_score = 0.6 * recall + 0.4 * jaccard;

    let normalized = 1.0 / (1.0 + (-8.0 * (base_score - 0.5)).exp());

    normalized.clamp(0.0, 1.0)
}
