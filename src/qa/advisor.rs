use futures_util::StreamExt;
use genai::chat::{ChatMessage, ChatOptions, ChatRequest, ChatStreamEvent};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error, warn};

use crate::compare::ComparisonRecord;
use crate::constants::{ADVISOR_MAX_TOKENS, DEFAULT_JUDGE_MODEL};
use crate::judge::Verdict;
use crate::report::summarize;

use super::error::QaError;

/// Buffered chunks between the provider stream and the consumer.
const STREAM_CHANNEL_CAPACITY: usize = 32;

pub(crate) const ANSWER_SYSTEM_PROMPT: &str =
    "You are a helpful assistant who answers questions about TOS compliance analysis results.";

pub(crate) const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a helpful assistant who explains legal compliance results in simple terms.";

/// Configuration for [`ResultsAdvisor`].
#[derive(Debug, Clone)]
pub struct AdvisorConfig {
    /// Chat model identifier. Defaults to the judge's model.
    pub model: String,
    /// If true, answer from the records themselves instead of calling the LLM.
    pub testing_stub: bool,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_JUDGE_MODEL.to_string(),
            testing_stub: false,
        }
    }
}

impl AdvisorConfig {
    /// Creates a config for a chat model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no credentials; deterministic answers).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Validates required fields.
    pub fn validate(&self) -> Result<(), QaError> {
        if self.model.trim().is_empty() {
            return Err(QaError::InvalidConfig {
                reason: "model is required".to_string(),
            });
        }
        Ok(())
    }
}

enum AdvisorBackend {
    Chat { client: genai::Client },
    Stub,
}

/// LLM-backed Q&A over comparison results (supports stub mode).
///
/// Answers run at temperature zero, like the judge, so the same question
/// over the same records gets the same answer.
pub struct ResultsAdvisor {
    backend: AdvisorBackend,
    config: AdvisorConfig,
}

impl std::fmt::Debug for ResultsAdvisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultsAdvisor")
            .field(
                "backend",
                &match &self.backend {
                    AdvisorBackend::Chat { .. } => "Chat",
                    AdvisorBackend::Stub => "Stub",
                },
            )
            .field("model", &self.config.model)
            .finish()
    }
}

impl ResultsAdvisor {
    /// Builds the advisor from a config (stub mode is supported).
    ///
    /// The genai client resolves provider credentials from the environment,
    /// the same way the judge does.
    pub fn load(config: AdvisorConfig) -> Result<Self, QaError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Advisor running in STUB mode (testing only)");
            return Ok(Self {
                backend: AdvisorBackend::Stub,
                config,
            });
        }

        debug!(model = %config.model, "Results advisor ready");

        Ok(Self {
            backend: AdvisorBackend::Chat {
                client: genai::Client::default(),
            },
            config,
        })
    }

    /// Creates a stub advisor.
    pub fn stub() -> Self {
        Self {
            backend: AdvisorBackend::Stub,
            config: AdvisorConfig::stub(),
        }
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, AdvisorBackend::Stub)
    }

    /// Returns the configured chat model.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Restates one comparison result in plain English.
    pub async fn explain(&self, record: &ComparisonRecord) -> Result<String, QaError> {
        let context = serde_json::to_string_pretty(record)?;

        match &self.backend {
            AdvisorBackend::Chat { client } => {
                self.ask(client, EXPLAIN_SYSTEM_PROMPT, explain_prompt(&context))
                    .await
            }
            AdvisorBackend::Stub => Ok(self.stub_explain(record)),
        }
    }

    /// Answers a question about a finished run, returning the full reply.
    pub async fn answer(
        &self,
        records: &[ComparisonRecord],
        question: &str,
    ) -> Result<String, QaError> {
        let context = serde_json::to_string_pretty(records)?;

        match &self.backend {
            AdvisorBackend::Chat { client } => {
                self.ask(client, ANSWER_SYSTEM_PROMPT, answer_prompt(&context, question))
                    .await
            }
            AdvisorBackend::Stub => Ok(self.stub_answer(records, question)),
        }
    }

    /// Streaming form of [`answer`](Self::answer): yields the reply as text
    /// deltas. Setup failures surface as the outer `Err`; mid-stream provider
    /// failures arrive as an `Err` item and end the stream.
    pub async fn answer_stream(
        &self,
        records: &[ComparisonRecord],
        question: &str,
    ) -> Result<ReceiverStream<Result<String, QaError>>, QaError> {
        let context = serde_json::to_string_pretty(records)?;
        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);

        match &self.backend {
            AdvisorBackend::Chat { client } => {
                let request = ChatRequest::new(vec![
                    ChatMessage::system(ANSWER_SYSTEM_PROMPT),
                    ChatMessage::user(answer_prompt(&context, question)),
                ]);
                let options = advisor_options();

                let resp = client
                    .exec_chat_stream(&self.config.model, request, Some(&options))
                    .await
                    .map_err(|e| QaError::RequestFailed {
                        reason: e.to_string(),
                    })?;
                let mut stream = resp.stream;

                tokio::spawn(async move {
                    while let Some(event) = stream.next().await {
                        match event {
                            Ok(ChatStreamEvent::Chunk(chunk)) => {
                                if chunk.content.is_empty() {
                                    continue;
                                }
                                if tx.send(Ok(chunk.content)).await.is_err() {
                                    break;
                                }
                            }
                            Ok(ChatStreamEvent::End(_)) => break,
                            Ok(_) => {}
                            Err(e) => {
                                error!("Advisor stream error: {}", e);
                                let _ = tx
                                    .send(Err(QaError::RequestFailed {
                                        reason: e.to_string(),
                                    }))
                                    .await;
                                break;
                            }
                        }
                    }
                });
            }
            AdvisorBackend::Stub => {
                let answer = self.stub_answer(records, question);

                tokio::spawn(async move {
                    for chunk in split_stub_chunks(&answer) {
                        if tx.send(Ok(chunk)).await.is_err() {
                            break;
                        }
                    }
                });
            }
        }

        Ok(ReceiverStream::new(rx))
    }

    async fn ask(
        &self,
        client: &genai::Client,
        system: &str,
        prompt: String,
    ) -> Result<String, QaError> {
        let request = ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(prompt)]);
        let options = advisor_options();

        let resp = client
            .exec_chat(&self.config.model, request, Some(&options))
            .await
            .map_err(|e| QaError::RequestFailed {
                reason: e.to_string(),
            })?;

        let content = resp.first_text().ok_or(QaError::EmptyResponse)?;
        Ok(content.trim().to_string())
    }

    fn stub_explain(&self, record: &ComparisonRecord) -> String {
        let gist = match record.compliance {
            Verdict::Compliant => "is satisfied by the partner's terms",
            Verdict::NonCompliant => "is not satisfied by the partner's terms",
            Verdict::Missing => "has no counterpart in the partner's terms",
            Verdict::Unknown => "could not be conclusively assessed",
        };

        format!(
            "The bank clause \"{}\" {}. {}",
            record.bank_clause, gist, record.explanation
        )
    }

    fn stub_answer(&self, records: &[ComparisonRecord], question: &str) -> String {
        let summary = summarize(records);

        format!(
            "For \"{}\": the analysis covered {} bank clauses; {} compliant, \
             {} non-compliant, {} missing, {} unknown.",
            question.trim(),
            summary.total,
            summary.compliant,
            summary.non_compliant,
            summary.missing,
            summary.unknown
        )
    }
}

fn advisor_options() -> ChatOptions {
    ChatOptions::default()
        .with_temperature(0.0)
        .with_max_tokens(ADVISOR_MAX_TOKENS)
}

pub(crate) fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "Here is the compliance analysis result in JSON:\n{}\n\nUser question: {}\nAnswer in plain English.",
        context, question
    )
}

pub(crate) fn explain_prompt(context: &str) -> String {
    format!(
        "Given this compliance result in JSON:\n{}\nExplain the result in plain English for a non-technical user.",
        context
    )
}

/// Word-boundary chunks for the stub stream, separators kept so the
/// concatenation reproduces the answer exactly.
pub(crate) fn split_stub_chunks(answer: &str) -> Vec<String> {
    answer.split_inclusive(' ').map(str::to_string).collect()
}
