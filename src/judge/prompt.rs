//! Prompt assembly for the compliance judge.
//!
//! Every judgement request carries the same two worked examples so the model
//! sees one compliant and one non-compliant pair before the real question.

use genai::chat::{ChatMessage, ChatRequest};

/// System instructions for the compliance judge.
pub const SYSTEM_PROMPT: &str = "You are a legal compliance assistant. \
    Given a clause from a bank's Terms of Service (TOS) and a clause from a partner's TOS, \
    determine if the partner clause complies with the bank clause. \
    Always respond in JSON format with two fields: 'compliance' (one of 'compliant', 'non-compliant', 'missing') \
    and 'explanation' (a brief reason for your decision).";

const EXAMPLE_COMPLIANT_QUESTION: &str = "Bank TOS Clause: The borrower must maintain a minimum DSCR of 1.5x.\n\
    Partner TOS Clause: The borrower must maintain a minimum DSCR of 1.5x.\n\
    Does the partner clause comply with the bank clause?";

const EXAMPLE_COMPLIANT_ANSWER: &str =
    r#"{"compliance": "compliant", "explanation": "The partner clause matches the bank clause exactly."}"#;

const EXAMPLE_NON_COMPLIANT_QUESTION: &str = "Bank TOS Clause: The facility must be secured against the company's fixed assets.\n\
    Partner TOS Clause: The facility is unsecured.\n\
    Does the partner clause comply with the bank clause?";

const EXAMPLE_NON_COMPLIANT_ANSWER: &str =
    r#"{"compliance": "non-compliant", "explanation": "The partner clause does not require security against fixed assets."}"#;

/// Formats the question for one bank/partner clause pair.
pub fn judgement_question(bank_clause: &str, partner_clause: &str) -> String {
    format!(
        "Bank TOS Clause: {}\nPartner TOS Clause: {}\nDoes the partner clause comply with the bank clause?",
        bank_clause, partner_clause
    )
}

/// Builds the full chat request: system instructions, the two worked
/// examples, then the clause pair under judgement.
pub fn judgement_request(bank_clause: &str, partner_clause: &str) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(EXAMPLE_COMPLIANT_QUESTION),
        ChatMessage::assistant(EXAMPLE_COMPLIANT_ANSWER),
        ChatMessage::user(EXAMPLE_NON_COMPLIANT_QUESTION),
        ChatMessage::assistant(EXAMPLE_NON_COMPLIANT_ANSWER),
        ChatMessage::user(judgement_question(bank_clause, partner_clause)),
    ])
}
