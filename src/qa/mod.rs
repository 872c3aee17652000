//! Plain-English advisory over finished analysis runs.
//!
//! A [`ResultsAdvisor`] answers follow-up questions about a set of
//! [`ComparisonRecord`]s and restates individual results for non-technical
//! readers, through the same chat backend the judge uses. In stub mode it
//! derives deterministic answers from the records themselves, so the chat
//! endpoint keeps working without provider credentials.
//!
//! [`ComparisonRecord`]: crate::compare::ComparisonRecord

mod advisor;
mod error;


pub use advisor::{AdvisorConfig, ResultsAdvisor};
pub use error::QaError;
