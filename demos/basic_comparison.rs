//! Basic clause comparison flow against stub model components.

use anyhow::Result;
use covenant::{
    ChatJudge, ClauseComparator, DEFAULT_MAX_CHUNK_CHARS, EmbeddingClient, SegmentMode, Segmenter,
    summarize,
};

#[tokio::main]
async fn main() -> Result<()> {
    let bank = "1. Payment is due within thirty days of the invoice date.\n\
                2. All disputes are settled by binding arbitration.";
    let partner = "1. Payment is due within thirty days of the invoice date.\n\
                   2. Disputes are heard by the courts of Delaware.";

    let segmenter = Segmenter::new(SegmentMode::Clause, DEFAULT_MAX_CHUNK_CHARS);
    let comparator = ClauseComparator::new(EmbeddingClient::stub(), ChatJudge::stub());

    let records = comparator
        .compare(segmenter.segment(bank), segmenter.segment(partner))
        .await?;

    for record in &records {
        println!("[{}] {}", record.compliance, record.bank_clause);
    }

    let summary = summarize(&records);
    println!("{} of {} clauses compliant", summary.compliant, summary.total);

    Ok(())
}
