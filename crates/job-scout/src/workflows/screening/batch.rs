use serde::Serialize;

use super::domain::{JobListing, MatchDecision};
use super::CriteriaEngine;

/// Listing paired with the decision it received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenedListing {
    pub listing: JobListing,
    pub decision: MatchDecision,
}

/// Partitioned result of screening a batch, each side in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchScreening {
    pub matched: Vec<ScreenedListing>,
    pub rejected: Vec<ScreenedListing>,
    pub matched_count: usize,
    pub rejected_count: usize,
}

impl BatchScreening {
    pub fn total(&self) -> usize {
        self.matched_count + self.rejected_count
    }
}

pub(crate) fn partition<I>(engine: &CriteriaEngine, listings: I) -> BatchScreening
where
    I: IntoIterator<Item = JobListing>,
{
    let mut screening = BatchScreening::default();

    for listing in listings {
        let decision = engine.evaluate(&listing);
        let entry = ScreenedListing { listing, decision };
        if entry.decision.is_match {
            screening.matched.push(entry);
        } else {
            screening.rejected.push(entry);
        }
    }

    screening.matched_count = screening.matched.len();
    screening.rejected_count = screening.rejected.len();
    screening
}
