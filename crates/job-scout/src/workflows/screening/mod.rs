//! Criteria matching for incoming job listings.
//!
//! Rules run in a fixed order (title, compensation, company stage) and the
//! first failing rule supplies the single reason reported to the user.

mod batch;
mod criteria;
pub mod domain;
mod rules;

pub use batch::{BatchScreening, ScreenedListing};
pub use criteria::SearchCriteria;
pub use domain::{
    CriteriaRule, DatedListing, JobListing, LocationTier, MatchDecision, MATCH_REASON,
};

use std::sync::OnceLock;
use tracing::debug;

static STANDARD_ENGINE: OnceLock<CriteriaEngine> = OnceLock::new();

/// Stateless evaluator applying a set of search criteria to listings.
#[derive(Debug, Clone, Default)]
pub struct CriteriaEngine {
    criteria: SearchCriteria,
}

impl CriteriaEngine {
    pub fn new(criteria: SearchCriteria) -> Self {
        Self { criteria }
    }

    pub fn standard() -> Self {
        Self::new(SearchCriteria::standard())
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn evaluate(&self, listing: &JobListing) -> MatchDecision {
        let rejection = rules::title_rejection(listing, &self.criteria)
            .or_else(|| rules::compensation_rejection(listing, &self.criteria))
            .or_else(|| rules::stage_rejection(listing, &self.criteria));

        match rejection {
            Some(decision) => {
                debug!(title = %listing.title, reason = %decision.reason, "listing rejected");
                decision
            }
            None => MatchDecision::matched(),
        }
    }

    pub fn location_tier(&self, location: &str) -> LocationTier {
        rules::location_tier(location, &self.criteria)
    }

    pub fn filter_batch<I>(&self, listings: I) -> BatchScreening
    where
        I: IntoIterator<Item = JobListing>,
    {
        batch::partition(self, listings)
    }
}

/// Screen one listing against the standard criteria.
pub fn evaluate(listing: &JobListing) -> MatchDecision {
    standard_engine().evaluate(listing)
}

/// Screen a batch against the standard criteria.
pub fn filter_batch<I>(listings: I) -> BatchScreening
where
    I: IntoIterator<Item = JobListing>,
{
    standard_engine().filter_batch(listings)
}

fn standard_engine() -> &'static CriteriaEngine {
    STANDARD_ENGINE.get_or_init(CriteriaEngine::standard)
}
