use super::criteria::SearchCriteria;
use super::domain::{CriteriaRule, JobListing, LocationTier, MatchDecision};

pub(crate) const TITLE_REJECTION: &str = "Title doesn't match criteria";
pub(crate) const STAGE_REJECTION: &str = "Company stage not growth stage or seeking first VP Sales";

pub(crate) fn title_rejection(
    listing: &JobListing,
    criteria: &SearchCriteria,
) -> Option<MatchDecision> {
    let title = listing.title.to_lowercase();
    let accepted = criteria
        .acceptable_titles
        .iter()
        .any(|phrase| title.contains(&phrase.to_lowercase()));

    if accepted {
        None
    } else {
        Some(MatchDecision::rejected(CriteriaRule::Title, TITLE_REJECTION))
    }
}

pub(crate) fn location_tier(location: &str, criteria: &SearchCriteria) -> LocationTier {
    let location = location.to_lowercase();

    if location.is_empty() || contains_any(&location, &criteria.remote_tokens) {
        LocationTier::RemoteOrNevada
    } else if contains_any(&location, &criteria.california_tokens) {
        LocationTier::California
    } else {
        LocationTier::Relocation
    }
}

pub(crate) fn compensation_rejection(
    listing: &JobListing,
    criteria: &SearchCriteria,
) -> Option<MatchDecision> {
    let tier = location_tier(&listing.location, criteria);
    let minimum = criteria.minimum_for(tier);
    if listing.salary_min >= minimum {
        return None;
    }

    let suffix = match tier {
        LocationTier::RemoteOrNevada => " for remote/Nevada",
        LocationTier::California => "",
        LocationTier::Relocation => " for out-of-state relocation",
    };
    let reason = format!(
        "Salary ${} below {} minimum{}",
        listing.salary_min,
        threshold_label(minimum),
        suffix
    );

    Some(MatchDecision::rejected(CriteriaRule::Compensation, reason).with_tier(tier))
}

pub(crate) fn stage_rejection(
    listing: &JobListing,
    criteria: &SearchCriteria,
) -> Option<MatchDecision> {
    // No stage asserted means nothing to disqualify on.
    if listing.company_stage.is_empty() {
        return None;
    }

    let stage = listing.company_stage.to_lowercase();
    if contains_any(&stage, &criteria.stage_keywords) {
        None
    } else {
        Some(MatchDecision::rejected(CriteriaRule::Stage, STAGE_REJECTION))
    }
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

fn threshold_label(amount: u64) -> String {
    if amount >= 1_000 && amount % 1_000 == 0 {
        format!("${}k", amount / 1_000)
    } else {
        format!("${amount}")
    }
}
