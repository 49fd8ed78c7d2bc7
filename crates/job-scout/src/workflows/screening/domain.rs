use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::workflows::intake::ListingFields;

/// Reason attached to every listing that clears all three rules.
pub const MATCH_REASON: &str = "✓ Matches all criteria";

/// Candidate opportunity as submitted for screening.
///
/// Deserializing goes through the bulk-intake normalizer, so a single JSON
/// listing accepts the same salary strings, nulls and missing fields as a
/// pasted batch record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ListingFields")]
pub struct JobListing {
    pub title: String,
    pub company_name: String,
    pub salary_min: u64,
    pub location: String,
    pub company_stage: String,
    pub company_description: String,
    pub job_url: String,
}

impl JobListing {
    /// Copy of the listing stamped with the day it entered the tracker.
    pub fn dated(&self, date_added: NaiveDate) -> DatedListing {
        DatedListing {
            listing: self.clone(),
            date_added,
        }
    }

    /// Short human label used in batch reports, e.g. `Acme — VP Sales`.
    pub fn label(&self) -> String {
        match (self.company_name.trim(), self.title.trim()) {
            ("", "") => "untitled listing".to_string(),
            ("", title) => title.to_string(),
            (company, "") => company.to_string(),
            (company, title) => format!("{company} — {title}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatedListing {
    pub listing: JobListing,
    pub date_added: NaiveDate,
}

/// Rule that produced a rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaRule {
    Title,
    Compensation,
    Stage,
}

impl CriteriaRule {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Compensation => "Compensation",
            Self::Stage => "Company stage",
        }
    }
}

/// Salary band a location falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationTier {
    RemoteOrNevada,
    California,
    Relocation,
}

impl LocationTier {
    pub const fn label(self) -> &'static str {
        match self {
            Self::RemoteOrNevada => "Remote / Nevada",
            Self::California => "California",
            Self::Relocation => "Out-of-state relocation",
        }
    }
}

/// Outcome of screening one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchDecision {
    pub is_match: bool,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<CriteriaRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tier: Option<LocationTier>,
}

impl MatchDecision {
    pub fn matched() -> Self {
        Self {
            is_match: true,
            reason: MATCH_REASON.to_string(),
            rule: None,
            tier: None,
        }
    }

    pub fn rejected(rule: CriteriaRule, reason: impl Into<String>) -> Self {
        Self {
            is_match: false,
            reason: reason.into(),
            rule: Some(rule),
            tier: None,
        }
    }

    pub(crate) fn with_tier(mut self, tier: LocationTier) -> Self {
        self.tier = Some(tier);
        self
    }
}
