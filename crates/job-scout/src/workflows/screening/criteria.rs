use serde::{Deserialize, Serialize};

use super::domain::LocationTier;

/// Personal search criteria the screening rules are evaluated against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    pub acceptable_titles: Vec<String>,
    pub remote_tokens: Vec<String>,
    pub california_tokens: Vec<String>,
    pub remote_minimum: u64,
    pub california_minimum: u64,
    pub relocation_minimum: u64,
    pub stage_keywords: Vec<String>,
}

impl SearchCriteria {
    /// Growth-stage VP Sales search: remote, Nevada, or California at $170k,
    /// anywhere else only with a $250k base.
    pub fn standard() -> Self {
        Self {
            acceptable_titles: owned(&[
                "VP Sales",
                "VP of Sales",
                "Head of Sales",
                "VP Business Development",
                "VP, Sales",
                "VP - Sales",
                "Vice President Sales",
                "Vice President of Sales",
                "Sales VP",
                "Chief Revenue Officer",
            ]),
            remote_tokens: owned(&["remote", "nevada"]),
            // "ca" and "la" also hit "Canada" or "Atlanta"; kept as plain substrings.
            california_tokens: owned(&[
                "california",
                "ca",
                "sf",
                "san francisco",
                "los angeles",
                "la",
            ]),
            remote_minimum: 170_000,
            california_minimum: 170_000,
            relocation_minimum: 250_000,
            stage_keywords: owned(&[
                "growth",
                "series",
                "seed",
                "early stage",
                "1st hire",
                "first hire",
                "first vp",
                "1st vp",
                "scaling",
                "pre-series",
            ]),
        }
    }

    pub fn minimum_for(&self, tier: LocationTier) -> u64 {
        match tier {
            LocationTier::RemoteOrNevada => self.remote_minimum,
            LocationTier::California => self.california_minimum,
            LocationTier::Relocation => self.relocation_minimum,
        }
    }
}

impl Default for SearchCriteria {
    fn default() -> Self {
        Self::standard()
    }
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
