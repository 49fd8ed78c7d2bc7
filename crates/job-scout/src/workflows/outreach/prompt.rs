use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::workflows::screening::JobListing;
use crate::workflows::tracker::format_salary;

/// Background the drafts are written from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub name: String,
    pub highlights: Vec<String>,
    pub positioning: String,
}

impl CandidateProfile {
    pub fn standard() -> Self {
        Self {
            name: "JR".to_string(),
            highlights: vec![
                "15+ years B2B SaaS VP Sales experience".to_string(),
                "Scaled organizations from $0 to $20M ARR".to_string(),
                "First US hire at Fortem International, launched multiple trade shows, managed teams across 3 regions".to_string(),
                "Founded Young Health Recruitment with exclusive Qatar 2022 FIFA World Cup partnership".to_string(),
                "Currently running Jotia Group (10-person software dev team in Nigeria)".to_string(),
                "Based in Las Vegas, new father".to_string(),
            ],
            positioning: "Anti-guru operator who shares actual playbooks rather than motivation"
                .to_string(),
        }
    }
}

impl Default for CandidateProfile {
    fn default() -> Self {
        Self::standard()
    }
}

const EMAIL_GUIDELINES: &[&str] = &[
    "Keep it short (150-200 words max)",
    "Show you've done research on the company",
    "Lead with a specific achievement or relevant experience",
    "Include a clear ask (brief call, coffee)",
    "Authentic tone - not salesy",
    "Reference that you bring actual playbooks and frameworks, not theory",
];

/// Rendered drafting request for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutreachPrompt {
    company_name: String,
    body: String,
}

impl OutreachPrompt {
    pub fn for_listing(listing: &JobListing, profile: &CandidateProfile) -> Self {
        let company = or_placeholder(&listing.company_name, "Company");
        let position = or_placeholder(&listing.title, "Role");
        let description = or_placeholder(&listing.company_description, "N/A");
        let location = or_placeholder(&listing.location, "TBD");

        let mut body = String::new();
        let _ = writeln!(
            body,
            "Draft a compelling but authentic outreach email for {} to send to a hiring manager or recruiter at this company:",
            profile.name
        );
        body.push('\n');
        let _ = writeln!(body, "Company: {company}");
        let _ = writeln!(body, "Position: {position}");
        let _ = writeln!(body, "Company Description: {description}");
        let _ = writeln!(body, "Location: {location}");
        let _ = writeln!(body, "Salary Range: {}", format_salary(listing.salary_min));
        body.push('\n');

        let _ = writeln!(body, "{}'s Background:", profile.name);
        for highlight in &profile.highlights {
            let _ = writeln!(body, "- {highlight}");
        }
        let _ = writeln!(body, "- Positioning: \"{}\"", profile.positioning);
        body.push('\n');

        body.push_str("Email guidelines:\n");
        for guideline in EMAIL_GUIDELINES {
            let _ = writeln!(body, "- {guideline}");
        }
        body.push('\n');
        body.push_str("Draft the email now:");

        Self {
            company_name: company.to_string(),
            body,
        }
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn as_str(&self) -> &str {
        &self.body
    }
}

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.trim().is_empty() {
        placeholder
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_includes_listing_and_background() {
        let listing = JobListing {
            title: "Head of Sales".to_string(),
            company_name: "Acme".to_string(),
            salary_min: 210_000,
            location: "Remote".to_string(),
            company_stage: "Series A".to_string(),
            company_description: "Fleet telematics for mid-market logistics".to_string(),
            job_url: String::new(),
        };
        let prompt = OutreachPrompt::for_listing(&listing, &CandidateProfile::standard());
        let text = prompt.as_str();

        assert_eq!(prompt.company_name(), "Acme");
        assert!(text.contains("Company: Acme"));
        assert!(text.contains("Position: Head of Sales"));
        assert!(text.contains("Fleet telematics"));
        assert!(text.contains("Salary Range: $210,000"));
        assert!(text.contains("$0 to $20M ARR"));
        assert!(text.contains("150-200 words"));
        assert!(text.ends_with("Draft the email now:"));
    }

    #[test]
    fn prompt_fills_placeholders_for_blank_fields() {
        let prompt =
            OutreachPrompt::for_listing(&JobListing::default(), &CandidateProfile::standard());
        let text = prompt.as_str();

        assert!(text.contains("Company: Company"));
        assert!(text.contains("Company Description: N/A"));
        assert!(text.contains("Location: TBD"));
        assert!(text.contains("Salary Range: $0"));
    }
}
