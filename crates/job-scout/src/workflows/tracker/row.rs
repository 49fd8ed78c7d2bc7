use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::NEW_ROW_STATUS;
use crate::workflows::screening::DatedListing;

/// One appended tracker line, in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrackerRow {
    pub date_added: NaiveDate,
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub stage: String,
    pub status: String,
    pub applied_date: String,
    pub notes: String,
    pub url: String,
}

impl TrackerRow {
    /// Row for a freshly accepted listing. `notes` carries the outreach
    /// draft when one exists, otherwise the company description.
    pub fn from_listing(dated: &DatedListing, notes: Option<&str>) -> Self {
        let listing = &dated.listing;
        Self {
            date_added: dated.date_added,
            company: listing.company_name.clone(),
            position: listing.title.clone(),
            location: listing.location.clone(),
            salary: format_salary(listing.salary_min),
            stage: listing.company_stage.clone(),
            status: NEW_ROW_STATUS.to_string(),
            applied_date: String::new(),
            notes: notes
                .map(str::to_string)
                .unwrap_or_else(|| listing.company_description.clone()),
            url: listing.job_url.clone(),
        }
    }

    pub fn cells(&self) -> [String; 10] {
        [
            self.date_added.format("%Y-%m-%d").to_string(),
            self.company.clone(),
            self.position.clone(),
            self.location.clone(),
            self.salary.clone(),
            self.stage.clone(),
            self.status.clone(),
            self.applied_date.clone(),
            self.notes.clone(),
            self.url.clone(),
        ]
    }
}

/// Row as read back from the tracker. Values stay textual since users edit
/// the sheet by hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedApplication {
    pub date_added: String,
    pub company: String,
    pub position: String,
    pub location: String,
    pub salary: String,
    pub stage: String,
    pub status: String,
    pub applied_date: String,
    pub notes: String,
    pub url: String,
}

impl TrackedApplication {
    /// Map cells to fields by header name; unknown headers are ignored and
    /// missing cells stay empty.
    pub fn from_cells<H, C>(headers: &[H], cells: &[C]) -> Self
    where
        H: AsRef<str>,
        C: AsRef<str>,
    {
        let mut application = Self::default();
        for (header, cell) in headers.iter().zip(cells.iter()) {
            let value = cell.as_ref().to_string();
            match header.as_ref().trim() {
                "Date Added" => application.date_added = value,
                "Company" => application.company = value,
                "Position" => application.position = value,
                "Location" => application.location = value,
                "Salary" => application.salary = value,
                "Stage" => application.stage = value,
                "Status" => application.status = value,
                "Applied Date" | "Email Sent" => application.applied_date = value,
                "Notes" | "Email" => application.notes = value,
                "URL" => application.url = value,
                _ => {}
            }
        }
        application
    }
}

impl From<&TrackerRow> for TrackedApplication {
    fn from(row: &TrackerRow) -> Self {
        let [date_added, company, position, location, salary, stage, status, applied_date, notes, url] =
            row.cells();
        Self {
            date_added,
            company,
            position,
            location,
            salary,
            stage,
            status,
            applied_date,
            notes,
            url,
        }
    }
}

/// `$` followed by the amount with comma thousands separators.
pub fn format_salary(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
