//! Job-search assistant: criteria screening, batch intake, spreadsheet
//! tracking and outreach drafting.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
