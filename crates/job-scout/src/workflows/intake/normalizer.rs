use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::workflows::screening::JobListing;

/// Raw value of one field in an incoming record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    fn to_text(&self) -> String {
        match self {
            FieldValue::Text(text) => text.clone(),
            FieldValue::Number(number) => number.to_string(),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value.into())
    }
}

/// String-keyed record as produced by the JSON or CSV parser.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// JSON object read with the same field rules as a bulk record: nulls are
/// dropped, strings and numbers kept, anything else carried as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingFields(pub FieldMap);

impl<'de> Deserialize<'de> for ListingFields {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = serde_json::Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self(fields_from_object(object)))
    }
}

impl From<ListingFields> for JobListing {
    fn from(fields: ListingFields) -> Self {
        normalize(&fields.0)
    }
}

pub(crate) fn fields_from_object(object: serde_json::Map<String, Value>) -> FieldMap {
    object
        .into_iter()
        .filter_map(|(key, value)| {
            let field = match value {
                Value::Null => return None,
                Value::String(text) => FieldValue::Text(text),
                Value::Number(number) => FieldValue::Number(number),
                other => FieldValue::Text(other.to_string()),
            };
            Some((key, field))
        })
        .collect()
}

/// Build a listing from a parsed record. Keys are matched exactly; missing
/// fields become empty strings or zero.
pub fn normalize(fields: &FieldMap) -> JobListing {
    JobListing {
        title: text_field(fields, "title"),
        company_name: text_field(fields, "company_name"),
        salary_min: fields.get("salary_min").map(coerce_salary).unwrap_or(0),
        location: text_field(fields, "location"),
        company_stage: text_field(fields, "company_stage"),
        company_description: text_field(fields, "company_description"),
        job_url: text_field(fields, "job_url"),
    }
}

fn text_field(fields: &FieldMap, key: &str) -> String {
    fields.get(key).map(FieldValue::to_text).unwrap_or_default()
}

pub(crate) fn coerce_salary(value: &FieldValue) -> u64 {
    match value {
        FieldValue::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().map(truncate_amount))
            .unwrap_or(0),
        FieldValue::Text(text) => parse_currency(text).unwrap_or(0),
    }
}

/// Parse amounts such as `180000`, `$180,000` or `180000.50`.
pub(crate) fn parse_currency(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',') && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    if let Ok(amount) = cleaned.parse::<u64>() {
        return Some(amount);
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .map(truncate_amount)
}

fn truncate_amount(amount: f64) -> u64 {
    if amount.is_finite() && amount > 0.0 {
        amount.trunc() as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> FieldMap {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect()
    }

    #[test]
    fn missing_fields_default_to_empty_and_zero() {
        let listing = normalize(&FieldMap::new());
        assert_eq!(listing, JobListing::default());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let listing = normalize(&record(&[
            ("Title", "VP Sales".into()),
            ("title", "Head of Sales".into()),
        ]));
        assert_eq!(listing.title, "Head of Sales");
    }

    #[test]
    fn salary_accepts_numbers_and_decorated_strings() {
        assert_eq!(coerce_salary(&FieldValue::from(185_000)), 185_000);
        assert_eq!(coerce_salary(&"$185,000".into()), 185_000);
        assert_eq!(coerce_salary(&" 210000 ".into()), 210_000);
        assert_eq!(coerce_salary(&"172500.75".into()), 172_500);
        assert_eq!(
            coerce_salary(&FieldValue::Number(
                serde_json::Number::from_f64(199_999.9).expect("finite")
            )),
            199_999
        );
    }

    #[test]
    fn salary_rejects_garbage_and_negatives() {
        assert_eq!(coerce_salary(&"competitive".into()), 0);
        assert_eq!(coerce_salary(&"".into()), 0);
        assert_eq!(coerce_salary(&FieldValue::Number((-5_i64).into())), 0);
    }

    #[test]
    fn numeric_text_fields_are_stringified() {
        let listing = normalize(&record(&[("company_name", FieldValue::from(42))]));
        assert_eq!(listing.company_name, "42");
    }

    #[test]
    fn listing_json_follows_bulk_field_rules() {
        let listing: JobListing = serde_json::from_str(
            r#"{"title": "VP Sales", "salary_min": "$180,000", "location": null, "remote": true}"#,
        )
        .expect("listing deserializes");

        assert_eq!(listing.title, "VP Sales");
        assert_eq!(listing.salary_min, 180_000);
        assert!(listing.location.is_empty());
    }

    #[test]
    fn listing_json_still_accepts_typed_values() {
        let listing: JobListing =
            serde_json::from_str(r#"{"salary_min": 172500.5, "company_stage": "Seed"}"#)
                .expect("listing deserializes");
        assert_eq!(listing.salary_min, 172_500);
        assert_eq!(listing.company_stage, "Seed");
    }

    #[test]
    fn parse_currency_reads_tracker_formatting() {
        assert_eq!(parse_currency("$170,000"), Some(170_000));
        assert_eq!(parse_currency("TBD"), None);
    }
}
