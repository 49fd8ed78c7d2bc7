use serde_json::Value;

use super::normalizer::{fields_from_object, FieldMap, FieldValue};
use super::IntakeError;

/// Parse a pasted batch: JSON (one object or an array of objects) first,
/// CSV with a header row when the text is not JSON at all.
pub fn parse_batch(text: &str) -> Result<Vec<FieldMap>, IntakeError> {
    if text.trim().is_empty() {
        return Err(IntakeError::Unparseable);
    }

    let records = match serde_json::from_str::<Value>(text) {
        Ok(value) => json_records(value)?,
        Err(_) => csv_records(text)?,
    };

    if records.is_empty() {
        return Err(IntakeError::Unparseable);
    }

    Ok(records)
}

fn json_records(value: Value) -> Result<Vec<FieldMap>, IntakeError> {
    match value {
        Value::Object(object) => Ok(vec![fields_from_object(object)]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(object) => Ok(fields_from_object(object)),
                _ => Err(IntakeError::Unparseable),
            })
            .collect(),
        _ => Err(IntakeError::Unparseable),
    }
}

fn csv_records(text: &str) -> Result<Vec<FieldMap>, IntakeError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;
        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(header, value)| (header.to_string(), FieldValue::Text(value.to_string())))
            .collect();
        records.push(fields);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_json_object_becomes_one_record() {
        let records =
            parse_batch(r#"{"title": "VP Sales", "salary_min": 180000, "job_url": null}"#)
                .expect("parse");
        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].get("title"),
            Some(&FieldValue::Text("VP Sales".to_string()))
        );
        assert_eq!(
            records[0].get("salary_min"),
            Some(&FieldValue::Number(180_000.into()))
        );
        assert!(!records[0].contains_key("job_url"));
    }

    #[test]
    fn json_array_preserves_order() {
        let records = parse_batch(r#"[{"title": "A"}, {"title": "B"}, {"title": "C"}]"#)
            .expect("parse");
        let titles: Vec<_> = records
            .iter()
            .map(|record| record.get("title").cloned())
            .collect();
        assert_eq!(
            titles,
            vec![
                Some(FieldValue::Text("A".to_string())),
                Some(FieldValue::Text("B".to_string())),
                Some(FieldValue::Text("C".to_string())),
            ]
        );
    }

    #[test]
    fn json_scalars_and_mixed_arrays_are_rejected() {
        assert!(matches!(parse_batch("42"), Err(IntakeError::Unparseable)));
        assert!(matches!(
            parse_batch(r#"[{"title": "A"}, "oops"]"#),
            Err(IntakeError::Unparseable)
        ));
        assert!(matches!(parse_batch("[]"), Err(IntakeError::Unparseable)));
    }

    #[test]
    fn csv_fallback_maps_headers_to_fields() {
        let text = "title,company_name,salary_min,location\n\
VP Sales, Acme ,180000,Remote\n\
Account Executive,Globex,90000,Austin\n";
        let records = parse_batch(text).expect("parse csv");
        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].get("company_name"),
            Some(&FieldValue::Text("Acme".to_string()))
        );
        assert_eq!(
            records[1].get("salary_min"),
            Some(&FieldValue::Text("90000".to_string()))
        );
    }

    #[test]
    fn csv_with_header_only_is_unparseable() {
        assert!(matches!(
            parse_batch("title,company_name\n"),
            Err(IntakeError::Unparseable)
        ));
        assert!(matches!(parse_batch("   \n "), Err(IntakeError::Unparseable)));
    }

    #[test]
    fn short_csv_rows_leave_trailing_fields_missing() {
        let records = parse_batch("title,location,salary_min\nVP Sales,Remote\n").expect("parse");
        assert!(!records[0].contains_key("salary_min"));
    }
}
