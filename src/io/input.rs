//! Defensive parsing of record exports.
//!
//! Missing optional fields are fine (the record types default them); a
//! wrong-shaped document or a wrong-typed field is a validation error that
//! names the offending record index.

use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::core::types::{AnswerRecord, QuestionRecord};
use crate::errors::{AsklyticsError, Result};

fn load_records<T: DeserializeOwned>(path: &Path, what: &str) -> Result<Vec<T>> {
    let contents = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&contents)?;

    let serde_json::Value::Array(items) = value else {
        return Err(AsklyticsError::validation(format!(
            "{}: expected a JSON array of records, got {}",
            what,
            json_type_name(&value)
        )));
    };

    let total = items.len();
    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item).map_err(|e| {
                AsklyticsError::validation(format!("{}[{}]: {}", what, index, e))
            })
        })
        .collect::<Result<Vec<T>>>()?;

    log::debug!("loaded {} {} records from {}", total, what, path.display());
    Ok(records)
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Load a questions export file.
pub fn load_questions(path: &Path) -> Result<Vec<QuestionRecord>> {
    load_records(path, "questions")
}

/// Load an answers export file.
pub fn load_answers(path: &Path) -> Result<Vec<AnswerRecord>> {
    load_records(path, "answers")
}
