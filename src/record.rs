use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

/// One lab experiment entry. Every field is optional free text; a missing
/// field is treated exactly like an empty one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub name: String,
    pub reg_no: String,
    pub exp_no: String,
    pub date: String,
    pub title: String,
    pub aim: String,
    pub algorithm: String,
    pub program: String,
    pub output: String,
    pub result: String,
}

impl Record {
    /// Parse a record from a JSON object.
    ///
    /// Unknown keys (row ids, timestamps) are ignored, `null` counts as empty
    /// and scalar values such as a numeric `regNo` are taken as their text.
    pub fn from_json(input: &[u8]) -> Result<Self, Error> {
        let raw: RawRecord = serde_json::from_slice(input)?;
        Ok(raw.into())
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawRecord {
    name: Value,
    reg_no: Value,
    exp_no: Value,
    date: Value,
    title: Value,
    aim: Value,
    algorithm: Value,
    program: Value,
    output: Value,
    result: Value,
}

fn field_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        Self {
            name: field_text(raw.name),
            reg_no: field_text(raw.reg_no),
            exp_no: field_text(raw.exp_no),
            date: field_text(raw.date),
            title: field_text(raw.title),
            aim: field_text(raw.aim),
            algorithm: field_text(raw.algorithm),
            program: field_text(raw.program),
            output: field_text(raw.output),
            result: field_text(raw.result),
        }
    }
}
