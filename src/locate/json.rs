// src/locate/json.rs

use serde_json::{Map, Value};

use crate::error::{PipelineError, Result};

pub type Record = Map<String, Value>;

/// Decode `content` and return the array of objects stored under the
/// top-level `key`.
pub fn records_at(content: &str, key: &str) -> Result<Vec<Record>> {
    let mut root: Value = serde_json::from_str(content)?;
    let value = root
        .as_object_mut()
        .and_then(|obj| obj.remove(key))
        .ok_or_else(|| PipelineError::MissingKey(key.to_string()))?;

    let Value::Array(items) = value else {
        return Err(PipelineError::UnexpectedLayout(format!(
            "`{}` is not an array",
            key
        )));
    };
    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::Object(record) => Ok(record),
            other => Err(PipelineError::UnexpectedLayout(format!(
                "`{}[{}]` is not an object: {}",
                key, i, other
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_at_key() {
        let records = records_at(
            r#"{"data": [{"sscode": "x", "sslast": 1.5}, {"sscode": "y"}], "total": 2}"#,
            "data",
        )
        .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["sslast"], Value::from(1.5));
    }

    #[test]
    fn test_missing_key() {
        let err = records_at(r#"{"rows": []}"#, "data").unwrap_err();
        assert_eq!(err.kind(), "MissingKey");
        let err = records_at(r#"[1, 2]"#, "data").unwrap_err();
        assert_eq!(err.kind(), "MissingKey");
    }

    #[test]
    fn test_wrong_shapes() {
        assert_eq!(
            records_at(r#"{"data": {"a": 1}}"#, "data").unwrap_err().kind(),
            "UnexpectedLayout"
        );
        assert_eq!(
            records_at(r#"{"data": [1]}"#, "data").unwrap_err().kind(),
            "UnexpectedLayout"
        );
        assert_eq!(records_at("<html>", "data").unwrap_err().kind(), "Json");
    }
}
