use crate::types::DatasetKind;

/// One typed cell of a canonical record.
#[derive(Clone, Debug, PartialEq)]
pub enum Field {
    Text(String),
    /// Always finite.
    Number(f64),
    Missing,
}

impl Field {
    pub fn text(value: impl Into<String>) -> Self {
        Field::Text(value.into())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map(Field::text).unwrap_or(Field::Missing)
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Field::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// One row, laid out in the owning dataset's column order.
pub type CanonicalRecord = Vec<Field>;

/// Normalized output of one run, rows in source order.
#[derive(Clone, Debug, PartialEq)]
pub struct Dataset {
    pub kind: DatasetKind,
    pub columns: Vec<String>,
    pub records: Vec<CanonicalRecord>,
}

impl Dataset {
    pub fn new(kind: DatasetKind, columns: &[&str]) -> Self {
        Self {
            kind,
            columns: columns.iter().map(|c| c.to_string()).collect(),
            records: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of one column, `None` if the column does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<&Field>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.records.iter().map(|r| &r[idx]).collect())
    }
}
